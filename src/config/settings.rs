use serde::{Deserialize, Serialize};

/// Базовые настройки приложения
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Настройки подключения
    pub connection: ConnectionSettings,
    /// Настройки аутентификации
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Таймаут пакетного GET (секунды)
    pub get_timeout: u64,
    /// Таймаут обхода таблицы хранилищ (секунды)
    pub walk_timeout: u64,
    /// Количество повторов при ошибках; слабое железо повторов не прощает
    pub retries: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Community string SNMPv2c
    pub community: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            connection: ConnectionSettings {
                get_timeout: 8,
                walk_timeout: 2,
                retries: 0,
            },
            auth: AuthSettings {
                community: "public".to_string(),
            },
        }
    }
}
