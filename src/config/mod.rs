use std::env;

use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod settings;

pub use catalog::{OidCatalog, Quirks, resolve};
pub use settings::Settings;

/// Главная конфигурация приложения
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Базовые настройки
    pub settings: Settings,
}

impl AppConfig {
    /// Собирает конфигурацию: настройки по умолчанию плюс переменные окружения
    pub fn load() -> Self {
        let mut settings = Settings::default();

        if let Some(t) = env_u64("SNMP_GET_TIMEOUT") {
            settings.connection.get_timeout = t;
        }
        if let Some(t) = env_u64("SNMP_WALK_TIMEOUT") {
            settings.connection.walk_timeout = t;
        }

        Self { settings }
    }

    /// Адрес устройства из переменной окружения или по умолчанию
    pub fn get_target(&self) -> String {
        env::var("SNMP_TARGET").unwrap_or_else(|_| "127.0.0.1:161".to_string())
    }

    /// Community для SNMPv2c
    pub fn get_community(&self) -> String {
        env::var("SNMP_COMMUNITY").unwrap_or_else(|_| self.settings.auth.community.clone())
    }

    /// Строка ОС устройства для определения производителя
    pub fn get_vendor_hint(&self) -> String {
        env::var("SNMP_VENDOR_HINT").unwrap_or_default()
    }
}

fn env_u64(name: &str) -> Option<u64> {
    env::var(name).ok().and_then(|s| s.parse().ok())
}
