use std::collections::HashSet;
use std::time::Duration;

use anyhow::Result;
use tokio::time::timeout;

use super::types::DeviceTarget;
use crate::snmp::{SnmpClientV2c, parse_oid, trailing_index};

/// Колонки стандартной таблицы хранилищ host-resources
pub const HR_STORAGE_TYPE: &str = "1.3.6.1.2.1.25.2.3.1.2";
pub const HR_STORAGE_SIZE: &str = "1.3.6.1.2.1.25.2.3.1.5";
pub const HR_STORAGE_USED: &str = "1.3.6.1.2.1.25.2.3.1.6";

/// Запасной набор индексов, если обход таблицы не удался или пуст
pub const FALLBACK_INDICES: [u32; 5] = [1, 2, 3, 4, 5];

/// Обнаружение индексов таблицы хранилищ для generic-устройств
pub struct StorageDiscovery;

impl StorageDiscovery {
    /// Перечисляет индексы hrStorage обходом колонки hrStorageType.
    /// Ошибка, таймаут или пустой результат дают запасной набор —
    /// неудача обнаружения никогда не прерывает сбор метрик.
    pub async fn discover_indices(target: &DeviceTarget, walk_timeout: Duration) -> Vec<u32> {
        match Self::walk_indices(target, walk_timeout).await {
            Ok(indices) => Self::indices_or_fallback(indices),
            Err(e) => {
                tracing::debug!(address = %target.address, "Обход hrStorage не удался: {:#}", e);
                FALLBACK_INDICES.to_vec()
            }
        }
    }

    /// Успешный, но пустой обход равнозначен неудаче: берём запасной набор
    pub fn indices_or_fallback(found: Vec<u32>) -> Vec<u32> {
        if found.is_empty() {
            FALLBACK_INDICES.to_vec()
        } else {
            found
        }
    }

    async fn walk_indices(target: &DeviceTarget, walk_timeout: Duration) -> Result<Vec<u32>> {
        let root = parse_oid(HR_STORAGE_TYPE)?;

        let work = async {
            let mut client = SnmpClientV2c::new(&target.address, target.community.as_bytes()).await?;
            client.walk(&root).await
        };

        let oids = timeout(walk_timeout, work)
            .await
            .map_err(|_| anyhow::anyhow!("Таймаут обхода hrStorage"))??;

        let oid_strings: Vec<String> = oids.iter().map(|oid| oid.to_string()).collect();
        Ok(Self::indices_from_walk(&oid_strings))
    }

    /// Извлекает хвостовые индексы из OID результата обхода.
    /// Дубликаты убираются независимо от порядка ответа агента.
    pub fn indices_from_walk(oids: &[String]) -> Vec<u32> {
        let mut seen = HashSet::new();
        oids.iter()
            .filter_map(|oid| trailing_index(oid))
            .filter(|index| seen.insert(*index))
            .collect()
    }

    /// Синтезирует кандидатов total/used по найденным индексам
    pub fn storage_candidates(indices: &[u32]) -> (Vec<String>, Vec<String>) {
        let totals = indices
            .iter()
            .map(|i| format!("{}.{}", HR_STORAGE_SIZE, i))
            .collect();
        let used = indices
            .iter()
            .map(|i| format!("{}.{}", HR_STORAGE_USED, i))
            .collect();

        (totals, used)
    }
}
