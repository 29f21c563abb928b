use std::collections::HashSet;
use std::time::Duration;

pub mod cpu;
pub mod normalize;
pub mod ram;
pub mod storage;
pub mod types;

pub use cpu::CpuFetcher;
pub use ram::RamFetcher;
pub use storage::StorageDiscovery;
pub use types::{DeviceTarget, UsageResult};

use crate::config::{Settings, catalog};
use crate::vendor::Vendor;

/// Оркестратор опроса устройства: CPU, затем RAM, строго последовательно
pub struct UsageCollector {
    settings: Settings,
}

impl UsageCollector {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Полный цикл опроса устройства. Никогда не возвращает ошибку:
    /// недоступность по любой метрике превращается в None, а отказ одной
    /// метрики не отменяет попытку собрать вторую.
    pub async fn collect_usage(&self, target: &DeviceTarget) -> UsageResult {
        let vendor = Vendor::classify(&target.vendor_hint);
        let mut catalog = catalog::resolve(vendor);

        tracing::debug!(address = %target.address, vendor = %vendor, "Начинаем опрос устройства");

        let cpu_percent =
            match CpuFetcher::fetch(target, vendor, &catalog, self.get_timeout()).await {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(address = %target.address, "CPU опрос не удался: {:#}", e);
                    None
                }
            };

        // У generic-профиля нет статических RAM OID: кандидатов даёт обход
        // таблицы хранилищ. Выполняется после CPU, чтобы сетевые вызовы
        // к устройству шли строго по одному.
        if vendor.profile_name() == "generic" {
            let indices = StorageDiscovery::discover_indices(target, self.walk_timeout()).await;
            let (totals, used) = StorageDiscovery::storage_candidates(&indices);
            catalog.ram_total.extend(totals);
            catalog.ram_used.extend(used);
        }

        let ram_percent =
            match RamFetcher::fetch(target, vendor, &catalog, self.get_timeout()).await {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(address = %target.address, "RAM опрос не удался: {:#}", e);
                    None
                }
            };

        UsageResult {
            cpu_percent,
            ram_percent,
        }
    }

    fn get_timeout(&self) -> Duration {
        Duration::from_secs(self.settings.connection.get_timeout)
    }

    fn walk_timeout(&self) -> Duration {
        Duration::from_secs(self.settings.connection.walk_timeout)
    }
}

/// Убирает дубликаты OID, сохраняя порядок кандидатов
pub(crate) fn dedup_preserving_order(oids: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    oids.iter()
        .filter(|oid| seen.insert(oid.as_str()))
        .cloned()
        .collect()
}
