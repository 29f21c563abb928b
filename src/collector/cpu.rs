use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::timeout;

use super::dedup_preserving_order;
use super::normalize;
use super::types::DeviceTarget;
use crate::config::catalog::OidCatalog;
use crate::snmp::SnmpClientV2c;
use crate::vendor::Vendor;

/// Сборщик загрузки CPU
pub struct CpuFetcher;

impl CpuFetcher {
    /// Опрашивает кандидатов CPU одним пакетом и возвращает первое валидное значение.
    /// Err — устройство недоступно; Ok(None) — данных нет, это не ошибка.
    pub async fn fetch(
        target: &DeviceTarget,
        vendor: Vendor,
        catalog: &OidCatalog,
        get_timeout: Duration,
    ) -> Result<Option<f64>> {
        let candidates = dedup_preserving_order(&catalog.cpu);
        if candidates.is_empty() {
            return Ok(None);
        }

        let work = async {
            let mut client =
                SnmpClientV2c::new(&target.address, target.community.as_bytes()).await?;
            client.get_batch(&candidates).await
        };

        let bindings = timeout(get_timeout, work)
            .await
            .context("Таймаут SNMP GET")??;

        Ok(Self::select(vendor, catalog, &bindings))
    }

    /// Первое валидное значение в порядке запрошенных кандидатов
    fn select(
        vendor: Vendor,
        catalog: &OidCatalog,
        bindings: &[(String, Option<i64>)],
    ) -> Option<f64> {
        for (oid, value) in bindings {
            if let Some(raw) = value {
                return Some(normalize::cpu_percent(vendor, &catalog.quirks, oid, *raw));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_defined_binding_wins() {
        let catalog = OidCatalog {
            cpu: vec![
                "1.3.6.1.2.1.25.3.3.1.2.1".to_string(),
                "1.3.6.1.4.1.2021.11.9.0".to_string(),
            ],
            ..OidCatalog::default()
        };
        let bindings = vec![
            ("1.3.6.1.2.1.25.3.3.1.2.1".to_string(), None),
            ("1.3.6.1.4.1.2021.11.9.0".to_string(), Some(42)),
        ];

        assert_eq!(
            CpuFetcher::select(Vendor::Generic, &catalog, &bindings),
            Some(42.0)
        );
    }

    #[test]
    fn all_bindings_absent_means_no_data() {
        let catalog = OidCatalog::default();
        let bindings = vec![("1.3.6.1.2.1.25.3.3.1.2.1".to_string(), None)];

        assert_eq!(CpuFetcher::select(Vendor::Generic, &catalog, &bindings), None);
    }

    #[tokio::test]
    async fn empty_candidate_list_returns_none_without_network() {
        // 203.0.113.1 — TEST-NET, любой реальный запрос завис бы до таймаута;
        // таймаут в 10мс доказывает, что сессия даже не открывалась
        let target = DeviceTarget {
            address: "203.0.113.1:161".to_string(),
            community: "public".to_string(),
            vendor_hint: String::new(),
        };

        let result = CpuFetcher::fetch(
            &target,
            Vendor::Generic,
            &OidCatalog::default(),
            Duration::from_millis(10),
        )
        .await;

        assert_eq!(result.unwrap(), None);
    }
}
