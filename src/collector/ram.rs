use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::timeout;

use super::dedup_preserving_order;
use super::normalize;
use super::types::DeviceTarget;
use crate::config::catalog::OidCatalog;
use crate::snmp::SnmpClientV2c;
use crate::vendor::Vendor;

/// Сборщик занятости памяти
pub struct RamFetcher;

impl RamFetcher {
    /// Опрашивает кандидатов total и used одним пакетом и ищет первую валидную пару.
    /// Err — устройство недоступно; Ok(None) — полной пары нет, это не ошибка.
    pub async fn fetch(
        target: &DeviceTarget,
        vendor: Vendor,
        catalog: &OidCatalog,
        get_timeout: Duration,
    ) -> Result<Option<f64>> {
        if catalog.ram_total.is_empty() || catalog.ram_used.is_empty() {
            return Ok(None);
        }

        let mut batch = catalog.ram_total.clone();
        batch.extend(catalog.ram_used.iter().cloned());
        let batch = dedup_preserving_order(&batch);

        let work = async {
            let mut client =
                SnmpClientV2c::new(&target.address, target.community.as_bytes()).await?;
            client.get_batch(&batch).await
        };

        let bindings = timeout(get_timeout, work)
            .await
            .context("Таймаут SNMP GET")??;

        let values: HashMap<String, i64> = bindings
            .into_iter()
            .filter_map(|(oid, value)| value.map(|v| (oid, v)))
            .collect();

        Ok(Self::select_pair(vendor, catalog, &values))
    }

    /// Перебирает все комбинации total x used (total — внешний цикл) и
    /// возвращает процент для первой валидной пары. Пары не обязаны быть
    /// выровнены по индексам списков.
    fn select_pair(
        vendor: Vendor,
        catalog: &OidCatalog,
        values: &HashMap<String, i64>,
    ) -> Option<f64> {
        for total_oid in &catalog.ram_total {
            let Some(&total_raw) = values.get(total_oid) else {
                continue;
            };

            for used_oid in &catalog.ram_used {
                let Some(&used_raw) = values.get(used_oid) else {
                    continue;
                };

                if let Some(pct) = normalize::ram_percent(
                    vendor,
                    &catalog.quirks,
                    used_oid,
                    total_raw,
                    used_raw,
                ) {
                    return Some(pct);
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const T1: &str = "1.3.6.1.2.1.25.2.3.1.5.1";
    const T2: &str = "1.3.6.1.2.1.25.2.3.1.5.65536";
    const U1: &str = "1.3.6.1.2.1.25.2.3.1.6.1";
    const U2: &str = "1.3.6.1.2.1.25.2.3.1.6.65536";

    fn catalog() -> OidCatalog {
        OidCatalog {
            ram_total: vec![T1.to_string(), T2.to_string()],
            ram_used: vec![U1.to_string(), U2.to_string()],
            ..OidCatalog::default()
        }
    }

    #[test]
    fn pair_search_crosses_list_positions() {
        // ответили только T2 и U1 — пара всё равно должна найтись
        let values = HashMap::from([(T2.to_string(), 1000), (U1.to_string(), 250)]);

        assert_eq!(
            RamFetcher::select_pair(Vendor::Generic, &catalog(), &values),
            Some(25.0)
        );
    }

    #[test]
    fn zero_total_continues_search_over_remaining_pairs() {
        let values = HashMap::from([
            (T1.to_string(), 0),
            (T2.to_string(), 2000),
            (U1.to_string(), 500),
        ]);

        assert_eq!(
            RamFetcher::select_pair(Vendor::Generic, &catalog(), &values),
            Some(25.0)
        );
    }

    #[test]
    fn incomplete_pair_means_no_data() {
        let values = HashMap::from([(T1.to_string(), 1000)]);

        assert_eq!(RamFetcher::select_pair(Vendor::Generic, &catalog(), &values), None);
    }

    #[tokio::test]
    async fn empty_candidate_lists_return_none_without_network() {
        let target = DeviceTarget {
            address: "203.0.113.1:161".to_string(),
            community: "public".to_string(),
            vendor_hint: String::new(),
        };

        let result = RamFetcher::fetch(
            &target,
            Vendor::Generic,
            &OidCatalog::default(),
            Duration::from_millis(10),
        )
        .await;

        assert_eq!(result.unwrap(), None);
    }
}
