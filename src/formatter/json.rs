use serde::{Deserialize, Serialize};

use crate::collector::{DeviceTarget, UsageResult};
use crate::vendor::Vendor;

/// JSON структура для отдачи слою хранения
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageResultJson {
    pub address: String,
    pub vendor: String,
    pub timestamp: String,
    pub cpu_percent: Option<f64>,
    pub ram_percent: Option<f64>,
    pub cpu_status: String, // "success" | "no_data"
    pub ram_status: String,
}

/// JSON форматтер результата опроса
pub struct JsonFormatter;

impl JsonFormatter {
    /// Конвертирует результат опроса в JSON структуру
    pub fn format_usage_result(
        target: &DeviceTarget,
        vendor: Vendor,
        result: &UsageResult,
    ) -> UsageResultJson {
        UsageResultJson {
            address: target.address.clone(),
            vendor: vendor.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            cpu_percent: result.cpu_percent,
            ram_percent: result.ram_percent,
            cpu_status: Self::status(result.cpu_percent),
            ram_status: Self::status(result.ram_percent),
        }
    }

    fn status(value: Option<f64>) -> String {
        let status = if value.is_some() { "success" } else { "no_data" };
        status.to_string()
    }

    /// Сериализует результат в JSON строку
    pub fn to_json_string(
        target: &DeviceTarget,
        vendor: Vendor,
        result: &UsageResult,
    ) -> anyhow::Result<String> {
        let json_result = Self::format_usage_result(target, vendor, result);
        serde_json::to_string_pretty(&json_result)
            .map_err(|e| anyhow::anyhow!("Ошибка сериализации в JSON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn null_metric_is_reported_as_no_data() {
        let target = DeviceTarget {
            address: "192.0.2.10:161".to_string(),
            community: "public".to_string(),
            vendor_hint: "RouterOS".to_string(),
        };
        let result = UsageResult {
            cpu_percent: Some(37.0),
            ram_percent: None,
        };

        let json = JsonFormatter::format_usage_result(&target, Vendor::Mikrotik, &result);

        assert_eq!(json.vendor, "mikrotik");
        assert_eq!(json.cpu_status, "success");
        assert_eq!(json.ram_status, "no_data");
        assert_eq!(json.cpu_percent, Some(37.0));
        assert_eq!(json.ram_percent, None);
    }
}
