/// Описание опрашиваемого устройства; неизменно в пределах одного цикла
#[derive(Debug, Clone)]
pub struct DeviceTarget {
    /// IP или имя хоста с портом, например "192.0.2.10:161"
    pub address: String,
    /// Community string SNMPv2c
    pub community: String,
    /// Свободная строка ОС/платформы из учётной записи устройства
    pub vendor_hint: String,
}

/// Итог опроса устройства.
/// None — валидное чтение не получено; это не ошибка связи.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UsageResult {
    pub cpu_percent: Option<f64>,
    pub ram_percent: Option<f64>,
}
