use anyhow::{Context, Result};
use snmp2::Oid;

/// Парсит строку OID в объект Oid
pub fn parse_oid(s: &str) -> Result<Oid<'static>> {
    let parts: Result<Vec<u64>, _> = s
        .trim()
        .split('.')
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<u64>())
        .collect();

    let parts = parts.context(format!("Невалидный OID: {}", s))?;
    Oid::from(&parts)
        .map_err(|e| anyhow::anyhow!("Не удалось создать Oid: {:?}", e))
}

/// Проверяет, лежит ли OID внутри ветки (строго по границе компонента)
pub fn oid_in_branch(oid: &str, branch: &str) -> bool {
    let branch = branch.trim_end_matches('.');
    oid == branch || oid.starts_with(&format!("{}.", branch))
}

/// Извлекает хвостовой компонент OID — индекс строки таблицы
pub fn trailing_index(oid: &str) -> Option<u32> {
    oid.rsplit('.').next()?.parse().ok()
}
