use std::collections::HashMap;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::snmp::parse_oid;
use crate::vendor::Vendor;

/// OID или список OID — обе формы допустимы в YAML профиле
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(oid) => vec![oid],
            OneOrMany::Many(oids) => oids,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RamSection {
    total: OneOrMany,
    used: OneOrMany,
}

/// Эвристики нормализации из наблюдений за прошивками производителя.
/// Живут в профиле, а не в коде, потому что не доказаны для всех моделей.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Quirks {
    /// Ветки CPU со шкалой 0-255
    pub cpu_scale_255: Vec<String>,
    /// Ветки CPU с сотыми долями процента
    pub cpu_centipercent: Vec<String>,
    /// Ветки "used", которые на самом деле отдают свободную память
    pub ram_free_branches: Vec<String>,
    /// Total ниже порога считается выраженным в мегабайтах
    pub ram_unit_threshold: i64,
}

impl Default for Quirks {
    fn default() -> Self {
        Self {
            cpu_scale_255: Vec::new(),
            cpu_centipercent: Vec::new(),
            ram_free_branches: Vec::new(),
            ram_unit_threshold: 1024,
        }
    }
}

/// Сырой YAML документ профиля
#[derive(Debug, Clone, Deserialize)]
struct ProfileDoc {
    name: String,
    cpu: OneOrMany,
    ram: RamSection,
    #[serde(default)]
    quirks: Quirks,
}

/// Каталог кандидатов OID для одного производителя
#[derive(Debug, Clone, Default)]
pub struct OidCatalog {
    pub cpu: Vec<String>,
    pub ram_total: Vec<String>,
    pub ram_used: Vec<String>,
    pub quirks: Quirks,
}

impl OidCatalog {
    pub fn is_empty(&self) -> bool {
        self.cpu.is_empty() && self.ram_total.is_empty() && self.ram_used.is_empty()
    }
}

/// Встроенные YAML профили, по одному на каталог производителя
const PROFILE_SOURCES: &[(&str, &str)] = &[
    ("routeros", include_str!("../../profiles/routeros.yaml")),
    ("junos", include_str!("../../profiles/junos.yaml")),
    ("vrp", include_str!("../../profiles/vrp.yaml")),
    ("generic", include_str!("../../profiles/generic.yaml")),
];

/// Таблица каталогов, разбирается и валидируется один раз при старте.
/// Невалидный профиль выпадает из таблицы, но не роняет процесс.
static CATALOGS: LazyLock<HashMap<&'static str, OidCatalog>> = LazyLock::new(|| {
    let mut table = HashMap::new();

    for (name, source) in PROFILE_SOURCES {
        match parse_profile(source) {
            Ok(catalog) => {
                table.insert(*name, catalog);
            }
            Err(e) => {
                tracing::warn!(profile = *name, "Профиль OID не загружен: {:#}", e);
            }
        }
    }

    table
});

fn parse_profile(source: &str) -> Result<OidCatalog> {
    let doc: ProfileDoc =
        serde_yml::from_str(source).context("Не удалось распарсить YAML профиль")?;

    let catalog = OidCatalog {
        cpu: doc.cpu.into_vec(),
        ram_total: doc.ram.total.into_vec(),
        ram_used: doc.ram.used.into_vec(),
        quirks: doc.quirks,
    };

    for oid in catalog
        .cpu
        .iter()
        .chain(&catalog.ram_total)
        .chain(&catalog.ram_used)
    {
        parse_oid(oid).with_context(|| {
            format!("Невалидный OID '{}' в профиле '{}'", oid, doc.name)
        })?;
    }

    Ok(catalog)
}

/// Возвращает каталог OID для производителя.
/// Отсутствие профиля — откат на generic, отсутствие generic — пустой каталог.
pub fn resolve(vendor: Vendor) -> OidCatalog {
    CATALOGS
        .get(vendor.profile_name())
        .or_else(|| CATALOGS.get("generic"))
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn resolve_never_fails_for_any_vendor() {
        let vendors = [
            Vendor::Mikrotik,
            Vendor::Juniper,
            Vendor::Huawei,
            Vendor::Cisco,
            Vendor::Hp,
            Vendor::Generic,
        ];

        for vendor in vendors {
            let catalog = resolve(vendor);
            assert!(!catalog.cpu.is_empty(), "нет CPU кандидатов для {}", vendor);
        }
    }

    #[test]
    fn mikrotik_catalog_carries_quirks() {
        let catalog = resolve(Vendor::Mikrotik);
        assert!(!catalog.quirks.cpu_scale_255.is_empty());
        assert!(!catalog.quirks.cpu_centipercent.is_empty());
        assert!(!catalog.quirks.ram_free_branches.is_empty());
        assert_eq!(catalog.quirks.ram_unit_threshold, 1024);
    }

    #[test]
    fn scalar_oid_form_is_accepted() {
        // в junos профиле total/used записаны одиночной строкой
        let catalog = resolve(Vendor::Juniper);
        assert_eq!(catalog.ram_total.len(), 1);
        assert_eq!(catalog.ram_used.len(), 1);
    }

    #[test]
    fn generic_ram_candidates_start_empty() {
        // статических RAM OID нет, их даёт обход hrStorage
        let catalog = resolve(Vendor::Generic);
        assert!(catalog.ram_total.is_empty());
        assert!(catalog.ram_used.is_empty());
    }

    #[test]
    fn cisco_and_hp_share_generic_profile() {
        assert_eq!(resolve(Vendor::Cisco).cpu, resolve(Vendor::Generic).cpu);
        assert_eq!(resolve(Vendor::Hp).cpu, resolve(Vendor::Generic).cpu);
    }

    #[test]
    fn default_catalog_is_empty() {
        assert!(OidCatalog::default().is_empty());
    }

    #[test]
    fn malformed_profile_is_rejected() {
        assert!(parse_profile("name: broken\ncpu: [\"1.3.x\"]\nram: {total: [], used: []}").is_err());
        assert!(parse_profile("просто текст").is_err());
    }
}
