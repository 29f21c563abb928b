use std::fmt;

use serde::{Deserialize, Serialize};

/// Производитель устройства, определённый по строке ОС
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Mikrotik,
    Juniper,
    Huawei,
    Cisco,
    Hp,
    Generic,
}

/// Группы ключевых слов в фиксированном порядке приоритета.
/// Первая совпавшая группа выигрывает.
const KEYWORD_GROUPS: &[(Vendor, &[&str])] = &[
    (Vendor::Mikrotik, &["mikrotik", "routeros", "1.3.6.1.4.1.14988."]),
    (Vendor::Juniper, &["juniper", "junos", "1.3.6.1.4.1.2636."]),
    (Vendor::Huawei, &["huawei", "vrp", "1.3.6.1.4.1.2011."]),
    (Vendor::Cisco, &["cisco", "ios-xe", "nx-os", "1.3.6.1.4.1.9."]),
    (Vendor::Hp, &["hp", "procurve", "aruba", "1.3.6.1.4.1.11."]),
];

impl Vendor {
    /// Определяет производителя по свободной строке ОС/платформы.
    /// Любой вход даёт ровно один тег, Generic — полный запасной вариант.
    pub fn classify(os_hint: &str) -> Vendor {
        let hint = os_hint.to_lowercase();

        for (vendor, keywords) in KEYWORD_GROUPS {
            if keywords.iter().any(|kw| hint.contains(kw)) {
                return *vendor;
            }
        }

        Vendor::Generic
    }

    /// Имя профиля с OID для производителя
    pub fn profile_name(&self) -> &'static str {
        match self {
            Vendor::Mikrotik => "routeros",
            Vendor::Juniper => "junos",
            Vendor::Huawei => "vrp",
            Vendor::Cisco | Vendor::Hp | Vendor::Generic => "generic",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Vendor::Mikrotik => "mikrotik",
            Vendor::Juniper => "juniper",
            Vendor::Huawei => "huawei",
            Vendor::Cisco => "cisco",
            Vendor::Hp => "hp",
            Vendor::Generic => "generic",
        };
        write!(f, "{}", tag)
    }
}
