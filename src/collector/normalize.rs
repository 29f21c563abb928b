use crate::config::catalog::Quirks;
use crate::snmp::oid_in_branch;
use crate::vendor::Vendor;

const BYTES_PER_MEGABYTE: i64 = 1_048_576;

/// Приводит сырое значение CPU к проценту 0-100 (целое).
/// Коррекции шкалы применяются только к известным веткам MikroTik.
pub fn cpu_percent(vendor: Vendor, quirks: &Quirks, oid: &str, raw: i64) -> f64 {
    let mut value = raw as f64;

    if vendor == Vendor::Mikrotik {
        if in_any_branch(oid, &quirks.cpu_scale_255) {
            value = value * 100.0 / 255.0;
        } else if in_any_branch(oid, &quirks.cpu_centipercent) && raw > 100 {
            // сотые доли процента; целочисленное деление, как отдаёт прошивка
            value = (raw / 100) as f64;
        }
    }

    clamp_percent(value).round()
}

/// Считает процент занятой памяти для пары total/used.
/// None — пара невалидна (нулевой total), поиск пар продолжается.
pub fn ram_percent(
    vendor: Vendor,
    quirks: &Quirks,
    used_oid: &str,
    total_raw: i64,
    used_raw: i64,
) -> Option<f64> {
    let mut total = total_raw as f64;
    let mut used = used_raw as f64;

    if vendor == Vendor::Mikrotik {
        // ветка отдаёт свободную память, занятая = total - free
        if in_any_branch(used_oid, &quirks.ram_free_branches) {
            used = total - used;
        }

        // часть прошивок отдаёт мегабайты вместо байт
        if total_raw > 0 && total_raw < quirks.ram_unit_threshold {
            total *= BYTES_PER_MEGABYTE as f64;
            used *= BYTES_PER_MEGABYTE as f64;
        }
    }

    if total <= 0.0 {
        return None;
    }

    Some(round2(clamp_percent(used / total * 100.0)))
}

fn in_any_branch(oid: &str, branches: &[String]) -> bool {
    branches.iter().any(|branch| oid_in_branch(oid, branch))
}

fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
