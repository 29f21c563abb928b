use anyhow::{Context, Result};
use snmp2::{AsyncSession, Oid, Value};

use super::parse_oid;

/// Обёртка над SNMPv2c сессией.
/// Сессия закрывается при выходе из области видимости на любом пути.
pub struct SnmpClientV2c {
    session: AsyncSession,
}

impl SnmpClientV2c {
    pub async fn new(target: &str, community: &[u8]) -> Result<Self> {
        let session = AsyncSession::new_v2c(target, community, 2)
            .await
            .context("Не удалось создать SNMP сессию")?;

        Ok(Self { session })
    }

    /// GET одного OID; значение сразу приводится к целому.
    /// None — переменная отсутствует на устройстве (NoSuchObject и т.п.)
    pub async fn get_i64(&mut self, oid: &Oid<'_>) -> Result<Option<i64>> {
        let resp = self
            .session
            .get(oid)
            .await
            .context("SNMP GET запрос не удался")?;

        let value = resp
            .varbinds
            .into_iter()
            .next()
            .and_then(|(_, value)| value_as_i64(&value));

        Ok(value)
    }

    /// Пакетный GET: значения возвращаются в порядке запрошенных OID.
    /// Ошибка транспорта прерывает весь пакет, отсутствующая переменная — нет.
    pub async fn get_batch(&mut self, oids: &[String]) -> Result<Vec<(String, Option<i64>)>> {
        let mut results = Vec::with_capacity(oids.len());

        for oid_str in oids {
            let oid = parse_oid(oid_str)?;
            let value = self.get_i64(&oid).await?;
            results.push((oid_str.clone(), value));
        }

        Ok(results)
    }

    /// Обходит поддерево через GETBULK и возвращает найденные OID
    pub async fn walk(&mut self, start_oid: &Oid<'_>) -> Result<Vec<Oid<'static>>> {
        let mut results: Vec<Oid<'static>> = Vec::new();
        let mut current_oid = start_oid.to_owned();

        loop {
            let resp = self
                .session
                .getbulk(&[&current_oid], 0, 10)
                .await
                .context("SNMP GETBULK запрос не удался")?;

            let mut items = Vec::new();
            let mut found_any = false;

            for (oid, value) in resp.varbinds {
                if walk_finished(start_oid, &current_oid, &oid, &value) {
                    results.extend(items);
                    return Ok(results);
                }

                current_oid = oid.to_owned();
                items.push(current_oid.clone());
                found_any = true;
            }

            if !found_any {
                break;
            }

            results.extend(items);
        }

        Ok(results)
    }
}

/// Определяет, закончился ли обход поддерева: ответ вышел за его границу,
/// агент перестал продвигать OID (иначе цикл повторял бы один и тот же
/// запрос до таймаута) или отдал EndOfMibView
fn walk_finished(
    start_oid: &Oid<'_>,
    previous: &Oid<'_>,
    oid: &Oid<'_>,
    value: &Value<'_>,
) -> bool {
    !oid.starts_with(start_oid) || oid == previous || matches!(value, Value::EndOfMibView)
}

/// Приводит SNMP значение к целому, если оно числовое
pub fn value_as_i64(value: &Value<'_>) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(*i),
        Value::Counter32(c) => Some(i64::from(*c)),
        Value::Unsigned32(u) => Some(i64::from(*u)),
        Value::Timeticks(t) => Some(i64::from(*t)),
        Value::Counter64(c) => i64::try_from(*c).ok(),
        Value::OctetString(bytes) => std::str::from_utf8(bytes).ok()?.trim().parse().ok(),
        _ => None,
    }
}
