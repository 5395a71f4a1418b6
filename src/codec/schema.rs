//! Structural check of decoded item records
//!
//! Every element of an import payload is inspected field by field before it
//! becomes an `Item`. Exports from the browser version of the tracker use
//! Portuguese field names; those are accepted as aliases.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};

use crate::error::{Result, TrackerError};
use crate::ppe::Item;

/// Canonical field name followed by the legacy names accepted on import
const ID: &[&str] = &["id"];
const NAME: &[&str] = &["name", "nome"];
const INTERVAL_DAYS: &[&str] = &["intervalDays", "intervalo"];
const LAST_REPLACED_DATE: &[&str] = &["lastReplacedDate", "dataTroca"];
const CREATED_AT: &[&str] = &["createdAt", "criadoEm"];

/// Convert one JSON element into an `Item`, naming the first problem found
pub(crate) fn item_from_value(index: usize, value: &Value) -> Result<Item> {
    let object = value.as_object().ok_or_else(|| {
        violation(
            index,
            format!("expected an object, found {}", kind_of(value)),
        )
    })?;

    let id = required(index, object, ID)?
        .as_u64()
        .filter(|id| *id > 0)
        .ok_or_else(|| violation(index, "id must be a positive integer"))?;

    let name = required(index, object, NAME)?
        .as_str()
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| violation(index, "name must be a non-empty string"))?
        .to_string();

    let interval_days = positive_days(required(index, object, INTERVAL_DAYS)?)
        .ok_or_else(|| violation(index, "intervalDays must be a positive integer"))?;

    let date_str = required(index, object, LAST_REPLACED_DATE)?
        .as_str()
        .ok_or_else(|| violation(index, "lastReplacedDate must be a string"))?;
    let last_replaced_date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
        violation(
            index,
            format!("lastReplacedDate '{}' is not a YYYY-MM-DD date", date_str),
        )
    })?;

    let created_str = required(index, object, CREATED_AT)?
        .as_str()
        .ok_or_else(|| violation(index, "createdAt must be a string"))?;
    let created_at = DateTime::parse_from_rfc3339(created_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            violation(
                index,
                format!("createdAt '{}' is not an RFC 3339 timestamp", created_str),
            )
        })?;

    Ok(Item {
        id,
        name,
        interval_days,
        last_replaced_date,
        created_at,
    })
}

fn required<'a>(index: usize, object: &'a Map<String, Value>, names: &[&str]) -> Result<&'a Value> {
    names
        .iter()
        .find_map(|name| object.get(*name))
        .ok_or_else(|| violation(index, format!("missing field `{}`", names[0])))
}

/// Accepts integers and integral floats (`30.0`) in `1..=u32::MAX`
fn positive_days(value: &Value) -> Option<u32> {
    let days = match value.as_u64() {
        Some(n) => n,
        None => {
            let f = value.as_f64()?;
            if f.fract() != 0.0 || f < 1.0 || f > f64::from(u32::MAX) {
                return None;
            }
            f as u64
        }
    };
    u32::try_from(days).ok().filter(|d| *d > 0)
}

fn violation(index: usize, message: impl AsRef<str>) -> TrackerError {
    TrackerError::validation(format!("item {}: {}", index, message.as_ref()))
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
