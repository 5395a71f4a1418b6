use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Result, TrackerError};

/// A tracked piece of protective equipment
///
/// Serialized with camelCase field names; this is the shape of both the
/// persistence slot and the export file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier, assigned at creation and never changed
    pub id: u64,
    /// Label shown to the user (e.g., "Nitrile gloves")
    pub name: String,
    /// Replacement cadence in days (at least 1)
    pub interval_days: u32,
    /// Date of the last replacement (format: YYYY-MM-DD)
    pub last_replaced_date: NaiveDate,
    /// When the record was created; informational only
    pub created_at: DateTime<Utc>,
}

/// User-supplied fields for a new item
///
/// `interval_days` is signed so that zero and negative input can be rejected
/// with a validation error instead of being unrepresentable.
#[derive(Debug, Clone)]
pub struct ItemDraft {
    pub name: String,
    pub interval_days: i64,
    pub last_replaced_date: NaiveDate,
}

/// Partial update of an item's mutable fields
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub interval_days: Option<i64>,
    pub last_replaced_date: Option<NaiveDate>,
}

impl ItemPatch {
    /// Patch that only records a replacement on `date`
    pub fn replaced_on(date: NaiveDate) -> Self {
        Self {
            last_replaced_date: Some(date),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.interval_days.is_none() && self.last_replaced_date.is_none()
    }
}

/// Trim and check an item name
pub(crate) fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::validation("name must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Check that an interval is a positive day count that fits the model
pub(crate) fn validate_interval(interval_days: i64) -> Result<u32> {
    if interval_days < 1 {
        return Err(TrackerError::validation(format!(
            "intervalDays must be a positive integer, got {}",
            interval_days
        )));
    }
    u32::try_from(interval_days).map_err(|_| {
        TrackerError::validation(format!(
            "intervalDays {} is too large (maximum {})",
            interval_days,
            u32::MAX
        ))
    })
}

/// Check collection-level invariants: non-empty names, positive intervals, unique ids
///
/// Reports the first violation with the index of the offending record.
pub fn validate_items(items: &[Item]) -> Result<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        if item.name.trim().is_empty() {
            return Err(TrackerError::validation(format!(
                "item {}: name must not be empty",
                index
            )));
        }
        if item.interval_days == 0 {
            return Err(TrackerError::validation(format!(
                "item {}: intervalDays must be a positive integer",
                index
            )));
        }
        if !seen.insert(item.id) {
            return Err(TrackerError::validation(format!(
                "item {}: duplicate id {}",
                index, item.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(id: u64, name: &str, interval_days: u32) -> Item {
        Item {
            id,
            name: name.to_string(),
            interval_days,
            last_replaced_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_validate_name_trims() {
        assert_eq!(validate_name("  Hard hat ").unwrap(), "Hard hat");
        assert!(matches!(
            validate_name("   "),
            Err(TrackerError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_interval_bounds() {
        assert_eq!(validate_interval(1).unwrap(), 1);
        assert!(validate_interval(0).is_err());
        assert!(validate_interval(-3).is_err());
        assert!(validate_interval(i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn test_validate_items_reports_first_violation() {
        let items = vec![item(1, "Gloves", 1), item(2, "", 30), item(1, "Mask", 0)];
        let err = validate_items(&items).unwrap_err();
        assert!(err.to_string().contains("item 1: name must not be empty"));
    }

    #[test]
    fn test_validate_items_rejects_duplicate_ids() {
        let items = vec![item(7, "Gloves", 1), item(7, "Mask", 30)];
        let err = validate_items(&items).unwrap_err();
        assert!(err.to_string().contains("duplicate id 7"));
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let json = serde_json::to_value(item(42, "Respirator", 60)).unwrap();
        assert_eq!(json["intervalDays"], 60);
        assert_eq!(json["lastReplacedDate"], "2024-01-01");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_patch_helpers() {
        assert!(ItemPatch::default().is_empty());
        let date = NaiveDate::from_ymd_opt(2024, 2, 2).unwrap();
        let patch = ItemPatch::replaced_on(date);
        assert!(!patch.is_empty());
        assert_eq!(patch.last_replaced_date, Some(date));
    }
}
