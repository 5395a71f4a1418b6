use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::date_math::elapsed_days;

/// Three-way replacement status of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Comfortably inside the replacement interval
    Fresh,
    /// Inside the last 20% of the interval (rounded up)
    Warning,
    /// Replacement date reached or passed
    Overdue,
}

impl Tier {
    /// Traffic-light color shown next to the item
    pub fn color(self) -> &'static str {
        match self {
            Tier::Fresh => "green",
            Tier::Warning => "yellow",
            Tier::Overdue => "red",
        }
    }

    /// Whether this tier warrants a notification
    pub fn needs_attention(self) -> bool {
        !matches!(self, Tier::Fresh)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::Fresh => "fresh",
            Tier::Warning => "warning",
            Tier::Overdue => "overdue",
        };
        f.write_str(label)
    }
}

/// Status computed on demand from an item; never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedStatus {
    pub elapsed_days: i64,
    pub remaining_days: i64,
    pub tier: Tier,
}

/// Number of remaining days at or below which an item is in the Warning tier
///
/// Equal to `ceil(interval_days * 0.2)`, computed in integers.
pub fn warning_threshold(interval_days: u32) -> i64 {
    (i64::from(interval_days) + 4) / 5
}

/// Classify an item given its interval and the whole days since its last replacement
pub fn classify(interval_days: u32, elapsed_days: i64) -> DerivedStatus {
    let remaining_days = i64::from(interval_days) - elapsed_days;
    let tier = if remaining_days <= 0 {
        Tier::Overdue
    } else if remaining_days <= warning_threshold(interval_days) {
        Tier::Warning
    } else {
        Tier::Fresh
    };

    DerivedStatus {
        elapsed_days,
        remaining_days,
        tier,
    }
}

/// DateMath and classification in one step
pub fn derive_status(
    interval_days: u32,
    last_replaced: NaiveDate,
    now: NaiveDateTime,
) -> DerivedStatus {
    classify(interval_days, elapsed_days(last_replaced, now))
}
