use chrono::NaiveDateTime;

use crate::ppe::{Item, Tier, derive_status};

/// A notification worth showing for one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub item: Item,
    pub tier: Tier,
    pub title: String,
    pub body: String,
}

/// Decide which items need a notification and what it says
///
/// Overdue and Warning items each produce one notice, in collection order;
/// Fresh items produce nothing. Stateless: calling it twice yields the same
/// notices twice.
pub fn plan(items: &[Item], now: NaiveDateTime) -> Vec<Notice> {
    items
        .iter()
        .filter_map(|item| {
            let status = derive_status(item.interval_days, item.last_replaced_date, now);
            let (title, body) = match status.tier {
                Tier::Fresh => return None,
                Tier::Overdue => (
                    format!("PPE expired: {}", item.name),
                    format!("Replace now (last replaced: {})", item.last_replaced_date),
                ),
                Tier::Warning => (
                    format!("PPE near expiry: {}", item.name),
                    format!(
                        "{} day(s) remaining (last replaced: {})",
                        status.remaining_days, item.last_replaced_date
                    ),
                ),
            };
            Some(Notice {
                item: item.clone(),
                tier: status.tier,
                title,
                body,
            })
        })
        .collect()
}
