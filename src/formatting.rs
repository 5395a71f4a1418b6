//! Formatting helper functions for PPE tracker tools
//!
//! This module contains filtering and text rendering of items, their status,
//! and planned notices.

use chrono::NaiveDateTime;

use crate::notify::{DeliveryOutcome, Notice};
use crate::ppe::{Item, Tier, derive_status, due_date};

/// Apply keyword filtering (case-insensitive search in the item name)
///
/// # Arguments
/// * `items` - Mutable vector of items to filter
/// * `keyword` - Keyword to search for
pub fn apply_keyword_filter(items: &mut Vec<Item>, keyword: &str) {
    let keyword_lower = keyword.to_lowercase();
    items.retain(|item| item.name.to_lowercase().contains(&keyword_lower));
}

/// Short remaining-time label: "OVERDUE" or "<n> day(s)"
pub fn remaining_label(remaining_days: i64) -> String {
    if remaining_days <= 0 {
        "OVERDUE".to_string()
    } else {
        format!("{} day(s)", remaining_days)
    }
}

/// Format items with their derived status into a display string
///
/// # Arguments
/// * `items` - Items to render, in display order
/// * `total` - Size of the whole collection (before filtering)
/// * `now` - Local time the status is computed for
pub fn format_items(items: &[Item], total: usize, now: NaiveDateTime) -> String {
    if items.is_empty() {
        return format!("No PPE items found (records: {})", total);
    }

    let mut result = format!("Found {} item(s) (records: {}):\n\n", items.len(), total);
    for item in items {
        let status = derive_status(item.interval_days, item.last_replaced_date, now);
        result.push_str(&format!(
            "- [{}] {} (status: {}, {})\n",
            item.id,
            item.name,
            status.tier.color().to_uppercase(),
            remaining_label(status.remaining_days)
        ));
        result.push_str(&format!("  Interval: {}d\n", item.interval_days));
        result.push_str(&format!("  Last replaced: {}\n", item.last_replaced_date));
        let due = due_date(item.last_replaced_date, item.interval_days)
            .map_or_else(|| "-".to_string(), |date| date.to_string());
        result.push_str(&format!("  Due: {}\n", due));
        result.push_str(&format!("  Created: {}\n", item.created_at.to_rfc3339()));
    }

    result
}

/// Format planned notices and what happened to them
pub fn format_notices(notices: &[Notice], outcome: DeliveryOutcome) -> String {
    if notices.is_empty() {
        return "All PPE items are fresh; nothing to notify".to_string();
    }

    let overdue = notices.iter().filter(|n| n.tier == Tier::Overdue).count();
    let mut result = format!(
        "{} item(s) need attention ({} overdue, {} near expiry):\n\n",
        notices.len(),
        overdue,
        notices.len() - overdue
    );
    for notice in notices {
        result.push_str(&format!(
            "- [{}] {}\n  {}\n",
            notice.item.id, notice.title, notice.body
        ));
    }

    match outcome {
        DeliveryOutcome::Delivered(count) => {
            result.push_str(&format!("\nDelivered {} notification(s)", count))
        }
        DeliveryOutcome::Skipped(permission) => result.push_str(&format!(
            "\nNotifications not delivered (permission: {}). Use enable_notifications() to allow them.",
            permission
        )),
    }

    result
}
