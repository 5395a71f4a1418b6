//! Validation helper functions for PPE tracker tools
//!
//! This module contains parsing of tool arguments (ids and dates) and the
//! conversion of core errors into public MCP errors.

use chrono::NaiveDate;

use crate::error::{Result, TrackerError};

/// Parse an item ID argument
///
/// Surrounding whitespace is ignored. IDs are the positive integers shown by `list`.
///
/// # Examples
/// ```
/// # use ppe_tracker::validation::parse_item_id;
/// assert_eq!(parse_item_id(" 1717000000000 ").unwrap(), 1717000000000);
/// assert!(parse_item_id("gloves").is_err());
/// ```
pub fn parse_item_id(id_str: &str) -> Result<u64> {
    id_str
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            TrackerError::validation(format!(
                "Invalid item ID '{}'. Use the numeric ID shown by list()",
                id_str
            ))
        })
}

/// Parse a date argument in YYYY-MM-DD format
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|_| {
        TrackerError::validation(format!(
            "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2025-03-15')",
            date_str
        ))
    })
}

/// Convert a core error into an MCP error whose message reaches the client
pub fn public_error(err: TrackerError) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(err.to_string(), true)
}
