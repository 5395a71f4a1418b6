//! Add handler for PPE tracker MCP server

use crate::PpeServerHandler;
use crate::ppe::ItemDraft;
use crate::validation::{self, public_error};
use mcp_attr::Result as McpResult;

impl PpeServerHandler {
    /// **Register**: Start tracking a PPE item with its replacement interval.
    /// **Default**: last_replaced_date defaults to today when omitted.
    pub async fn handle_add(
        &self,
        name: String,
        interval_days: i64,
        last_replaced_date: Option<String>,
    ) -> McpResult<String> {
        let parsed_date = match last_replaced_date {
            Some(ref date_str) => Some(validation::parse_date(date_str).map_err(public_error)?),
            None => None,
        };

        let mut store = self.store();
        let last_replaced_date = parsed_date.unwrap_or_else(|| store.now().date());
        let item = store
            .add(ItemDraft {
                name,
                interval_days,
                last_replaced_date,
            })
            .map_err(public_error)?;
        let status = store.status_of(&item);
        drop(store);

        Ok(format!(
            "PPE item created with ID: {} ({}, status: {})",
            item.id, item.name, status.tier
        ))
    }
}
