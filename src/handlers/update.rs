//! Update handlers for PPE tracker MCP server

use crate::PpeServerHandler;
use crate::ppe::ItemPatch;
use crate::validation::{self, public_error};
use mcp_attr::{Result as McpResult, bail_public};

impl PpeServerHandler {
    /// **Edit**: Change an item's name, interval or last replacement date.
    /// **Note**: Item ID cannot be changed - IDs are immutable.
    pub async fn handle_update(
        &self,
        id: String,
        name: Option<String>,
        interval_days: Option<i64>,
        last_replaced_date: Option<String>,
    ) -> McpResult<String> {
        let id = validation::parse_item_id(&id).map_err(public_error)?;

        let last_replaced_date = match last_replaced_date {
            Some(ref date_str) => Some(validation::parse_date(date_str).map_err(public_error)?),
            None => None,
        };

        let patch = ItemPatch {
            name,
            interval_days,
            last_replaced_date,
        };
        if patch.is_empty() {
            bail_public!(
                _,
                "Nothing to update: provide name, interval_days or last_replaced_date"
            );
        }

        let item = self.store().update(id, patch).map_err(public_error)?;
        Ok(format!("Item {} ({}) updated successfully", item.id, item.name))
    }

    /// **Replace**: Record that the item was replaced today.
    pub async fn handle_mark_replaced(&self, id: String) -> McpResult<String> {
        let id = validation::parse_item_id(&id).map_err(public_error)?;

        let mut store = self.store();
        let item = store.mark_replaced(id).map_err(public_error)?;
        let status = store.status_of(&item);
        drop(store);

        Ok(format!(
            "Item {} ({}) replaced on {} (status: {})",
            item.id, item.name, item.last_replaced_date, status.tier
        ))
    }
}
