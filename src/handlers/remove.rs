//! Remove handler for PPE tracker MCP server

use crate::PpeServerHandler;
use crate::validation::{self, public_error};
use mcp_attr::Result as McpResult;

impl PpeServerHandler {
    /// **Remove**: Permanently delete an item. The client confirms with the user beforehand.
    pub async fn handle_remove(&self, id: String) -> McpResult<String> {
        let id = validation::parse_item_id(&id).map_err(public_error)?;
        let removed = self.store().remove(id).map_err(public_error)?;
        Ok(format!("Item {} ({}) removed", removed.id, removed.name))
    }
}
