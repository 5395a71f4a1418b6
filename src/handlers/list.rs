//! List handler for PPE tracker MCP server

use crate::PpeServerHandler;
use crate::formatting;
use mcp_attr::Result as McpResult;

impl PpeServerHandler {
    /// Handles list/filter operations - applies the name filter and formats results with status.
    pub async fn handle_list(&self, keyword: Option<String>) -> McpResult<String> {
        let store = self.store();
        let mut items = store.list().to_vec();
        let total = store.len();
        let now = store.now();
        drop(store);

        if let Some(ref keyword_filter) = keyword {
            formatting::apply_keyword_filter(&mut items, keyword_filter);
        }

        Ok(formatting::format_items(&items, total, now))
    }
}
