//! Import/export handlers for PPE tracker MCP server

use std::path::PathBuf;

use crate::PpeServerHandler;
use crate::codec;
use crate::validation::public_error;
use mcp_attr::Result as McpResult;

impl PpeServerHandler {
    /// **Export**: Write all items as a JSON array (application/json).
    pub async fn handle_export(&self, path: Option<String>) -> McpResult<String> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| self.export_file.clone());

        let items = self.store().list().to_vec();
        codec::export_to_file(&items, &path).map_err(public_error)?;

        Ok(format!(
            "Exported {} item(s) to {}",
            items.len(),
            path.display()
        ))
    }

    /// **Import**: Replace all items with the content of a JSON export.
    /// **Note**: Full overwrite, not a merge. A file that fails validation changes nothing.
    pub async fn handle_import(&self, path: String) -> McpResult<String> {
        let items = codec::import_from_file(&path).map_err(public_error)?;
        let count = items.len();
        self.store().replace_all(items).map_err(public_error)?;
        Ok(format!("Imported {} item(s) from {}", count, path))
    }
}
