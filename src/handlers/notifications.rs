//! Notification handlers for PPE tracker MCP server

use crate::PpeServerHandler;
use crate::formatting;
use crate::notify::{self, PermissionState};
use mcp_attr::Result as McpResult;

impl PpeServerHandler {
    /// **Check**: Plan notices for overdue and near-expiry items and deliver them if permitted.
    pub async fn handle_check_due(&self) -> McpResult<String> {
        let (items, now) = {
            let store = self.store();
            (store.list().to_vec(), store.now())
        };

        let notices = notify::plan(&items, now);
        let outcome = notify::deliver_notices(self.notifier.as_ref(), &notices).await;
        Ok(formatting::format_notices(&notices, outcome))
    }

    /// **Permission**: Ask for permission to show desktop notifications.
    pub async fn handle_enable_notifications(&self) -> McpResult<String> {
        let current = self.notifier.query_permission();
        if current == PermissionState::Granted {
            return Ok("Notifications already allowed".to_string());
        }

        let message = match self.notifier.request_permission().await {
            PermissionState::Granted => {
                "Permission granted. Overdue and near-expiry PPE items will be notified."
            }
            _ => "Permission denied. Notices are still listed by check_due() but not delivered.",
        };
        Ok(message.to_string())
    }
}
