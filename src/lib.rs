//! PPE Tracker MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server that tracks
//! personal protective equipment (PPE). Each item has a replacement interval and
//! a last-replacement date; the server reports whether the item is fresh, near
//! its deadline, or overdue, and can raise desktop notifications.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `PpeServerHandler` - Handles MCP protocol communication
//! - **Domain Layer**: `ppe` and `notify` modules - Status rules, the record store, notification planning
//! - **Persistence Layer**: `storage` and `codec` modules - JSON slot and import/export files
//!
//! # Example
//!
//! ```no_run
//! use ppe_tracker::{Config, PpeServerHandler};
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = PpeServerHandler::open("ppe_items_v1.json", &Config::default())?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod formatting;
mod handlers;
pub mod notify;
pub mod ppe;
pub mod storage;
pub mod validation;

use anyhow::Result;
use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

// Re-export commonly used types
pub use config::Config;
pub use error::TrackerError;
pub use notify::{CommandNotifier, LogNotifier, Notifier, PermissionState};
pub use ppe::{Clock, Item, ItemDraft, ItemPatch, RecordStore, SystemClock, Tier};
pub use storage::{FileSlot, MemorySlot, Slot};

/// MCP Server handler for PPE replacement tracking
///
/// Provides an MCP interface to the record store and the notification planner.
/// All changes are persisted to the JSON slot before a tool call returns.
pub struct PpeServerHandler {
    pub(crate) store: Arc<Mutex<RecordStore>>,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) export_file: PathBuf,
}

impl PpeServerHandler {
    /// Create a handler from already constructed parts
    pub fn new(store: RecordStore, notifier: Arc<dyn Notifier>, export_file: PathBuf) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            notifier,
            export_file,
        }
    }

    /// Create a handler persisting to `data_file`, with the system clock and the
    /// notifier described by `config`
    ///
    /// # Example
    /// ```no_run
    /// # use ppe_tracker::{Config, PpeServerHandler};
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let handler = PpeServerHandler::open("ppe_items_v1.json", &Config::default())?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(data_file: impl AsRef<Path>, config: &Config) -> Result<Self> {
        let slot = FileSlot::new(data_file);
        let store = RecordStore::open(Box::new(slot), Arc::new(SystemClock));

        let notifier: Arc<dyn Notifier> = match config.notifications.command {
            Some(ref program) if !program.trim().is_empty() => {
                info!(program = %program, permission = %config.notifications.permission, "using command notifier");
                Arc::new(CommandNotifier::new(
                    program.trim(),
                    config.notifications.permission,
                ))
            }
            _ => Arc::new(LogNotifier),
        };

        Ok(Self::new(store, notifier, config.export_file.clone()))
    }

    /// Shared handle to the store, for the deadline scan
    pub fn shared_store(&self) -> Arc<Mutex<RecordStore>> {
        Arc::clone(&self.store)
    }

    /// Shared handle to the notifier, for the deadline scan
    pub fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::clone(&self.notifier)
    }

    /// Lock the store; a poisoned lock still holds a consistent collection
    /// because mutations swap it in only after persisting
    pub(crate) fn store(&self) -> MutexGuard<'_, RecordStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// PPE (personal protective equipment) replacement tracker.
///
/// Register each piece of equipment with how often it must be replaced (interval in days)
/// and when it was last replaced. Every item is classified as:
/// - **fresh** (green): comfortably inside its interval
/// - **warning** (yellow): within the last 20% of the interval (rounded up)
/// - **overdue** (red): replacement date reached or passed
///
/// Item IDs are numbers assigned on creation (shown by list).
/// Typical intervals: disposable gloves 1 day, respirators 30-90 days, helmets 365 days.
#[mcp_server]
impl McpServer for PpeServerHandler {
    /// **Register**: Start tracking a PPE item. All mutations are saved immediately.
    #[tool]
    async fn add(
        &self,
        /// Name of the item (e.g., "Nitrile gloves", "Half-face respirator")
        name: String,
        /// Replacement interval in days (positive integer)
        interval_days: i64,
        /// Last replacement date YYYY-MM-DD, defaults to today (optional)
        last_replaced_date: Option<String>,
    ) -> McpResult<String> {
        self.handle_add(name, interval_days, last_replaced_date)
            .await
    }

    /// **Review**: List items with status, remaining days and due date. Filter by name.
    #[tool]
    async fn list(
        &self,
        /// Case-insensitive name filter (optional)
        keyword: Option<String>,
    ) -> McpResult<String> {
        self.handle_list(keyword).await
    }

    /// **Edit**: Change name, interval or last replacement date of an item.
    #[tool]
    async fn update(
        &self,
        /// ID of the item to update
        id: String,
        /// New name (optional)
        name: Option<String>,
        /// New interval in days (optional)
        interval_days: Option<i64>,
        /// New last replacement date YYYY-MM-DD (optional)
        last_replaced_date: Option<String>,
    ) -> McpResult<String> {
        self.handle_update(id, name, interval_days, last_replaced_date)
            .await
    }

    /// **Replace**: Register that the item was replaced today.
    #[tool]
    async fn mark_replaced(
        &self,
        /// ID of the replaced item
        id: String,
    ) -> McpResult<String> {
        self.handle_mark_replaced(id).await
    }

    /// **Remove**: Permanently delete an item. Confirm with the user before calling.
    #[tool]
    async fn remove(
        &self,
        /// ID of the item to remove
        id: String,
    ) -> McpResult<String> {
        self.handle_remove(id).await
    }

    /// **Export**: Save all items to a JSON file (default: ppe_items_export.json).
    #[tool]
    async fn export(
        &self,
        /// Destination file path (optional)
        path: Option<String>,
    ) -> McpResult<String> {
        self.handle_export(path).await
    }

    /// **Import**: Replace ALL items with the content of a JSON export. Not a merge.
    #[tool]
    async fn import(
        &self,
        /// Path of the JSON file to import
        path: String,
    ) -> McpResult<String> {
        self.handle_import(path).await
    }

    /// **Check**: Show overdue and near-expiry items and send notifications if allowed.
    #[tool]
    async fn check_due(&self) -> McpResult<String> {
        self.handle_check_due().await
    }

    /// **Permission**: Allow desktop notifications for overdue and near-expiry items.
    #[tool]
    async fn enable_notifications(&self) -> McpResult<String> {
        self.handle_enable_notifications().await
    }
}
