//! TOML configuration file
//!
//! Every table is optional; missing keys fall back to the defaults below.
//!
//! ```toml
//! export_file = "ppe_items_export.json"
//!
//! [notifications]
//! scan_delay_ms = 2500
//! command = "notify-send"
//! permission = "undetermined"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::codec::EXPORT_FILE_NAME;
use crate::notify::{DEFAULT_SCAN_DELAY, PermissionState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where `export` writes when no path is given
    pub export_file: PathBuf,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Delay between startup and the one-shot deadline scan
    pub scan_delay_ms: u64,
    /// External command used to show desktop notifications; log only when unset
    pub command: Option<String>,
    /// Initial permission for the command notifier
    pub permission: PermissionState,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_file: PathBuf::from(EXPORT_FILE_NAME),
            notifications: NotificationConfig::default(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            scan_delay_ms: u64::try_from(DEFAULT_SCAN_DELAY.as_millis()).unwrap_or(u64::MAX),
            command: None,
            permission: PermissionState::Undetermined,
        }
    }
}

impl NotificationConfig {
    pub fn scan_delay(&self) -> Duration {
        Duration::from_millis(self.scan_delay_ms)
    }
}

impl Config {
    /// Load from `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                Self::parse(&content)
                    .with_context(|| format!("Invalid config file {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
