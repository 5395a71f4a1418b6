use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::process::Stdio;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::planner::Notice;

/// Whether the user allows desktop notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    Granted,
    Denied,
    #[default]
    Undetermined,
}

impl FromStr for PermissionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "granted" => Ok(PermissionState::Granted),
            "denied" => Ok(PermissionState::Denied),
            "undetermined" => Ok(PermissionState::Undetermined),
            _ => Err(format!(
                "Invalid permission '{}'. Valid options are: granted, denied, undetermined",
                s
            )),
        }
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PermissionState::Granted => "granted",
            PermissionState::Denied => "denied",
            PermissionState::Undetermined => "undetermined",
        };
        f.write_str(label)
    }
}

/// Capability that shows notifications to the user
///
/// Delivery never fails from the caller's point of view; problems are logged.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Current permission, without prompting
    fn query_permission(&self) -> PermissionState;

    /// Ask the user for permission; resolves to granted or denied
    async fn request_permission(&self) -> PermissionState;

    /// Show one notification
    async fn deliver(&self, title: &str, body: &str);
}

/// Result of handing planned notices to a notifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Permission was granted and this many notices were delivered
    Delivered(usize),
    /// Delivery was skipped because permission is not granted
    Skipped(PermissionState),
}

/// Deliver `notices` if, and only if, permission is currently granted
pub async fn deliver_notices(notifier: &dyn Notifier, notices: &[Notice]) -> DeliveryOutcome {
    let permission = notifier.query_permission();
    if permission != PermissionState::Granted {
        debug!(%permission, pending = notices.len(), "notification permission not granted, skipping delivery");
        return DeliveryOutcome::Skipped(permission);
    }

    for notice in notices {
        notifier.deliver(&notice.title, &notice.body).await;
    }
    DeliveryOutcome::Delivered(notices.len())
}

/// Notifier that writes notifications to the log
///
/// Used when no desktop notification command is configured; always permitted.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn query_permission(&self) -> PermissionState {
        PermissionState::Granted
    }

    async fn request_permission(&self) -> PermissionState {
        PermissionState::Granted
    }

    async fn deliver(&self, title: &str, body: &str) {
        info!(title, body, "notification");
    }
}

/// Notifier that runs an external command, e.g. `notify-send <title> <body>`
pub struct CommandNotifier {
    program: String,
    permission: Mutex<PermissionState>,
}

impl CommandNotifier {
    pub fn new(program: impl Into<String>, permission: PermissionState) -> Self {
        Self {
            program: program.into(),
            permission: Mutex::new(permission),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn set_permission(&self, state: PermissionState) {
        *self.permission.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

#[async_trait]
impl Notifier for CommandNotifier {
    fn query_permission(&self) -> PermissionState {
        *self.permission.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A denial is final. Otherwise the grant succeeds when the command can be spawned.
    async fn request_permission(&self) -> PermissionState {
        let current = self.query_permission();
        if current != PermissionState::Undetermined {
            return current;
        }

        let probe = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        let granted = match probe {
            Ok(_) => PermissionState::Granted,
            Err(e) => {
                warn!(program = %self.program, error = %e, "notification command unavailable");
                PermissionState::Denied
            }
        };
        self.set_permission(granted);
        granted
    }

    async fn deliver(&self, title: &str, body: &str) {
        let result = Command::new(&self.program)
            .arg(title)
            .arg(body)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match result {
            Ok(status) if status.success() => info!(title, "delivered notification"),
            Ok(status) => warn!(program = %self.program, %status, "notification command failed"),
            Err(e) => warn!(program = %self.program, error = %e, "could not run notification command"),
        }
    }
}
