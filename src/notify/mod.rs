//! Deadline notifications
//!
//! - `planner`: pure decision of which items need a notice and its text
//! - `notifier`: the delivery capability and permission gating
//! - `scheduler`: the cancellable one-shot scan run after startup

mod notifier;
mod planner;
mod scheduler;

pub use notifier::{
    CommandNotifier, DeliveryOutcome, LogNotifier, Notifier, PermissionState, deliver_notices,
};
pub use planner::{Notice, plan};
pub use scheduler::{DEFAULT_SCAN_DELAY, ScanHandle, schedule_deadline_scan};
