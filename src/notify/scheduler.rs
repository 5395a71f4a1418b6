use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::notifier::{DeliveryOutcome, Notifier, deliver_notices};
use super::planner::plan;
use crate::ppe::RecordStore;

/// Default delay between startup and the deadline scan
pub const DEFAULT_SCAN_DELAY: Duration = Duration::from_millis(2500);

/// Handle to a pending one-shot deadline scan
///
/// Dropping the handle cancels the scan if it has not fired yet.
pub struct ScanHandle {
    task: JoinHandle<()>,
}

impl ScanHandle {
    /// Cancel the scan if it has not run yet
    pub fn cancel(self) {
        self.task.abort();
    }

    /// Whether the scan ran to completion or was cancelled
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for ScanHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Run one deadline scan after `delay`: plan against the current collection
/// and hand the notices to `notifier`
///
/// Not repeating; hosts that want periodic scans schedule again.
/// Must be called from within a tokio runtime.
pub fn schedule_deadline_scan(
    store: Arc<Mutex<RecordStore>>,
    notifier: Arc<dyn Notifier>,
    delay: Duration,
) -> ScanHandle {
    let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
    debug!(delay_ms, "scheduled deadline scan");
    let task = tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        let (items, now) = {
            let store = store.lock().unwrap_or_else(PoisonError::into_inner);
            (store.list().to_vec(), store.now())
        };
        let notices = plan(&items, now);

        match deliver_notices(notifier.as_ref(), &notices).await {
            DeliveryOutcome::Delivered(count) => info!(count, "deadline scan delivered notifications"),
            DeliveryOutcome::Skipped(permission) => {
                info!(%permission, pending = notices.len(), "deadline scan skipped delivery")
            }
        }
    });
    ScanHandle { task }
}
