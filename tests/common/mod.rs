//! Common test utilities for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use ppe_tracker::notify::{Notifier, PermissionState};
use ppe_tracker::ppe::FixedClock;
use ppe_tracker::{ItemDraft, MemorySlot, PpeServerHandler, RecordStore};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Notifier that records deliveries instead of showing them
pub struct RecordingNotifier {
    permission: Mutex<PermissionState>,
    grant_on_request: bool,
    delivered: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn new(permission: PermissionState) -> Self {
        Self {
            permission: Mutex::new(permission),
            grant_on_request: true,
            delivered: Mutex::new(Vec::new()),
        }
    }

    /// Notifier whose permission prompt is always declined
    pub fn declining() -> Self {
        Self {
            grant_on_request: false,
            ..Self::new(PermissionState::Undetermined)
        }
    }

    pub fn delivered(&self) -> Vec<(String, String)> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn query_permission(&self) -> PermissionState {
        *self.permission.lock().unwrap()
    }

    async fn request_permission(&self) -> PermissionState {
        let mut permission = self.permission.lock().unwrap();
        if *permission == PermissionState::Undetermined {
            *permission = if self.grant_on_request {
                PermissionState::Granted
            } else {
                PermissionState::Denied
            };
        }
        *permission
    }

    async fn deliver(&self, title: &str, body: &str) {
        self.delivered
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 2024-04-25 10:00 local, the "now" used throughout the integration tests
pub fn test_now() -> NaiveDateTime {
    date(2024, 4, 25).and_hms_opt(10, 0, 0).unwrap()
}

pub fn test_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(test_now()))
}

/// Store over a fresh in-memory slot; the slot handle is returned for inspection
pub fn test_store() -> (RecordStore, MemorySlot) {
    let slot = MemorySlot::new();
    let store = RecordStore::open(Box::new(slot.clone()), test_clock());
    (store, slot)
}

pub fn draft(name: &str, interval_days: i64, last_replaced_date: NaiveDate) -> ItemDraft {
    ItemDraft {
        name: name.to_string(),
        interval_days,
        last_replaced_date,
    }
}

/// Create a test handler with in-memory storage and a recording notifier
pub fn get_test_handler(
    permission: PermissionState,
) -> (PpeServerHandler, MemorySlot, Arc<RecordingNotifier>) {
    let (store, slot) = test_store();
    let notifier = Arc::new(RecordingNotifier::new(permission));
    let handler = PpeServerHandler::new(
        store,
        notifier.clone(),
        PathBuf::from("ppe_items_export.json"),
    );
    (handler, slot, notifier)
}

/// Extract item ID from add() response message
/// Response format: "PPE item created with ID: <id> (<name>, status: <tier>)"
pub fn extract_id_from_response(response: &str) -> String {
    if let Some(start) = response.find("ID: ") {
        let id_part = &response[start + 4..];
        if let Some(end) = id_part.find(" (") {
            return id_part[..end].trim().to_string();
        }
    }
    response.split_whitespace().last().unwrap_or("").to_string()
}
