use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::clock::Clock;
use super::item::{Item, ItemDraft, ItemPatch, validate_interval, validate_items, validate_name};
use super::status::{DerivedStatus, derive_status};
use crate::codec;
use crate::error::{Result, TrackerError};
use crate::storage::Slot;

/// The owned collection of tracked items
///
/// Items are kept in a `Vec` in insertion order; new items are prepended.
/// Every mutation persists the full collection to the slot before it
/// returns. The candidate collection is written first and swapped into
/// memory only after the write succeeded, so a persistence error leaves the
/// store exactly as it was.
///
/// The store assumes a single writer; hosts that share it across threads
/// wrap it in a mutex.
pub struct RecordStore {
    items: Vec<Item>,
    slot: Box<dyn Slot>,
    clock: Arc<dyn Clock>,
}

impl RecordStore {
    /// Load the collection from `slot`
    ///
    /// An absent, unreadable or malformed slot yields an empty collection;
    /// startup is never blocked by bad persisted state.
    pub fn open(slot: Box<dyn Slot>, clock: Arc<dyn Clock>) -> Self {
        let items = match slot.read() {
            Ok(None) => {
                debug!(slot = %slot.describe(), "no persisted items, starting empty");
                Vec::new()
            }
            Ok(Some(bytes)) => match codec::decode(&bytes) {
                Ok(items) => {
                    info!(slot = %slot.describe(), count = items.len(), "loaded items");
                    items
                }
                Err(e) => {
                    warn!(slot = %slot.describe(), error = %e, "persisted items are malformed, starting empty");
                    if let Err(backup_err) = slot.preserve_unreadable(&bytes) {
                        warn!(error = %backup_err, "could not preserve malformed slot content");
                    }
                    Vec::new()
                }
            },
            Err(e) => {
                warn!(slot = %slot.describe(), error = %e, "could not read persisted items, starting empty");
                Vec::new()
            }
        };

        Self { items, slot, clock }
    }

    /// Validate a draft, assign id and creation stamp, and prepend it
    pub fn add(&mut self, draft: ItemDraft) -> Result<Item> {
        let name = validate_name(&draft.name)?;
        let interval_days = validate_interval(draft.interval_days)?;

        let item = Item {
            id: self.next_id()?,
            name,
            interval_days,
            last_replaced_date: draft.last_replaced_date,
            created_at: self.clock.now(),
        };

        let mut candidate = Vec::with_capacity(self.items.len() + 1);
        candidate.push(item.clone());
        candidate.extend(self.items.iter().cloned());
        self.commit(candidate)?;

        info!(id = item.id, name = %item.name, interval_days = item.interval_days, "added item");
        Ok(item)
    }

    /// Replace the mutable fields of the item with `id`
    pub fn update(&mut self, id: u64, patch: ItemPatch) -> Result<Item> {
        let position = self.position(id)?;

        let mut updated = self.items[position].clone();
        if let Some(name) = patch.name {
            updated.name = validate_name(&name)?;
        }
        if let Some(interval_days) = patch.interval_days {
            updated.interval_days = validate_interval(interval_days)?;
        }
        if let Some(date) = patch.last_replaced_date {
            updated.last_replaced_date = date;
        }

        let mut candidate = self.items.clone();
        candidate[position] = updated.clone();
        self.commit(candidate)?;

        info!(id, "updated item");
        Ok(updated)
    }

    /// Record that the item was replaced today (per the injected clock)
    pub fn mark_replaced(&mut self, id: u64) -> Result<Item> {
        let today = self.clock.today();
        self.update(id, ItemPatch::replaced_on(today))
    }

    /// Delete the item with `id` and return it
    ///
    /// No confirmation happens here; callers ask the user first.
    pub fn remove(&mut self, id: u64) -> Result<Item> {
        let position = self.position(id)?;

        let mut candidate = self.items.clone();
        let removed = candidate.remove(position);
        self.commit(candidate)?;

        info!(id, name = %removed.name, "removed item");
        Ok(removed)
    }

    /// Overwrite the whole collection (used by import)
    pub fn replace_all(&mut self, items: Vec<Item>) -> Result<()> {
        validate_items(&items)?;
        let count = items.len();
        self.commit(items)?;
        info!(count, "replaced all items");
        Ok(())
    }

    /// Read-only view in collection order
    pub fn list(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: u64) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current local wall-clock time from the injected clock
    pub fn now(&self) -> NaiveDateTime {
        self.clock.local_now()
    }

    /// Status of `item` as of the injected clock's now
    pub fn status_of(&self, item: &Item) -> DerivedStatus {
        derive_status(item.interval_days, item.last_replaced_date, self.now())
    }

    /// Where this store persists to
    pub fn describe_slot(&self) -> String {
        self.slot.describe()
    }

    fn position(&self, id: u64) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or(TrackerError::NotFound(id))
    }

    /// Epoch milliseconds, bumped past the largest id in use
    fn next_id(&self) -> Result<u64> {
        let millis = u64::try_from(self.clock.now().timestamp_millis())
            .unwrap_or(0)
            .max(1);
        let floor = match self.items.iter().map(|item| item.id).max() {
            Some(max_id) => max_id.checked_add(1).ok_or_else(|| {
                TrackerError::validation("no item id left above the largest one in use")
            })?,
            None => 1,
        };
        Ok(millis.max(floor))
    }

    fn commit(&mut self, candidate: Vec<Item>) -> Result<()> {
        let bytes = codec::encode(&candidate)?;
        self.slot.write(&bytes)?;
        debug!(slot = %self.slot.describe(), count = candidate.len(), "persisted items");
        self.items = candidate;
        Ok(())
    }
}
