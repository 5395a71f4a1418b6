//! PPE domain models and lifecycle rules
//!
//! This module contains the tracked item model and the pure logic around it.
//! It is split into submodules:
//! - `item`: Item record plus the draft/patch inputs used to create and edit it
//! - `clock`: Injected "now" capability
//! - `date_math`: Whole-day elapsed time since the last replacement
//! - `status`: Remaining days and Fresh/Warning/Overdue classification
//! - `record_store`: The owned collection with persist-on-every-mutation semantics

mod clock;
mod date_math;
mod item;
mod record_store;
mod status;

// Re-export all public types
pub use clock::{Clock, FixedClock, SystemClock};
pub use date_math::{due_date, elapsed_days};
pub use item::{Item, ItemDraft, ItemPatch, validate_items};
pub use record_store::RecordStore;
pub use status::{DerivedStatus, Tier, classify, derive_status, warning_threshold};
