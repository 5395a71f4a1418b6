//! Import/export codec for the item collection
//!
//! The canonical byte format is a pretty-printed JSON array of items. The
//! same format is used by the persistence slot and by export files.
//! Decoding is all-or-nothing: either every element validates or the whole
//! payload is rejected.

mod schema;

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{Result, TrackerError};
use crate::ppe::{Item, validate_items};

/// Default file name for exports
pub const EXPORT_FILE_NAME: &str = "ppe_items_export.json";

/// MIME type of encoded collections
pub const MIME_TYPE: &str = "application/json";

/// Serialize the collection to its canonical JSON form
pub fn encode(items: &[Item]) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(items)
        .map_err(|e| TrackerError::format(format!("failed to encode items: {}", e)))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Parse and validate an encoded collection
///
/// # Errors
/// - `Format` when the bytes are not JSON or the top level is not an array
/// - `Validation` when any element is missing a field, has a bad value, or repeats an id
pub fn decode(bytes: &[u8]) -> Result<Vec<Item>> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| TrackerError::format(format!("not valid JSON: {}", e)))?;

    let elements = match value {
        Value::Array(elements) => elements,
        other => {
            return Err(TrackerError::format(format!(
                "expected a JSON array of items, found {}",
                schema::kind_of(&other)
            )));
        }
    };

    let items = elements
        .iter()
        .enumerate()
        .map(|(index, element)| schema::item_from_value(index, element))
        .collect::<Result<Vec<Item>>>()?;

    validate_items(&items)?;
    Ok(items)
}

/// Write the encoded collection to `path`
pub fn export_to_file(items: &[Item], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode(items)?;
    fs::write(path, bytes)
        .map_err(|e| TrackerError::persistence(format!("failed to export to {}", path.display()), e))
}

/// Read and decode a collection from `path`
pub fn import_from_file(path: impl AsRef<Path>) -> Result<Vec<Item>> {
    let path = path.as_ref();
    let bytes = fs::read(path)
        .map_err(|e| TrackerError::persistence(format!("failed to read {}", path.display()), e))?;
    decode(&bytes)
}
