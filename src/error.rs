//! Error taxonomy for the PPE tracker core
//!
//! Validation, lookup and format failures are always reported to the immediate
//! caller. Persistence failures on load are absorbed by the record store; on
//! write they are reported so the caller knows the mutation was not committed.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    /// Malformed or out-of-range input (empty name, non-positive interval, bad import element)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Update or remove referencing an id that is not in the collection
    #[error("Item not found: item '{0}' does not exist")]
    NotFound(u64),

    /// Import payload that is not parseable as a JSON array
    #[error("Format error: {0}")]
    Format(String),

    /// The durable slot could not be read or written
    #[error("Persistence error: {context}")]
    Persistence {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl TrackerError {
    pub fn validation(message: impl Into<String>) -> Self {
        TrackerError::Validation(message.into())
    }

    pub fn format(message: impl Into<String>) -> Self {
        TrackerError::Format(message.into())
    }

    pub fn persistence(context: impl Into<String>, source: std::io::Error) -> Self {
        TrackerError::Persistence {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
