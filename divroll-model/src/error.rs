//! Error types for the entity model.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Local, recoverable errors raised while building or encoding records.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A value cannot be represented as a property (non-finite number,
    /// non-string map key, ...).
    #[error("unsupported property value: {0}")]
    UnsupportedPropertyValue(String),

    /// The property name collides with a key the wire format reserves.
    #[error("reserved property name: {0}")]
    ReservedProperty(String),

    /// The operation needs state the record does not have yet.
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    /// A payload is missing a required field.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl ModelError {
    /// The error raised for any id-addressed operation on an unsaved record.
    pub fn unsaved() -> Self {
        ModelError::PreconditionFailed("save the entity first".to_string())
    }
}
