//! Error types for client operations.

use divroll_model::ModelError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by client operations.
///
/// Remote failures map from the response status; local failures are raised
/// before any request is sent.
#[derive(Debug, Error)]
pub enum ClientError {
    /// 400: malformed body or an ACL naming an invalid principal.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// 401: credentials missing, invalid, or not granted by the record's ACL.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// 404: unknown id or store.
    #[error("not found: {0}")]
    NotFound(String),

    /// 5xx from the server.
    #[error("server fault ({status}): {message}")]
    ServerFault { status: u16, message: String },

    /// Any other non-success status.
    #[error("unexpected status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    /// Local model failure (unsupported value, unsaved record, ...).
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The request never produced a response.
    #[error("transport failure: {0}")]
    Transport(String),

    /// A success response lacked the expected envelope.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Maps a non-success status and its body text to an error.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 => ClientError::MalformedRequest(message),
            401 => ClientError::Unauthorized(message),
            404 => ClientError::NotFound(message),
            500.. => ClientError::ServerFault { status, message },
            _ => ClientError::UnexpectedStatus { status, message },
        }
    }

    /// Returns the HTTP status behind a remote error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::MalformedRequest(_) => Some(400),
            ClientError::Unauthorized(_) => Some(401),
            ClientError::NotFound(_) => Some(404),
            ClientError::ServerFault { status, .. }
            | ClientError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for failures a caller may reasonably retry. The client itself
    /// never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClientError::ServerFault { .. } | ClientError::Transport(_)
        )
    }

    /// True if the operation was refused locally because the record has no id.
    pub fn is_precondition_failed(&self) -> bool {
        matches!(self, ClientError::Model(ModelError::PreconditionFailed(_)))
    }
}
