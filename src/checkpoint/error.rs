//! Checkpoint error types.

use crate::core::Rejection;
use thiserror::Error;

/// Errors that can occur during checkpoint operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("JSON checkpoint could not be encoded or decoded: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary checkpoint could not be encoded or decoded: {0}")]
    Binary(#[from] bincode::Error),

    /// Written by a format version this build does not read
    #[error("unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Saved history does not agree with the saved state
    #[error("checkpoint validation failed: {0}")]
    ValidationFailed(String),

    /// A recorded transition is not an edge of the table resuming the session
    #[error("checkpoint history does not fit the resuming table")]
    TableMismatch(#[source] Rejection),
}
