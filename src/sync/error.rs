//! Error types for synchronization.

use crate::clients::ServiceError;
use thiserror::Error;

/// Errors returned by [`SyncClient`](super::SyncClient) operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The backend could not be reached, after every retry.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The backend answered but refused the write.
    #[error("Write rejected: {0}")]
    Rejected(String),
}
