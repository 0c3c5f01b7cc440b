//! Durable store error types.

use thiserror::Error;

/// Errors raised by a [`DurableStore`](super::DurableStore).
///
/// None of these are fatal to the dashboard: the session store falls back to
/// its in-memory copy and the session simply won't survive a restart.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Underlying I/O failed (disk full, permissions, storage disabled).
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored value could not be encoded or decoded.
    #[error("corrupt session entry: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The key is not usable as a storage name.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}
