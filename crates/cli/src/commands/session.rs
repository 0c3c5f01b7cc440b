//! Persisted session commands.
//!
//! # Usage
//!
//! ```bash
//! # Show who is signed in
//! vc-cli session show
//!
//! # Sign the dashboard out (takes effect on the next start)
//! vc-cli session clear --data-dir /var/lib/viralcopy
//! ```
//!
//! # Environment Variables
//!
//! - `DASHBOARD_DATA_DIR` - Session directory when `--data-dir` is not given

use std::path::{Path, PathBuf};

use thiserror::Error;

use viralcopy_core::Identity;
use viralcopy_dashboard::session::{
    DurableStore, FileStore, PersistenceError, SESSION_KEY, SIGNED_OUT, decode_entry,
};

const DEFAULT_DATA_DIR: &str = ".viralcopy";

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the session file failed.
    #[error("session storage error: {0}")]
    Storage(#[from] PersistenceError),

    /// The stored entry is not a valid identity.
    #[error("stored session is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Resolve the session directory from the flag, the environment, or the default.
#[must_use]
pub fn data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os("DASHBOARD_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// Read the persisted identity without modifying storage.
///
/// # Errors
///
/// Returns `SessionError::Storage` if the file cannot be read, or
/// `SessionError::Corrupt` if it does not hold an identity.
pub fn show(data_dir: &Path) -> Result<Option<Identity>, SessionError> {
    let store = FileStore::new(data_dir);
    let Some(raw) = store.load(SESSION_KEY)? else {
        tracing::info!(data_dir = %data_dir.display(), "No session stored");
        return Ok(None);
    };

    let Some(identity) = decode_entry(&raw)? else {
        tracing::info!(data_dir = %data_dir.display(), "Session marked signed out");
        return Ok(None);
    };
    tracing::info!(
        user_id = %identity.id,
        email = %identity.email,
        name = %identity.name,
        role = %identity.role,
        "Session stored"
    );
    Ok(Some(identity))
}

/// Remove the persisted identity. Returns whether one was stored.
///
/// # Errors
///
/// Returns `SessionError::Storage` if the file cannot be read or removed.
pub fn clear(data_dir: &Path) -> Result<bool, SessionError> {
    let store = FileStore::new(data_dir);
    let existed = store.load(SESSION_KEY)?.is_some_and(|raw| raw != SIGNED_OUT);
    store.remove(SESSION_KEY)?;

    if existed {
        tracing::info!(data_dir = %data_dir.display(), "Session cleared");
    } else {
        tracing::info!(data_dir = %data_dir.display(), "No session to clear");
    }
    Ok(existed)
}
