//! Session store: the single source of truth for who is logged in.
//!
//! The dashboard is a single-user client, so there is exactly one session per
//! running process: either one current [`Identity`] or none. The store keeps
//! an in-memory copy and mirrors it to a [`DurableStore`] so the session
//! survives restarts.
//!
//! # Ordering
//!
//! Mutations publish through a `tokio::sync::watch` channel with
//! `send_replace`, which completes synchronously. Anything that reads the
//! store (the gate middleware, navigation, subscribers) therefore observes a
//! login or logout before the next request is evaluated.
//!
//! # Failure model
//!
//! Durable I/O failures are reported, never fatal. The in-memory copy stays
//! authoritative for the rest of the process and [`SessionStore::is_durable`]
//! turns `false`.
//!
//! A failed write must not leave an older identity behind to be restored on
//! the next start. When a save fails the stale entry is removed, and when a
//! remove fails the [`SIGNED_OUT`] marker is written over it instead. Both are
//! best effort.

mod durable;
mod error;

pub use durable::{DurableStore, FileStore, MemoryStore};
pub use error::PersistenceError;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use viralcopy_core::Identity;

/// Key under which the current identity is stored.
pub const SESSION_KEY: &str = "viralcopy_session";

/// Entry value meaning "no one is signed in".
pub const SIGNED_OUT: &str = "null";

/// Decode a stored session entry. [`SIGNED_OUT`] decodes to `None`.
///
/// # Errors
///
/// Returns the JSON error if `raw` is neither an identity nor the marker.
pub fn decode_entry(raw: &str) -> Result<Option<Identity>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Outcome of a session mutation with respect to durable storage.
#[must_use]
#[derive(Debug)]
pub enum Persistence {
    /// The change reached durable storage.
    Durable,
    /// The change is in memory only and will not survive a restart.
    MemoryOnly(PersistenceError),
}

impl Persistence {
    /// Returns `true` if the change was persisted.
    #[must_use]
    pub const fn is_durable(&self) -> bool {
        matches!(self, Self::Durable)
    }
}

/// Process-wide holder of the current identity.
pub struct SessionStore {
    durable: Arc<dyn DurableStore>,
    current: watch::Sender<Option<Identity>>,
    durable_ok: AtomicBool,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("current", &*self.current.borrow())
            .field("durable_ok", &self.durable_ok.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Build the store and hydrate it from durable storage.
    ///
    /// Durable storage is queried exactly once here. A missing entry means no
    /// session. An unreadable or corrupt entry also means no session; the
    /// corrupt entry is removed so it is not retried on every start.
    #[must_use]
    pub fn hydrate(durable: Arc<dyn DurableStore>) -> Self {
        let mut durable_ok = true;

        let initial = match durable.load(SESSION_KEY) {
            Ok(None) => None,
            Ok(Some(raw)) => match decode_entry(&raw) {
                Ok(None) => None,
                Ok(Some(identity)) => {
                    tracing::info!(user_id = %identity.id, role = %identity.role, "Session restored");
                    Some(identity)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding corrupt session entry");
                    if let Err(e) = durable.remove(SESSION_KEY) {
                        tracing::warn!(error = %e, "Failed to remove corrupt session entry");
                        durable_ok = false;
                    }
                    None
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Durable session storage unavailable, continuing in memory");
                durable_ok = false;
                None
            }
        };

        let (current, _) = watch::channel(initial);
        Self {
            durable,
            current,
            durable_ok: AtomicBool::new(durable_ok),
        }
    }

    /// Build a store backed by process memory only.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::hydrate(Arc::new(MemoryStore::new()))
    }

    /// The current identity, if any. Reads the in-memory copy only.
    #[must_use]
    pub fn current(&self) -> Option<Identity> {
        self.current.borrow().clone()
    }

    /// Make `identity` the current identity.
    ///
    /// Durable storage is written first; the in-memory copy and subscribers
    /// are updated regardless of whether that write succeeded. If it failed,
    /// the previous durable entry is removed.
    pub fn set_current(&self, identity: Identity) -> Persistence {
        let saved = serde_json::to_string(&identity)
            .map_err(PersistenceError::from)
            .and_then(|raw| self.durable.save(SESSION_KEY, &raw));
        if saved.is_err() {
            let _ = self.durable.remove(SESSION_KEY).inspect_err(|e| {
                tracing::warn!(error = %e, "Failed to drop previous session entry");
            });
        }
        let persistence = self.persist(saved);

        tracing::info!(
            user_id = %identity.id,
            role = %identity.role,
            durable = persistence.is_durable(),
            "Session set"
        );
        self.current.send_replace(Some(identity));
        persistence
    }

    /// End the session. Equivalent to setting no identity.
    ///
    /// If the durable entry cannot be removed, [`SIGNED_OUT`] is written over
    /// it so the next start still restores no one.
    pub fn clear(&self) -> Persistence {
        let removed = self.durable.remove(SESSION_KEY);
        if removed.is_err() {
            let _ = self.durable.save(SESSION_KEY, SIGNED_OUT).inspect_err(|e| {
                tracing::warn!(error = %e, "Failed to mark session as signed out");
            });
        }
        let persistence = self.persist(removed);
        let previous = self.current.send_replace(None);

        if let Some(previous) = previous {
            tracing::info!(
                user_id = %previous.id,
                durable = persistence.is_durable(),
                "Session cleared"
            );
        }
        persistence
    }

    /// Observe identity changes.
    ///
    /// The receiver always sees the latest value on `borrow()`; `changed()`
    /// resolves after each mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.current.subscribe()
    }

    /// Returns `false` once any durable read or write has failed in this process.
    #[must_use]
    pub fn is_durable(&self) -> bool {
        self.durable_ok.load(Ordering::Relaxed)
    }

    fn persist(&self, result: Result<(), PersistenceError>) -> Persistence {
        match result {
            Ok(()) => Persistence::Durable,
            Err(e) => {
                tracing::warn!(error = %e, "Session not persisted, it will not survive a restart");
                self.durable_ok.store(false, Ordering::Relaxed);
                Persistence::MemoryOnly(e)
            }
        }
    }
}
