//! Application state shared across handlers.

use std::sync::Arc;

use crate::claude::{ClaudeClient, ClaudeError, CopyGenerator};
use crate::config::{DashboardConfig, SessionBackend};
use crate::gate::Shell;
use crate::routes::table::{RouteTable, RouteTableError};
use crate::services::{AuthError, MockAuthService, MockDataService};
use crate::session::{FileStore, SessionStore};

/// Errors that prevent the application state from being built.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("route table: {0}")]
    Routes(#[from] RouteTableError),

    #[error("auth service: {0}")]
    Auth(#[from] AuthError),

    #[error("claude client: {0}")]
    Claude(#[from] ClaudeError),
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DashboardConfig,
    session: SessionStore,
    shell: Shell,
    auth: MockAuthService,
    data: MockDataService,
    generator: Option<Arc<dyn CopyGenerator>>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("session", &self.inner.session)
            .field("generator", &self.inner.generator.is_some())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Build the state from configuration.
    ///
    /// Validates the route table, hydrates the session store from the
    /// configured backend, and seeds the mock services.
    ///
    /// # Errors
    ///
    /// Returns `StateError` if the route table is invalid, the demo accounts
    /// cannot be seeded, or the Claude client cannot be built.
    pub fn new(config: DashboardConfig) -> Result<Self, StateError> {
        let session = match config.session_backend {
            SessionBackend::File => {
                SessionStore::hydrate(Arc::new(FileStore::new(&config.data_dir)))
            }
            SessionBackend::Memory => SessionStore::in_memory(),
        };

        let generator = match &config.claude {
            Some(claude) => Some(Arc::new(ClaudeClient::new(claude)?) as Arc<dyn CopyGenerator>),
            None => {
                tracing::warn!("CLAUDE_API_KEY not set, AI generation disabled");
                None
            }
        };

        Self::with_parts(config, session, generator)
    }

    /// Build the state from an explicit session store and generator.
    ///
    /// # Errors
    ///
    /// Returns `StateError` if the route table is invalid or the demo
    /// accounts cannot be seeded.
    pub fn with_parts(
        config: DashboardConfig,
        session: SessionStore,
        generator: Option<Arc<dyn CopyGenerator>>,
    ) -> Result<Self, StateError> {
        let shell = Shell::new(RouteTable::standard()?);
        let auth = MockAuthService::seeded(&config.demo_password, config.mock_latency)?;
        let data = MockDataService::seeded(config.mock_latency);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                session,
                shell,
                auth,
                data,
                generator,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    #[must_use]
    pub fn shell(&self) -> &Shell {
        &self.inner.shell
    }

    #[must_use]
    pub fn auth(&self) -> &MockAuthService {
        &self.inner.auth
    }

    #[must_use]
    pub fn data(&self) -> &MockDataService {
        &self.inner.data
    }

    /// The copy generator, or `ClaudeError::NotConfigured`.
    ///
    /// # Errors
    ///
    /// Returns `ClaudeError::NotConfigured` if no API key was provided.
    pub fn generator(&self) -> Result<&dyn CopyGenerator, ClaudeError> {
        self.inner
            .generator
            .as_deref()
            .ok_or(ClaudeError::NotConfigured)
    }
}
