//! Integration tests for the ViralCopy dashboard.
//!
//! Tests drive the full router in-process with `tower::ServiceExt::oneshot`,
//! so no server, network or disk is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p viralcopy-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `gate` - Navigation outcomes per identity
//! - `auth_flow` - Login, registration and logout
//! - `navigation` - Composed sidebar in rendered pages
//! - `workspace` - Copy generation, projects, reports and settings

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

use viralcopy_core::Identity;
use viralcopy_dashboard::claude::{ClaudeError, CopyGenerator};
use viralcopy_dashboard::config::{DEFAULT_DEMO_PASSWORD, DashboardConfig};
use viralcopy_dashboard::services::auth::{DEMO_ADMIN_EMAIL, DEMO_USER_EMAIL};
use viralcopy_dashboard::session::SessionStore;
use viralcopy_dashboard::state::AppState;

/// Maximum response body read by [`body_text`].
const BODY_LIMIT: usize = 1024 * 1024;

/// Generator that echoes its input instead of calling an API.
#[derive(Debug, Default)]
pub struct CannedGenerator {
    calls: AtomicUsize,
}

impl CannedGenerator {
    /// Number of generations requested so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CopyGenerator for CannedGenerator {
    async fn generate_copy(&self, tool: &str, input: &str) -> Result<String, ClaudeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("Generated by {tool}: {}", input.trim()))
    }
}

/// Demo account to sign in as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    Admin,
    User,
}

impl Demo {
    #[must_use]
    pub const fn email(self) -> &'static str {
        match self {
            Self::Admin => DEMO_ADMIN_EMAIL,
            Self::User => DEMO_USER_EMAIL,
        }
    }
}

/// One dashboard instance with an in-memory session.
pub struct TestContext {
    pub state: AppState,
    pub generator: Arc<CannedGenerator>,
    app: NormalizePath<Router>,
}

impl TestContext {
    /// Build a dashboard with no one signed in.
    ///
    /// # Panics
    ///
    /// Panics if the application state cannot be built.
    #[must_use]
    pub fn new() -> Self {
        Self::with_session(SessionStore::in_memory())
    }

    /// Build a dashboard around an existing session store.
    ///
    /// # Panics
    ///
    /// Panics if the application state cannot be built.
    #[must_use]
    pub fn with_session(session: SessionStore) -> Self {
        let generator = Arc::new(CannedGenerator::default());
        let state = AppState::with_parts(
            DashboardConfig::local(),
            session,
            Some(generator.clone() as Arc<dyn CopyGenerator>),
        )
        .expect("Failed to build application state");

        Self {
            app: viralcopy_dashboard::app(state.clone()),
            state,
            generator,
        }
    }

    /// Build a dashboard with `demo` already signed in.
    ///
    /// # Panics
    ///
    /// Panics if the demo account cannot sign in.
    pub async fn signed_in(demo: Demo) -> Self {
        let ctx = Self::new();
        ctx.sign_in(demo).await;
        ctx
    }

    /// Sign `demo` in directly through the auth service and session store.
    ///
    /// # Panics
    ///
    /// Panics if the demo account cannot sign in.
    pub async fn sign_in(&self, demo: Demo) -> Identity {
        let identity = self
            .state
            .auth()
            .sign_in(demo.email(), DEFAULT_DEMO_PASSWORD)
            .await
            .expect("Demo sign-in failed");
        let _ = self.state.session().set_current(identity.clone());
        identity
    }

    /// The identity currently in the session store.
    #[must_use]
    pub fn current(&self) -> Option<Identity> {
        self.state.session().current()
    }

    /// Send a GET request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn get(&self, path: &str) -> Response {
        let request = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Send a form POST.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(encode_form(fields)))
            .expect("Failed to build request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// URL-encode form fields.
#[must_use]
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// The `Location` of a `303 See Other`, or `None` for any other response.
#[must_use]
pub fn redirect_target(response: &Response) -> Option<&str> {
    if response.status() != StatusCode::SEE_OTHER {
        return None;
    }
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// Read a response body as text.
///
/// # Panics
///
/// Panics if the body cannot be read or is not UTF-8.
pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), BODY_LIMIT)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}
