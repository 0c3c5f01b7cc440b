//! ViralCopy dashboard library.
//!
//! The dashboard is a single-user, server-rendered workspace. One process is
//! one client: the [`session::SessionStore`] holds at most one identity, and
//! every navigation passes through the [`gate::Shell`] before a screen renders.
//!
//! The library exposes [`app`] so the router can be driven in-process by the
//! integration tests and the `vc-cli` tool can reuse the route table,
//! navigation composer and session store.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod claude;
pub mod config;
pub mod error;
pub mod filters;
pub mod gate;
pub mod middleware;
pub mod navigation;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;

use axum::{Router, middleware::from_fn, middleware::from_fn_with_state, routing::get};
use tower_http::normalize_path::NormalizePath;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use state::AppState;

/// Directory served under `/static`, relative to the workspace root.
pub const STATIC_DIR: &str = "crates/dashboard/static";

/// Build the dashboard service: [`router`] behind path normalization.
///
/// Trailing slashes are trimmed and a leading `//` collapsed before routing,
/// so the gate and the router always see the same path.
pub fn app(state: AppState) -> NormalizePath<Router> {
    NormalizePath::trim_trailing_slash(router(state))
}

/// Build the dashboard router with its middleware stack.
///
/// Sentry layers are added by the binary on top of this. Serve it through
/// [`NormalizePath`] as [`app`] does; a `Router::layer` runs after routing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::gate_middleware,
        ))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Sits outside the gate.
async fn health() -> &'static str {
    "ok"
}
