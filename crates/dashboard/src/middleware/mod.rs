//! HTTP middleware stack for the dashboard.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Gate (resolve navigations against the route table)

pub mod auth;
pub mod gate;
pub mod request_id;

pub use auth::{AuthRejection, CurrentIdentity, OptionalIdentity, RequireAdmin, RequireIdentity};
pub use gate::gate_middleware;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
