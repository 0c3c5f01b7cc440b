//! Navigation gate middleware.
//!
//! Every GET/HEAD navigation is resolved through the [`Shell`](crate::gate::Shell)
//! before any handler runs. Allowed navigations continue with the
//! [`RouteMatch`](crate::routes::table::RouteMatch) and the identity snapshot
//! in request extensions; everything else becomes a `303 See Other`.

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::gate::Resolution;
use crate::state::AppState;

use super::auth::CurrentIdentity;

/// Paths that bypass the gate entirely.
fn is_exempt(path: &str) -> bool {
    path == "/health" || path == "/static" || path.starts_with("/static/")
}

/// Resolve navigations against the route table.
pub async fn gate_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = state.session().current();
    let path = request.uri().path().to_owned();

    let is_navigation = matches!(*request.method(), Method::GET | Method::HEAD);
    if is_navigation && !is_exempt(&path) {
        match state.shell().resolve(&path, identity.as_ref()) {
            Resolution::Render(matched) => {
                request.extensions_mut().insert(matched);
            }
            Resolution::Redirect(decision) => {
                let target = decision.redirect_target().unwrap_or("/");
                return Redirect::to(target).into_response();
            }
        }
    }

    request.extensions_mut().insert(CurrentIdentity(identity));
    next.run(request).await
}
