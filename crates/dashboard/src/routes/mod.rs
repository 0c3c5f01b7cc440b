//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check (outside the gate)
//!
//! # Auth (guest only)
//! GET  /login                  - Login page
//! POST /login                  - Sign in
//! GET  /register               - Registration page
//! POST /register               - Create account
//! POST /logout                 - Sign out
//!
//! # Workspace (authenticated)
//! GET  /                       - Overview
//! GET  /magicbox               - Magic Box (?template=<id> pre-fills)
//! POST /magicbox               - Generate copy
//! GET  /tools                  - Tool library (?category=)
//! GET  /tools/{id}             - Tool workspace
//! POST /tools/{id}             - Generate copy with a tool
//! GET  /templates              - Strategy templates (?category=&q=)
//! GET  /projects               - Project list (?q=)
//! POST /projects               - Create project
//! GET  /projects/{id}          - Project detail
//! POST /projects/{id}          - Update project
//! POST /projects/{id}/duplicate - Duplicate project
//! POST /projects/{id}/delete   - Delete project
//! GET  /settings               - Profile settings
//! POST /settings               - Update profile
//! GET  /clients                - Client list (?q=)
//! GET  /reports                - Analytics reports
//! GET  /reports/export.csv     - Performance table as CSV
//!
//! # Admin only
//! GET  /admin                  - Platform administration
//! ```
//!
//! Which identity may reach each GET path is decided by [`table::RouteTable`]
//! in the gate middleware, not by the handlers below.

pub mod admin;
pub mod auth;
pub mod clients;
pub mod magicbox;
pub mod overview;
pub mod projects;
pub mod reports;
pub mod settings;
pub mod table;
pub mod templates;
pub mod tools;

use axum::Router;
use serde::Deserialize;

use viralcopy_core::Identity;

use crate::navigation::{self, NavEntry, Navigation};
use crate::state::AppState;

/// Signed-in user as shown in the layout header.
#[derive(Debug, Clone)]
pub struct UserView {
    pub name: String,
    pub first_name: String,
    pub email: String,
    pub initials: String,
    pub role: &'static str,
    pub avatar_src: Option<String>,
}

impl From<&Identity> for UserView {
    fn from(identity: &Identity) -> Self {
        Self {
            name: identity.name.clone(),
            first_name: identity.first_name().to_string(),
            email: identity.email.to_string(),
            initials: identity.initials(),
            role: identity.role.label(),
            avatar_src: identity.avatar_ref.as_ref().map(|a| a.src().to_string()),
        }
    }
}

/// Everything the authenticated layout needs: the header user, the composed
/// sidebar, and the path used to highlight the active entry.
#[derive(Debug, Clone)]
pub struct Layout {
    pub user: UserView,
    pub navigation: Navigation,
    pub current_path: String,
}

impl Layout {
    #[must_use]
    pub fn new(identity: &Identity, current_path: &str) -> Self {
        Self {
            user: UserView::from(identity),
            navigation: navigation::compose(Some(identity)),
            current_path: current_path.to_string(),
        }
    }

    #[must_use]
    pub fn is_active(&self, entry: &NavEntry) -> bool {
        Navigation::is_active(entry, &self.current_path)
    }
}

/// `?q=` search parameter shared by list screens.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

impl SearchParams {
    /// The trimmed search term, or `None` if blank.
    #[must_use]
    pub fn term(&self) -> Option<&str> {
        Some(self.q.trim()).filter(|q| !q.is_empty())
    }
}

/// Map an optional form field to `None` when it was not submitted.
///
/// Browsers send blank inputs as empty strings; those are kept so the caller
/// can clear a field.
pub(crate) fn submitted(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// Build the screen router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(overview::router())
        .merge(magicbox::router())
        .merge(tools::router())
        .merge(templates::router())
        .merge(projects::router())
        .merge(clients::router())
        .merge(reports::router())
        .merge(settings::router())
        .merge(admin::router())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use viralcopy_core::{AvatarRef, Email, Role, UserId};

    fn identity(role: Role) -> Identity {
        Identity {
            id: UserId::new("user-123"),
            email: Email::parse("alex.creator@viralcopy.ai").unwrap(),
            name: "Alex Creator".to_string(),
            role,
            avatar_ref: Some(AvatarRef::Url("https://picsum.photos/200".to_string())),
            company: None,
            phone: None,
        }
    }

    #[test]
    fn test_layout_highlights_current_section() {
        let layout = Layout::new(&identity(Role::Admin), "/projects/p-1");
        let active: Vec<_> = layout
            .navigation
            .iter()
            .filter(|e| layout.is_active(e))
            .map(|e| e.path)
            .collect();
        assert_eq!(active, vec!["/projects"]);
    }

    #[test]
    fn test_user_view() {
        let view = UserView::from(&identity(Role::User));
        assert_eq!(view.first_name, "Alex");
        assert_eq!(view.initials, "AC");
        assert_eq!(view.avatar_src.as_deref(), Some("https://picsum.photos/200"));
    }

    #[test]
    fn test_search_term() {
        let params = SearchParams { q: "  ".to_string() };
        assert_eq!(params.term(), None);
        let params = SearchParams { q: " launch ".to_string() };
        assert_eq!(params.term(), Some("launch"));
    }
}
