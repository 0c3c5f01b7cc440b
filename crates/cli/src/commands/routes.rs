//! Route table, navigation and gate commands.
//!
//! # Usage
//!
//! ```bash
//! # Validate the route table the dashboard starts with
//! vc-cli routes check
//!
//! # Print the sidebar an admin sees
//! vc-cli nav --role admin
//!
//! # Dry-run a navigation as an anonymous visitor
//! vc-cli authorize /reports
//!
//! # ...and as a regular user
//! vc-cli authorize /admin --role user
//! ```

use thiserror::Error;

use viralcopy_core::{Email, EmailError, Identity, Role, UserId};
use viralcopy_dashboard::gate::{Resolution, Shell};
use viralcopy_dashboard::navigation;
use viralcopy_dashboard::routes::table::{RouteTable, RouteTableError};

/// Errors from route commands.
#[derive(Debug, Error)]
pub enum RoutesError {
    /// The route table failed validation.
    #[error("route table is invalid: {0}")]
    Table(#[from] RouteTableError),

    /// The stand-in identity could not be built.
    #[error("invalid identity: {0}")]
    Identity(#[from] EmailError),

    /// Redirects did not settle on a renderable route.
    #[error("navigation to {0} never settles")]
    NoLanding(String),
}

/// Validate the standard route table and list its entries.
///
/// # Errors
///
/// Returns `RoutesError::Table` if the table is invalid.
pub fn check() -> Result<usize, RoutesError> {
    let table = RouteTable::standard()?;
    for entry in table.entries() {
        tracing::info!(
            pattern = entry.pattern(),
            view = %entry.view(),
            requires_auth = entry.requires_auth(),
            role = entry.required_role().map_or("-", Role::as_str),
            guest_only = entry.guest_only(),
            "Route"
        );
    }
    tracing::info!(routes = table.entries().len(), "Route table is valid");
    Ok(table.entries().len())
}

/// List the navigation composed for `role`, or for no identity.
pub fn nav(role: Option<Role>) -> Vec<&'static str> {
    let navigation = role.map(navigation::for_role).unwrap_or_default();
    if navigation.is_empty() {
        tracing::info!("No navigation without an identity");
    }
    for entry in &navigation.primary {
        tracing::info!(path = entry.path, label = entry.label, "Primary");
    }
    for entry in &navigation.admin {
        tracing::info!(path = entry.path, label = entry.label, "Administration");
    }
    navigation.iter().map(|e| e.path).collect()
}

/// Resolve `path` for `role` (or anonymously) and follow redirects to the
/// path that finally renders.
///
/// # Errors
///
/// Returns `RoutesError::Table` if the table is invalid, or
/// `RoutesError::NoLanding` if redirects do not settle.
pub fn authorize(path: &str, role: Option<Role>) -> Result<String, RoutesError> {
    let shell = Shell::new(RouteTable::standard()?);
    let identity = role.map(stand_in).transpose()?;

    match shell.resolve(path, identity.as_ref()) {
        Resolution::Render(matched) => {
            tracing::info!(path, view = %matched.view, "Allowed");
        }
        Resolution::Redirect(decision) => {
            tracing::info!(path, decision = %decision, "Redirected");
        }
    }

    let (landed, matched) = shell
        .land(path, identity.as_ref())
        .ok_or_else(|| RoutesError::NoLanding(path.to_string()))?;
    tracing::info!(landed = %landed, view = %matched.view, "Renders");
    Ok(landed)
}

fn stand_in(role: Role) -> Result<Identity, EmailError> {
    Ok(Identity {
        id: UserId::new("vc-cli"),
        email: Email::parse("operator@viralcopy.local")?,
        name: "Operator".to_string(),
        role,
        avatar_ref: None,
        company: None,
        phone: None,
    })
}
