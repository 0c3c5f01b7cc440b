//! Authorization gate and shell resolution.
//!
//! [`authorize`] decides whether one identity may see one route. [`Shell`]
//! wraps the route table and applies the full resolution order for a
//! navigation request: catch-all, the inverse guard on guest-only screens,
//! then the gate itself.

use std::fmt;

use viralcopy_core::Identity;

use crate::routes::table::{HOME_PATH, LOGIN_PATH, RouteEntry, RouteMatch, RouteTable};

/// Maximum redirects [`Shell::land`] follows before giving up.
pub const MAX_REDIRECTS: usize = 4;

/// Outcome of authorizing one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Render the requested screen.
    Allow,
    /// Send the visitor to the login screen.
    RedirectLogin,
    /// Send the visitor to the home screen.
    RedirectHome,
}

impl Decision {
    /// Where a redirect decision sends the visitor. `None` for [`Decision::Allow`].
    #[must_use]
    pub const fn redirect_target(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::RedirectLogin => Some(LOGIN_PATH),
            Self::RedirectHome => Some(HOME_PATH),
        }
    }

    /// Stable snake_case name used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::RedirectLogin => "redirect_login",
            Self::RedirectHome => "redirect_home",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide whether `identity` may view `route`.
///
/// Rules, in order:
/// 1. a route that needs no authentication is always allowed;
/// 2. no identity is sent to login;
/// 3. an identity lacking the required role is sent home;
/// 4. otherwise allowed.
///
/// Pure: no I/O, no logging, no session reads.
#[must_use]
pub fn authorize(route: &RouteEntry, identity: Option<&Identity>) -> Decision {
    if !route.requires_auth() {
        return Decision::Allow;
    }
    let Some(identity) = identity else {
        return Decision::RedirectLogin;
    };
    match route.required_role() {
        Some(required) if identity.role != required => Decision::RedirectHome,
        _ => Decision::Allow,
    }
}

/// Result of resolving a navigation through the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Render the matched screen.
    Render(RouteMatch),
    /// Redirect; never holds [`Decision::Allow`].
    Redirect(Decision),
}

impl Resolution {
    /// The gate decision this resolution corresponds to.
    #[must_use]
    pub const fn decision(&self) -> Decision {
        match self {
            Self::Render(_) => Decision::Allow,
            Self::Redirect(decision) => *decision,
        }
    }
}

/// The application shell: resolves every navigation against the route table.
#[derive(Debug, Clone)]
pub struct Shell {
    table: RouteTable,
}

impl Shell {
    #[must_use]
    pub const fn new(table: RouteTable) -> Self {
        Self { table }
    }

    #[must_use]
    pub const fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Resolve a navigation to `path` for `identity`.
    pub fn resolve(&self, path: &str, identity: Option<&Identity>) -> Resolution {
        let role = identity.map(|i| i.role.as_str()).unwrap_or("anonymous");

        let Some((entry, params)) = self.table.lookup(path) else {
            tracing::debug!(path, role, decision = %Decision::RedirectHome, "Unknown path, catch-all");
            return Resolution::Redirect(Decision::RedirectHome);
        };

        let decision = if entry.guest_only() && identity.is_some() {
            Decision::RedirectHome
        } else {
            authorize(entry, identity)
        };

        tracing::debug!(
            path,
            role,
            view = %entry.view(),
            decision = %decision,
            "Navigation resolved"
        );

        match decision {
            Decision::Allow => Resolution::Render(RouteMatch {
                view: entry.view(),
                pattern: entry.pattern().to_string(),
                params,
            }),
            redirect => Resolution::Redirect(redirect),
        }
    }

    /// Follow redirects from `path` until a screen renders.
    ///
    /// Returns the rendered path and match, or `None` if the table redirects
    /// more than [`MAX_REDIRECTS`] times in a row.
    pub fn land(&self, path: &str, identity: Option<&Identity>) -> Option<(String, RouteMatch)> {
        let mut current = path.to_string();
        for _ in 0..=MAX_REDIRECTS {
            match self.resolve(&current, identity) {
                Resolution::Render(matched) => return Some((current, matched)),
                Resolution::Redirect(decision) => {
                    current = decision.redirect_target()?.to_string();
                }
            }
        }
        tracing::warn!(path, "Redirect chain did not settle");
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::routes::table::View;
    use viralcopy_core::{Email, Role, UserId};

    fn identity(role: Role) -> Identity {
        Identity {
            id: UserId::new("user-123"),
            email: Email::parse("alex.creator@viralcopy.ai").unwrap(),
            name: "Alex Creator".to_string(),
            role,
            avatar_ref: None,
            company: None,
            phone: None,
        }
    }

    fn shell() -> Shell {
        Shell::new(RouteTable::standard().unwrap())
    }

    #[test]
    fn test_public_routes_always_allowed() {
        let shell = shell();
        let admin = identity(Role::Admin);
        for entry in shell.table().entries().iter().filter(|e| !e.requires_auth()) {
            assert_eq!(authorize(entry, None), Decision::Allow);
            assert_eq!(authorize(entry, Some(&admin)), Decision::Allow);
        }
    }

    #[test]
    fn test_protected_routes_send_anonymous_to_login() {
        let shell = shell();
        for entry in shell.table().entries().iter().filter(|e| e.requires_auth()) {
            assert_eq!(authorize(entry, None), Decision::RedirectLogin, "{}", entry.pattern());
        }
    }

    #[test]
    fn test_role_routes_send_other_roles_home() {
        let shell = shell();
        let user = identity(Role::User);
        let admin = identity(Role::Admin);
        let admin_routes: Vec<_> = shell
            .table()
            .entries()
            .iter()
            .filter(|e| e.required_role() == Some(Role::Admin))
            .collect();
        assert_eq!(admin_routes.len(), 1);
        for entry in admin_routes {
            assert_eq!(authorize(entry, Some(&user)), Decision::RedirectHome);
            assert_eq!(authorize(entry, Some(&admin)), Decision::Allow);
        }
    }

    #[test]
    fn test_authorize_is_deterministic() {
        let shell = shell();
        let entry = shell.table().entry("/admin").unwrap();
        let user = identity(Role::User);
        let first = authorize(entry, Some(&user));
        for _ in 0..10 {
            assert_eq!(authorize(entry, Some(&user)), first);
        }
    }

    #[test]
    fn test_redirect_targets() {
        assert_eq!(Decision::Allow.redirect_target(), None);
        assert_eq!(Decision::RedirectLogin.redirect_target(), Some("/login"));
        assert_eq!(Decision::RedirectHome.redirect_target(), Some("/"));
    }

    #[test]
    fn test_resolve_scenarios() {
        let shell = shell();
        let user = identity(Role::User);
        let admin = identity(Role::Admin);

        assert_eq!(
            shell.resolve("/admin", None),
            Resolution::Redirect(Decision::RedirectLogin)
        );
        assert_eq!(
            shell.resolve("/admin", Some(&user)),
            Resolution::Redirect(Decision::RedirectHome)
        );
        assert!(matches!(
            shell.resolve("/reports", Some(&admin)),
            Resolution::Render(RouteMatch { view: View::Reports, .. })
        ));
        assert!(matches!(
            shell.resolve("/reports", Some(&user)),
            Resolution::Render(RouteMatch { view: View::Reports, .. })
        ));
    }

    #[test]
    fn test_inverse_guard_on_guest_screens() {
        let shell = shell();
        let user = identity(Role::User);
        for path in ["/login", "/register"] {
            assert_eq!(
                shell.resolve(path, Some(&user)),
                Resolution::Redirect(Decision::RedirectHome)
            );
            assert_eq!(shell.resolve(path, None).decision(), Decision::Allow);
        }
    }

    #[test]
    fn test_unknown_path_goes_home_then_follows_home_outcome() {
        let shell = shell();
        let user = identity(Role::User);

        assert_eq!(
            shell.resolve("/nonexistent", Some(&user)),
            Resolution::Redirect(Decision::RedirectHome)
        );

        let (path, matched) = shell.land("/nonexistent", Some(&user)).unwrap();
        assert_eq!(path, "/");
        assert_eq!(matched.view, View::Overview);

        let (path, matched) = shell.land("/nonexistent", None).unwrap();
        assert_eq!(path, "/login");
        assert_eq!(matched.view, View::Login);
    }

    #[test]
    fn test_land_from_guarded_routes() {
        let shell = shell();
        let user = identity(Role::User);
        assert_eq!(shell.land("/admin", Some(&user)).unwrap().0, "/");
        assert_eq!(shell.land("/clients", Some(&user)).unwrap().0, "/clients");
        assert_eq!(shell.land("/login", Some(&user)).unwrap().0, "/");
        assert_eq!(shell.land("/projects/p1", None).unwrap().0, "/login");
        assert_eq!(
            shell.land("/projects/p1", Some(&user)).unwrap().1.params.get("id"),
            Some("p1")
        );
    }
}
