//! Declarative route table.
//!
//! Every screen the dashboard can render is listed here once, together with
//! the access requirements the gate enforces for it. The table is validated
//! when it is built; an invalid table is a configuration error and the
//! server refuses to start.

use std::collections::HashSet;
use std::fmt;

use viralcopy_core::Role;

/// Path of the home (overview) route. Authorization redirects land here.
pub const HOME_PATH: &str = "/";

/// Path of the login route. Unauthenticated visitors are redirected here.
pub const LOGIN_PATH: &str = "/login";

/// Every screen the dashboard can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    Register,
    Overview,
    MagicBox,
    ToolsLibrary,
    ToolWorkspace,
    Templates,
    Projects,
    ProjectDetails,
    Clients,
    Reports,
    ReportsExport,
    Settings,
    AdminPanel,
}

impl View {
    /// Stable name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::Overview => "overview",
            Self::MagicBox => "magic_box",
            Self::ToolsLibrary => "tools_library",
            Self::ToolWorkspace => "tool_workspace",
            Self::Templates => "templates",
            Self::Projects => "projects",
            Self::ProjectDetails => "project_details",
            Self::Clients => "clients",
            Self::Reports => "reports",
            Self::ReportsExport => "reports_export",
            Self::Settings => "settings",
            Self::AdminPanel => "admin_panel",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors found while validating a route table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteTableError {
    #[error("route pattern {pattern:?} is invalid: {reason}")]
    InvalidPattern {
        pattern: String,
        reason: &'static str,
    },

    #[error("route pattern {0:?} is declared more than once")]
    DuplicatePattern(String),

    #[error("route {0:?} requires a role but not authentication")]
    RoleWithoutAuth(String),

    #[error("route {0:?} is guest-only but also requires authentication")]
    GuestOnlyWithAuth(String),

    #[error("home route {HOME_PATH:?} is missing")]
    MissingHome,

    #[error("home route must be reachable by every authenticated identity")]
    HomeRequiresRole,

    #[error("login route {LOGIN_PATH:?} with the login view is missing")]
    MissingLogin,

    #[error("login route must be public")]
    LoginRequiresAuth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

impl Segment {
    const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

/// A validated route: its pattern plus the access requirements for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pattern: String,
    segments: Vec<Segment>,
    requires_auth: bool,
    required_role: Option<Role>,
    guest_only: bool,
    view: View,
}

impl RouteEntry {
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    #[must_use]
    pub const fn required_role(&self) -> Option<Role> {
        self.required_role
    }

    /// Login and registration screens: an authenticated identity is sent home.
    #[must_use]
    pub const fn guest_only(&self) -> bool {
        self.guest_only
    }

    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    /// Match raw `segments` against this pattern. Literals compare exactly;
    /// parameters are captured percent-decoded.
    fn capture(&self, segments: &[&str]) -> Option<RouteParams> {
        if segments.len() != self.segments.len() {
            return None;
        }
        let mut params = Vec::new();
        for (expected, actual) in self.segments.iter().zip(segments) {
            match expected {
                Segment::Literal(lit) if lit.as_str() == *actual => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    let value = urlencoding::decode(actual).ok()?;
                    params.push((name.clone(), value.into_owned()));
                }
            }
        }
        Some(RouteParams(params))
    }

    /// Pattern shape with parameter names erased; two entries with the same
    /// shape would match exactly the same paths.
    fn shape(&self) -> Vec<Option<&str>> {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(lit) => Some(lit.as_str()),
                Segment::Param(_) => None,
            })
            .collect()
    }
}

/// Route declaration before validation.
#[derive(Debug, Clone)]
pub struct RouteDef {
    pub pattern: String,
    pub requires_auth: bool,
    pub required_role: Option<Role>,
    pub guest_only: bool,
    pub view: View,
}

/// Parameters captured from a matched path, percent-decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(Vec<(String, String)>);

impl RouteParams {
    /// Value of the parameter `name`, if captured.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

}

/// A path matched against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub view: View,
    pub pattern: String,
    pub params: RouteParams,
}

/// Builder collecting route declarations.
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    defs: Vec<RouteDef>,
}

impl RouteTableBuilder {
    /// Public route that authenticated identities are redirected away from.
    #[must_use]
    pub fn guest(self, pattern: &str, view: View) -> Self {
        self.route(RouteDef {
            pattern: pattern.to_string(),
            requires_auth: false,
            required_role: None,
            guest_only: true,
            view,
        })
    }

    /// Route open to any authenticated identity.
    #[must_use]
    pub fn authenticated(self, pattern: &str, view: View) -> Self {
        self.route(RouteDef {
            pattern: pattern.to_string(),
            requires_auth: true,
            required_role: None,
            guest_only: false,
            view,
        })
    }

    /// Route open only to authenticated identities holding `role`.
    #[must_use]
    pub fn with_role(self, pattern: &str, role: Role, view: View) -> Self {
        self.route(RouteDef {
            pattern: pattern.to_string(),
            requires_auth: true,
            required_role: Some(role),
            guest_only: false,
            view,
        })
    }

    /// Add a raw declaration.
    #[must_use]
    pub fn route(mut self, def: RouteDef) -> Self {
        self.defs.push(def);
        self
    }

    /// Validate every declaration and build the table.
    ///
    /// # Errors
    ///
    /// Returns the first [`RouteTableError`] found.
    pub fn build(self) -> Result<RouteTable, RouteTableError> {
        let mut entries = Vec::with_capacity(self.defs.len());
        for def in self.defs {
            entries.push(validate(def)?);
        }

        let mut shapes = HashSet::new();
        for entry in &entries {
            if !shapes.insert(entry.shape()) {
                return Err(RouteTableError::DuplicatePattern(entry.pattern.clone()));
            }
        }

        let home = entries
            .iter()
            .find(|e| e.pattern == HOME_PATH)
            .ok_or(RouteTableError::MissingHome)?;
        if home.required_role.is_some() || home.guest_only {
            return Err(RouteTableError::HomeRequiresRole);
        }

        let login = entries
            .iter()
            .find(|e| e.pattern == LOGIN_PATH && e.view == View::Login)
            .ok_or(RouteTableError::MissingLogin)?;
        if login.requires_auth {
            return Err(RouteTableError::LoginRequiresAuth);
        }

        Ok(RouteTable { entries })
    }
}

fn validate(def: RouteDef) -> Result<RouteEntry, RouteTableError> {
    let invalid = |reason| RouteTableError::InvalidPattern {
        pattern: def.pattern.clone(),
        reason,
    };

    let Some(rest) = def.pattern.strip_prefix('/') else {
        return Err(invalid("must start with '/'"));
    };

    let mut segments = Vec::new();
    let mut names: HashSet<String> = HashSet::new();
    for raw in rest.split('/').filter(|_| !rest.is_empty()) {
        if raw.is_empty() {
            return Err(invalid("empty segment"));
        }
        if let Some(name) = raw.strip_prefix(':') {
            if name.is_empty() {
                return Err(invalid("empty parameter name"));
            }
            if !names.insert(name.to_string()) {
                return Err(invalid("duplicate parameter name"));
            }
            segments.push(Segment::Param(name.to_string()));
        } else {
            segments.push(Segment::Literal(raw.to_string()));
        }
    }

    if def.required_role.is_some() && !def.requires_auth {
        return Err(RouteTableError::RoleWithoutAuth(def.pattern));
    }
    if def.guest_only && def.requires_auth {
        return Err(RouteTableError::GuestOnlyWithAuth(def.pattern));
    }

    Ok(RouteEntry {
        pattern: def.pattern,
        segments,
        requires_auth: def.requires_auth,
        required_role: def.required_role,
        guest_only: def.guest_only,
        view: def.view,
    })
}

/// Validated, immutable route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    #[must_use]
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// The dashboard's route table.
    ///
    /// # Errors
    ///
    /// Never fails for the declarations below; the `Result` is kept so a
    /// broken edit surfaces at startup instead of at request time.
    pub fn standard() -> Result<Self, RouteTableError> {
        Self::builder()
            .guest(LOGIN_PATH, View::Login)
            .guest("/register", View::Register)
            .authenticated(HOME_PATH, View::Overview)
            .authenticated("/magicbox", View::MagicBox)
            .authenticated("/tools", View::ToolsLibrary)
            .authenticated("/tools/:id", View::ToolWorkspace)
            .authenticated("/templates", View::Templates)
            .authenticated("/projects", View::Projects)
            .authenticated("/projects/:id", View::ProjectDetails)
            .authenticated("/settings", View::Settings)
            .authenticated("/clients", View::Clients)
            .authenticated("/reports", View::Reports)
            .authenticated("/reports/export.csv", View::ReportsExport)
            .with_role("/admin", Role::Admin, View::AdminPanel)
            .build()
    }

    #[must_use]
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Entry declared with exactly `pattern`.
    #[must_use]
    pub fn entry(&self, pattern: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.pattern == pattern)
    }

    /// Match a request path.
    ///
    /// A query string is not part of the path and a single trailing slash is
    /// ignored. Literal segments compare against the raw path, the same way
    /// the HTTP router matches, so `/%74ools` and `/tools//1` match nothing.
    /// When several patterns match, the one with a literal segment furthest
    /// left wins, so `/reports/export.csv` beats a hypothetical `/reports/:id`.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
        self.lookup(path).map(|(entry, params)| RouteMatch {
            view: entry.view,
            pattern: entry.pattern.clone(),
            params,
        })
    }

    pub(crate) fn lookup(&self, path: &str) -> Option<(&RouteEntry, RouteParams)> {
        let segments = split_path(path)?;
        self.entries
            .iter()
            .filter_map(|entry| entry.capture(&segments).map(|params| (entry, params)))
            .max_by(|(a, _), (b, _)| {
                let a = a.segments.iter().map(Segment::is_literal);
                let b = b.segments.iter().map(Segment::is_literal);
                a.cmp(b)
            })
    }
}

/// Split a request path into raw segments. `None` if an inner segment is
/// empty.
fn split_path(path: &str) -> Option<Vec<&str>> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);
    if path.is_empty() {
        return Some(Vec::new());
    }
    let segments: Vec<&str> = path.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return None;
    }
    Some(segments)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn standard() -> RouteTable {
        RouteTable::standard().unwrap()
    }

    #[test]
    fn test_standard_table_is_valid() {
        let table = standard();
        assert_eq!(table.entries().len(), 14);
        assert!(table.entry(LOGIN_PATH).unwrap().guest_only());
        assert_eq!(
            table.entry("/admin").unwrap().required_role(),
            Some(Role::Admin)
        );
        for pattern in ["/clients", "/reports", "/reports/export.csv"] {
            let entry = table.entry(pattern).unwrap();
            assert!(entry.requires_auth(), "{pattern}");
            assert_eq!(entry.required_role(), None, "{pattern}");
        }
    }

    #[test]
    fn test_match_literal_and_params() {
        let table = standard();
        assert_eq!(table.match_path("/").unwrap().view, View::Overview);
        assert_eq!(table.match_path("/magicbox").unwrap().view, View::MagicBox);

        let m = table.match_path("/projects/p-42").unwrap();
        assert_eq!(m.view, View::ProjectDetails);
        assert_eq!(m.pattern, "/projects/:id");
        assert_eq!(m.params.get("id"), Some("p-42"));
        assert_eq!(m.params.get("slug"), None);
    }

    #[test]
    fn test_match_ignores_trailing_slash_and_query() {
        let table = standard();
        assert_eq!(table.match_path("/tools/").unwrap().view, View::ToolsLibrary);
        assert_eq!(
            table.match_path("/templates?category=sales").unwrap().view,
            View::Templates
        );
        assert_eq!(table.match_path("").unwrap().view, View::Overview);
    }

    #[test]
    fn test_match_decodes_params() {
        let m = standard().match_path("/tools/magic%20box").unwrap();
        assert_eq!(m.params.get("id"), Some("magic box"));
    }

    #[test]
    fn test_unknown_paths_do_not_match() {
        let table = standard();
        assert!(table.match_path("/nonexistent").is_none());
        assert!(table.match_path("/projects/1/extra").is_none());
        assert!(table.match_path("/tools/%FF").is_none());
    }

    #[test]
    fn test_match_compares_raw_literals() {
        let table = standard();
        assert!(table.match_path("/%74ools").is_none());
        assert!(table.match_path("//projects").is_none());
        assert!(table.match_path("/tools//1").is_none());
        assert!(table.match_path("/projects//").is_none());
    }

    #[test]
    fn test_literal_beats_param() {
        let table = RouteTable::builder()
            .guest(LOGIN_PATH, View::Login)
            .authenticated(HOME_PATH, View::Overview)
            .authenticated("/reports/:id", View::Reports)
            .authenticated("/reports/export.csv", View::ReportsExport)
            .build()
            .unwrap();
        assert_eq!(
            table.match_path("/reports/export.csv").unwrap().view,
            View::ReportsExport
        );
        assert_eq!(table.match_path("/reports/q3").unwrap().view, View::Reports);
    }

    fn base() -> RouteTableBuilder {
        RouteTable::builder()
            .guest(LOGIN_PATH, View::Login)
            .authenticated(HOME_PATH, View::Overview)
    }

    #[test]
    fn test_rejects_pattern_without_leading_slash() {
        let err = base().authenticated("tools", View::ToolsLibrary).build();
        assert!(matches!(err, Err(RouteTableError::InvalidPattern { .. })));
    }

    #[test]
    fn test_rejects_bad_params() {
        assert!(matches!(
            base().authenticated("/tools/:", View::ToolWorkspace).build(),
            Err(RouteTableError::InvalidPattern { reason: "empty parameter name", .. })
        ));
        assert!(matches!(
            base().authenticated("/a/:id/b/:id", View::ToolWorkspace).build(),
            Err(RouteTableError::InvalidPattern { reason: "duplicate parameter name", .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_shapes() {
        let err = base()
            .authenticated("/projects/:id", View::ProjectDetails)
            .authenticated("/projects/:slug", View::ProjectDetails)
            .build();
        assert_eq!(
            err.unwrap_err(),
            RouteTableError::DuplicatePattern("/projects/:slug".to_string())
        );
    }

    #[test]
    fn test_rejects_inconsistent_requirements() {
        let role_only = base()
            .route(RouteDef {
                pattern: "/admin".to_string(),
                requires_auth: false,
                required_role: Some(Role::Admin),
                guest_only: false,
                view: View::AdminPanel,
            })
            .build();
        assert_eq!(
            role_only.unwrap_err(),
            RouteTableError::RoleWithoutAuth("/admin".to_string())
        );

        let guest_auth = base()
            .route(RouteDef {
                pattern: "/register".to_string(),
                requires_auth: true,
                required_role: None,
                guest_only: true,
                view: View::Register,
            })
            .build();
        assert_eq!(
            guest_auth.unwrap_err(),
            RouteTableError::GuestOnlyWithAuth("/register".to_string())
        );
    }

    #[test]
    fn test_requires_home_and_login() {
        let no_home = RouteTable::builder().guest(LOGIN_PATH, View::Login).build();
        assert_eq!(no_home.unwrap_err(), RouteTableError::MissingHome);

        let no_login = RouteTable::builder()
            .authenticated(HOME_PATH, View::Overview)
            .build();
        assert_eq!(no_login.unwrap_err(), RouteTableError::MissingLogin);

        let admin_home = RouteTable::builder()
            .guest(LOGIN_PATH, View::Login)
            .with_role(HOME_PATH, Role::Admin, View::Overview)
            .build();
        assert_eq!(admin_home.unwrap_err(), RouteTableError::HomeRequiresRole);
    }
}
