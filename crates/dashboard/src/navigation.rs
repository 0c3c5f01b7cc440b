//! Navigation composer.
//!
//! Builds the sidebar entries for an identity. The result depends only on
//! the role, so composing twice for the same role yields the same sequence.

use serde::Serialize;
use viralcopy_core::{Identity, Role};

/// One sidebar link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub path: &'static str,
    pub label: &'static str,
    /// Icon name, rendered as a CSS class.
    pub icon: &'static str,
}

impl NavEntry {
    const fn new(path: &'static str, label: &'static str, icon: &'static str) -> Self {
        Self { path, label, icon }
    }
}

const OVERVIEW: NavEntry = NavEntry::new("/", "Overview", "layout-dashboard");
const MAGIC_BOX: NavEntry = NavEntry::new("/magicbox", "Magic Box", "box");
const TOOLS: NavEntry = NavEntry::new("/tools", "AI Tools", "zap");
const TEMPLATES: NavEntry = NavEntry::new("/templates", "Templates", "layout-template");
const PROJECTS: NavEntry = NavEntry::new("/projects", "Projects", "folder-kanban");
const CLIENTS: NavEntry = NavEntry::new("/clients", "Clients", "users");
const REPORTS: NavEntry = NavEntry::new("/reports", "Reports", "bar-chart");
const SETTINGS: NavEntry = NavEntry::new("/settings", "Settings", "settings");
const ADMIN_PANEL: NavEntry = NavEntry::new("/admin", "Admin Panel", "shield-alert");

/// Composed sidebar for one identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Main links, in display order.
    pub primary: Vec<NavEntry>,
    /// The "Administration" group; empty for non-admins.
    pub admin: Vec<NavEntry>,
}

impl Navigation {
    /// Returns `true` if `entry` should be highlighted for the current `path`.
    ///
    /// The home entry is active only on `/`; other entries are also active on
    /// their sub-pages (`/projects/p1` highlights Projects).
    #[must_use]
    pub fn is_active(entry: &NavEntry, path: &str) -> bool {
        let path = path.split('?').next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        if entry.path == "/" {
            return path == "/";
        }
        path == entry.path
            || path
                .strip_prefix(entry.path)
                .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Every entry, primary first.
    pub fn iter(&self) -> impl Iterator<Item = &NavEntry> {
        self.primary.iter().chain(&self.admin)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.admin.is_empty()
    }
}

/// Compose the navigation for `identity`.
///
/// No identity yields no entries. Admins additionally get Clients and Reports
/// immediately before Settings and an administration group.
#[must_use]
pub fn compose(identity: Option<&Identity>) -> Navigation {
    identity.map_or_else(Navigation::default, |identity| for_role(identity.role))
}

/// Compose the navigation for `role`.
#[must_use]
pub fn for_role(role: Role) -> Navigation {
    let mut primary = vec![OVERVIEW, MAGIC_BOX, TOOLS, TEMPLATES, PROJECTS, SETTINGS];
    let mut admin = Vec::new();

    if role.is_admin() {
        let settings_at = primary.len() - 1;
        primary.splice(settings_at..settings_at, [CLIENTS, REPORTS]);
        admin.push(ADMIN_PANEL);
    }

    Navigation { primary, admin }
}
