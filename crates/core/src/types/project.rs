//! Copy project record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ProjectId, ProjectStatus};

/// A piece of marketing copy being worked on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// Free-form deliverable kind, e.g. "Email Marketing" or "Social Media".
    pub kind: String,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    /// The user's input and context.
    #[serde(default)]
    pub brief: Option<String>,
    /// The final copy.
    #[serde(default)]
    pub content: Option<String>,
}

impl Project {
    /// Case-insensitive match of `query` against the project name.
    ///
    /// An empty query matches everything.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_is_case_insensitive() {
        let project = Project {
            id: ProjectId::new("1"),
            name: "Launch Email Sequence".to_string(),
            kind: "Email Marketing".to_string(),
            status: ProjectStatus::Completed,
            created_at: Utc::now(),
            brief: None,
            content: None,
        };

        assert!(project.matches("email"));
        assert!(project.matches("  LAUNCH "));
        assert!(project.matches(""));
        assert!(!project.matches("instagram"));
    }
}
