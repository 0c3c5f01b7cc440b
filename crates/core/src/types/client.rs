//! Agency client record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ClientId, ClientStatus, Email, Plan};

/// A customer account managed by platform admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: Email,
    /// Company name, if the client has one.
    pub company: Option<String>,
    pub status: ClientStatus,
    pub plan: Plan,
    pub projects_count: u32,
    pub created_at: NaiveDate,
}

impl Client {
    /// Case-insensitive match of `query` against name, email, and company.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query)
            || self.email.as_str().contains(&query)
            || self
                .company
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&query))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_any_field() {
        let client = Client {
            id: ClientId::new("c1"),
            name: "Marina Santos".to_string(),
            email: Email::parse("marina@techstart.com.br").unwrap(),
            company: Some("TechStart Brasil".to_string()),
            status: ClientStatus::Active,
            plan: Plan::Professional,
            projects_count: 8,
            created_at: NaiveDate::from_ymd_opt(2025, 11, 29).unwrap(),
        };

        assert!(client.matches("santos"));
        assert!(client.matches("TECHSTART.com"));
        assert!(client.matches("brasil"));
        assert!(!client.matches("oliveira"));
    }
}
