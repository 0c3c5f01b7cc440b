//! Data service for projects, clients, and analytics.
//!
//! Backed by process memory and seeded with sample records, so the dashboard
//! is fully navigable without a database.

use std::time::Duration;

use chrono::{NaiveDate, TimeZone, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::instrument;

use viralcopy_core::{Client, ClientId, ClientStatus, Email, Plan, Project, ProjectId, ProjectStatus};

/// Errors that can occur in data operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// No project with this id.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Input rejected before it was stored.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Fields for a new project.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub kind: String,
    pub status: ProjectStatus,
    pub brief: Option<String>,
    pub content: Option<String>,
}

/// Partial project update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub status: Option<ProjectStatus>,
    pub brief: Option<String>,
    pub content: Option<String>,
}

/// Direction of a KPI change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
}

/// Headline metric on the overview screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpi {
    pub label: &'static str,
    pub value: &'static str,
    /// Percent change against the previous period.
    pub change: f64,
    pub trend: Trend,
}

/// One day of the weekly activity series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyActivity {
    pub day: &'static str,
    pub value: u32,
    pub secondary: u32,
}

/// One day of the engagement report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Engagement {
    pub day: &'static str,
    pub generated: u32,
    pub impact: u32,
}

/// Share of generated content by channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DistributionSlice {
    pub channel: &'static str,
    pub percent: u8,
}

/// Row of the performance-by-type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PerformanceRow {
    pub kind: &'static str,
    pub projects: u32,
    pub avg_open_rate: Option<&'static str>,
    pub conversion: &'static str,
}

/// One month of platform metrics for the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyMetrics {
    pub month: &'static str,
    pub mrr: u32,
    pub sales: u32,
    pub new_users: u32,
    pub churn: u32,
}

/// Headline platform figures for the admin panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformSummary {
    pub total_sales_ytd: u32,
    pub sales_growth: f64,
    pub monthly_active_users: u32,
    pub mau_growth: f64,
    pub mrr: u32,
    pub mrr_growth: f64,
}

/// Recent subscription payment shown on the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub customer: &'static str,
    pub plan: &'static str,
    pub when: &'static str,
    /// Amount in cents.
    pub amount: u32,
    pub paid: bool,
}

/// Aggregates over the client list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClientSummary {
    pub total: usize,
    pub active: usize,
    pub pending: usize,
    pub total_projects: u32,
}

/// In-memory data service.
#[derive(Debug)]
pub struct MockDataService {
    projects: RwLock<Vec<Project>>,
    clients: RwLock<Vec<Client>>,
    latency: Duration,
}

impl MockDataService {
    /// Create the service with the sample projects and clients.
    #[must_use]
    pub fn seeded(latency: Duration) -> Self {
        Self {
            projects: RwLock::new(sample_projects()),
            clients: RwLock::new(sample_clients()),
            latency,
        }
    }

    // =========================================================================
    // Projects
    // =========================================================================

    /// List projects whose name contains `search` (case-insensitive).
    #[instrument(skip(self))]
    pub async fn list_projects(&self, search: Option<&str>) -> Vec<Project> {
        self.simulate_latency().await;
        let query = search.unwrap_or_default();
        self.projects
            .read()
            .await
            .iter()
            .filter(|p| p.matches(query))
            .cloned()
            .collect()
    }

    /// Get one project.
    ///
    /// # Errors
    ///
    /// Returns `DataError::ProjectNotFound` if no project has `id`.
    #[instrument(skip(self))]
    pub async fn get_project(&self, id: &ProjectId) -> Result<Project, DataError> {
        self.simulate_latency().await;
        self.projects
            .read()
            .await
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| DataError::ProjectNotFound(id.clone()))
    }

    /// Store a new project.
    ///
    /// # Errors
    ///
    /// Returns `DataError::InvalidInput` if the name is blank.
    #[instrument(skip(self, new), fields(name = %new.name))]
    pub async fn create_project(&self, new: NewProject) -> Result<Project, DataError> {
        self.simulate_latency().await;

        let name = required(&new.name, "project name")?;
        let kind = required(&new.kind, "project type")?;
        let project = Project {
            id: ProjectId::generate(),
            name,
            kind,
            status: new.status,
            created_at: Utc::now(),
            brief: new.brief.filter(|b| !b.trim().is_empty()),
            content: new.content.filter(|c| !c.trim().is_empty()),
        };

        self.projects.write().await.push(project.clone());
        tracing::info!(project_id = %project.id, "Project created");
        Ok(project)
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns `DataError::ProjectNotFound` if no project has `id`, or
    /// `DataError::InvalidInput` if the update blanks the name.
    #[instrument(skip(self, update))]
    pub async fn update_project(
        &self,
        id: &ProjectId,
        update: ProjectUpdate,
    ) -> Result<Project, DataError> {
        self.simulate_latency().await;

        let name = update
            .name
            .as_deref()
            .map(|n| required(n, "project name"))
            .transpose()?;

        let mut projects = self.projects.write().await;
        let project = projects
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| DataError::ProjectNotFound(id.clone()))?;

        if let Some(name) = name {
            project.name = name;
        }
        if let Some(kind) = update.kind.filter(|k| !k.trim().is_empty()) {
            project.kind = kind.trim().to_string();
        }
        if let Some(status) = update.status {
            project.status = status;
        }
        if let Some(brief) = update.brief {
            project.brief = Some(brief).filter(|b| !b.trim().is_empty());
        }
        if let Some(content) = update.content {
            project.content = Some(content).filter(|c| !c.trim().is_empty());
        }

        Ok(project.clone())
    }

    /// Copy a project as a new draft named "Copy of <name>".
    ///
    /// # Errors
    ///
    /// Returns `DataError::ProjectNotFound` if no project has `id`.
    #[instrument(skip(self))]
    pub async fn duplicate_project(&self, id: &ProjectId) -> Result<Project, DataError> {
        self.simulate_latency().await;

        let mut projects = self.projects.write().await;
        let source = projects
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| DataError::ProjectNotFound(id.clone()))?;

        let copy = Project {
            id: ProjectId::generate(),
            name: format!("Copy of {}", source.name),
            status: ProjectStatus::Draft,
            created_at: Utc::now(),
            ..source.clone()
        };
        projects.push(copy.clone());

        tracing::info!(source = %id, project_id = %copy.id, "Project duplicated");
        Ok(copy)
    }

    /// Delete a project. Deleting a missing project succeeds.
    #[instrument(skip(self))]
    pub async fn delete_project(&self, id: &ProjectId) -> bool {
        self.simulate_latency().await;
        let mut projects = self.projects.write().await;
        let before = projects.len();
        projects.retain(|p| &p.id != id);
        before != projects.len()
    }

    // =========================================================================
    // Clients
    // =========================================================================

    /// List clients matching `search` on name, email, or company.
    #[instrument(skip(self))]
    pub async fn list_clients(&self, search: Option<&str>) -> Vec<Client> {
        self.simulate_latency().await;
        let query = search.unwrap_or_default();
        self.clients
            .read()
            .await
            .iter()
            .filter(|c| c.matches(query))
            .cloned()
            .collect()
    }

    /// Totals over every client.
    pub async fn client_summary(&self) -> ClientSummary {
        let clients = self.clients.read().await;
        ClientSummary {
            total: clients.len(),
            active: clients
                .iter()
                .filter(|c| c.status == ClientStatus::Active)
                .count(),
            pending: clients
                .iter()
                .filter(|c| c.status == ClientStatus::Pending)
                .count(),
            total_projects: clients.iter().map(|c| c.projects_count).sum(),
        }
    }

    // =========================================================================
    // Analytics
    // =========================================================================

    #[must_use]
    pub fn kpis(&self) -> Vec<Kpi> {
        vec![
            Kpi { label: "Words Generated", value: "124,592", change: 12.5, trend: Trend::Up },
            Kpi { label: "Active Projects", value: "14", change: 2.1, trend: Trend::Up },
            Kpi { label: "Conversion Rate", value: "3.4%", change: -0.4, trend: Trend::Down },
            Kpi { label: "Time Saved", value: "126h", change: 8.4, trend: Trend::Up },
        ]
    }

    #[must_use]
    pub fn weekly_activity(&self) -> Vec<DailyActivity> {
        [
            ("Mon", 4000, 2400),
            ("Tue", 3000, 1398),
            ("Wed", 2000, 9800),
            ("Thu", 2780, 3908),
            ("Fri", 1890, 4800),
            ("Sat", 2390, 3800),
            ("Sun", 3490, 4300),
        ]
        .into_iter()
        .map(|(day, value, secondary)| DailyActivity { day, value, secondary })
        .collect()
    }

    #[must_use]
    pub fn engagement(&self) -> Vec<Engagement> {
        [
            ("Mon", 12, 2400),
            ("Tue", 19, 3500),
            ("Wed", 8, 1200),
            ("Thu", 25, 4800),
            ("Fri", 22, 4100),
            ("Sat", 15, 2900),
            ("Sun", 10, 1800),
        ]
        .into_iter()
        .map(|(day, generated, impact)| Engagement { day, generated, impact })
        .collect()
    }

    #[must_use]
    pub fn content_distribution(&self) -> Vec<DistributionSlice> {
        vec![
            DistributionSlice { channel: "Email Marketing", percent: 45 },
            DistributionSlice { channel: "Social Media", percent: 30 },
            DistributionSlice { channel: "Blog Posts", percent: 15 },
            DistributionSlice { channel: "Ads", percent: 10 },
        ]
    }

    #[must_use]
    pub fn performance_table(&self) -> Vec<PerformanceRow> {
        vec![
            PerformanceRow { kind: "Email Marketing", projects: 45, avg_open_rate: Some("42%"), conversion: "3.8%" },
            PerformanceRow { kind: "Instagram Posts", projects: 82, avg_open_rate: None, conversion: "1.2%" },
            PerformanceRow { kind: "Landing Pages", projects: 12, avg_open_rate: None, conversion: "8.5%" },
            PerformanceRow { kind: "Blog Articles", projects: 8, avg_open_rate: None, conversion: "0.9%" },
        ]
    }

    /// The performance table as CSV, header first.
    #[must_use]
    pub fn performance_csv(&self) -> String {
        let mut csv = String::from("Type,Projects,Conversion\n");
        for row in self.performance_table() {
            csv.push_str(&csv_field(row.kind));
            csv.push(',');
            csv.push_str(&row.projects.to_string());
            csv.push(',');
            csv.push_str(&csv_field(row.conversion));
            csv.push('\n');
        }
        csv
    }

    #[must_use]
    pub fn platform_performance(&self) -> Vec<MonthlyMetrics> {
        [
            ("Jan", 45_000, 52_000, 120, 5),
            ("Feb", 48_000, 55_000, 135, 8),
            ("Mar", 52_000, 61_000, 150, 4),
            ("Apr", 58_000, 67_000, 180, 6),
            ("May", 64_000, 75_000, 210, 3),
            ("Jun", 72_000, 84_000, 250, 5),
        ]
        .into_iter()
        .map(|(month, mrr, sales, new_users, churn)| MonthlyMetrics {
            month,
            mrr,
            sales,
            new_users,
            churn,
        })
        .collect()
    }

    #[must_use]
    pub fn platform_summary(&self) -> PlatformSummary {
        let months = self.platform_performance();
        PlatformSummary {
            total_sales_ytd: months.iter().map(|m| m.sales).sum(),
            sales_growth: 18.0,
            monthly_active_users: 1_250,
            mau_growth: 12.0,
            mrr: months.last().map_or(0, |m| m.mrr),
            mrr_growth: 8.5,
        }
    }

    #[must_use]
    pub fn recent_transactions(&self) -> Vec<Transaction> {
        vec![
            Transaction { customer: "TechSolutions Ltd", plan: "Pro Annual", when: "Today, 14:30", amount: 99_700, paid: true },
            Transaction { customer: "Maria Clara Mkt", plan: "Starter", when: "Yesterday, 09:15", amount: 9_700, paid: true },
            Transaction { customer: "Roberto Design", plan: "Agency", when: "Oct 24, 11:00", amount: 29_700, paid: false },
        ]
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

fn required(value: &str, field: &str) -> Result<String, DataError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DataError::InvalidInput(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn sample_projects() -> Vec<Project> {
    let day = |d| {
        Utc.with_ymd_and_hms(2023, 10, d, 12, 0, 0)
            .single()
            .unwrap_or_else(Utc::now)
    };

    vec![
        Project {
            id: ProjectId::new("1"),
            name: "Launch Email Sequence".to_string(),
            kind: "Email Marketing".to_string(),
            status: ProjectStatus::Completed,
            created_at: day(25),
            brief: Some("Launch for a new SaaS product focused on AI.".to_string()),
            content: Some(
                "Subject: The future is here...\n\nHi [Name],\n\nWe are thrilled to announce..."
                    .to_string(),
            ),
        },
        Project {
            id: ProjectId::new("2"),
            name: "Instagram Black Friday".to_string(),
            kind: "Social Media".to_string(),
            status: ProjectStatus::Draft,
            created_at: day(26),
            brief: None,
            content: None,
        },
        Project {
            id: ProjectId::new("3"),
            name: "Landing Page Hero V2".to_string(),
            kind: "Website Copy".to_string(),
            status: ProjectStatus::Generating,
            created_at: day(27),
            brief: None,
            content: None,
        },
        Project {
            id: ProjectId::new("4"),
            name: "LinkedIn Thought Leader".to_string(),
            kind: "Social Media".to_string(),
            status: ProjectStatus::Completed,
            created_at: day(28),
            brief: None,
            content: None,
        },
    ]
}

fn sample_clients() -> Vec<Client> {
    let joined = NaiveDate::from_ymd_opt(2025, 11, 29).unwrap_or_default();
    let rows = [
        ("c1", "Marina Santos", "marina@techstart.com.br", Some("TechStart Brasil"), ClientStatus::Active, Plan::Professional, 8),
        ("c2", "Ricardo Oliveira", "ricardo@agenciadigital.com", Some("Agência Digital Plus"), ClientStatus::Active, Plan::Enterprise, 15),
        ("c3", "Carla Mendes", "carla.mendes@email.com", Some("Mendes Consultoria"), ClientStatus::Active, Plan::Starter, 3),
        ("c4", "Fernando Costa", "fernando@ecommercepro.com.br", Some("E-commerce Pro"), ClientStatus::Pending, Plan::Professional, 0),
        ("c5", "Ana Paula Silva", "anapaula@freelancer.com", None, ClientStatus::Active, Plan::Free, 1),
        ("c6", "João Silva", "joao.silva@empresa.com", Some("Tech Solutions"), ClientStatus::Active, Plan::Professional, 8),
    ];

    rows.into_iter()
        .filter_map(|(id, name, email, company, status, plan, projects_count)| {
            let email = Email::parse(email)
                .inspect_err(|e| tracing::warn!(client = id, error = %e, "Skipping sample client"))
                .ok()?;
            Some(Client {
                id: ClientId::new(id),
                name: name.to_string(),
                email,
                company: company.map(ToString::to_string),
                status,
                plan,
                projects_count,
                created_at: joined,
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> MockDataService {
        MockDataService::seeded(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_project_search() {
        let data = service();
        assert_eq!(data.list_projects(None).await.len(), 4);

        let hits = data.list_projects(Some("INSTAGRAM")).await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, ProjectId::new("2"));
    }

    #[tokio::test]
    async fn test_create_and_update_project() {
        let data = service();
        let created = data
            .create_project(NewProject {
                name: "  Webinar Invite ".to_string(),
                kind: "Email Marketing".to_string(),
                status: ProjectStatus::Draft,
                brief: Some("Invite for the Q4 webinar".to_string()),
                content: Some(String::new()),
            })
            .await
            .unwrap();
        assert_eq!(created.name, "Webinar Invite");
        assert_eq!(created.content, None);

        let updated = data
            .update_project(
                &created.id,
                ProjectUpdate {
                    status: Some(ProjectStatus::Completed),
                    content: Some("Join us on Thursday".to_string()),
                    ..ProjectUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, ProjectStatus::Completed);
        assert_eq!(updated.name, "Webinar Invite");
        assert_eq!(data.get_project(&created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let data = service();
        let err = data
            .update_project(
                &ProjectId::new("1"),
                ProjectUpdate {
                    name: Some("   ".to_string()),
                    ..ProjectUpdate::default()
                },
            )
            .await;
        assert!(matches!(err, Err(DataError::InvalidInput(_))));
        assert_eq!(
            data.get_project(&ProjectId::new("1")).await.unwrap().name,
            "Launch Email Sequence"
        );
    }

    #[tokio::test]
    async fn test_duplicate_project_is_a_draft_copy() {
        let data = service();
        let copy = data.duplicate_project(&ProjectId::new("1")).await.unwrap();

        assert_eq!(copy.name, "Copy of Launch Email Sequence");
        assert_eq!(copy.status, ProjectStatus::Draft);
        assert_ne!(copy.id, ProjectId::new("1"));
        assert!(copy.content.is_some());
        assert_eq!(data.list_projects(None).await.len(), 5);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let data = service();
        let id = ProjectId::new("2");
        assert!(data.delete_project(&id).await);
        assert!(!data.delete_project(&id).await);
        assert!(matches!(
            data.get_project(&id).await,
            Err(DataError::ProjectNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_clients_and_summary() {
        let data = service();
        assert_eq!(data.list_clients(Some("techstart")).await.len(), 1);
        assert_eq!(data.list_clients(Some("silva")).await.len(), 2);

        let summary = data.client_summary().await;
        assert_eq!(
            summary,
            ClientSummary {
                total: 6,
                active: 5,
                pending: 1,
                total_projects: 35,
            }
        );
    }

    #[test]
    fn test_performance_csv() {
        let csv = service().performance_csv();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Type,Projects,Conversion"));
        assert_eq!(lines.next(), Some("Email Marketing,45,3.8%"));
        assert_eq!(csv.lines().count(), 5);
    }

    #[test]
    fn test_platform_summary_totals_sales() {
        let summary = service().platform_summary();
        assert_eq!(summary.total_sales_ytd, 394_000);
        assert_eq!(summary.mrr, 72_000);
    }
}
