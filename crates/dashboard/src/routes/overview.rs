//! Overview screen.

use askama::Template;
use axum::{
    Router,
    extract::{OriginalUri, State},
    response::Html,
    routing::get,
};
use chrono::Timelike;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireIdentity;
use crate::services::data::{DailyActivity, Kpi, Trend};
use crate::state::AppState;

use super::Layout;
use super::projects::ProjectRow;

/// Number of projects shown under "Recent projects".
const RECENT_PROJECTS: usize = 4;

/// KPI card.
#[derive(Debug, Clone)]
pub struct KpiView {
    pub label: &'static str,
    pub value: &'static str,
    pub change: String,
    pub is_up: bool,
}

impl From<Kpi> for KpiView {
    fn from(kpi: Kpi) -> Self {
        Self {
            label: kpi.label,
            value: kpi.value,
            change: format!("{:+.1}%", kpi.change),
            is_up: kpi.trend == Trend::Up,
        }
    }
}

/// Overview page template.
#[derive(Template)]
#[template(path = "overview.html")]
pub struct OverviewTemplate {
    pub layout: Layout,
    pub greeting: &'static str,
    pub kpis: Vec<KpiView>,
    pub activity: Vec<DailyActivity>,
    pub recent_projects: Vec<ProjectRow>,
}

/// Build the overview router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(overview))
}

/// Greeting for the local hour of day.
#[must_use]
pub const fn greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning",
        12..=17 => "Good afternoon",
        _ => "Good evening",
    }
}

/// Render the overview.
///
/// GET /
#[instrument(skip_all)]
async fn overview(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    OriginalUri(uri): OriginalUri,
) -> Result<Html<String>, AppError> {
    let data = state.data();
    let mut projects = data.list_projects(None).await;
    projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let recent_projects = projects
        .iter()
        .take(RECENT_PROJECTS)
        .map(ProjectRow::from)
        .collect();

    let template = OverviewTemplate {
        layout: Layout::new(&identity, uri.path()),
        greeting: greeting(chrono::Local::now().hour()),
        kpis: data.kpis().into_iter().map(KpiView::from).collect(),
        activity: data.weekly_activity(),
        recent_projects,
    };
    Ok(Html(template.render()?))
}
