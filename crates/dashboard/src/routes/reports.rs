//! Analytics reports and CSV export.

use askama::Template;
use axum::{
    Router,
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    routing::get,
};
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireIdentity;
use crate::services::data::{DistributionSlice, Engagement, PerformanceRow};
use crate::state::AppState;

use super::Layout;

/// File name offered by the CSV export.
pub const EXPORT_FILE_NAME: &str = "viralcopy_analytics.csv";

/// Reports page template.
#[derive(Template)]
#[template(path = "reports.html")]
pub struct ReportsTemplate {
    pub layout: Layout,
    pub engagement: Vec<Engagement>,
    pub distribution: Vec<DistributionSlice>,
    pub performance: Vec<PerformanceRow>,
}

/// Build the reports router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reports", get(reports))
        .route("/reports/export.csv", get(export_csv))
}

/// Render the reports.
///
/// GET /reports
#[instrument(skip_all)]
async fn reports(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
) -> Result<Html<String>, AppError> {
    let data = state.data();
    let template = ReportsTemplate {
        layout: Layout::new(&identity, "/reports"),
        engagement: data.engagement(),
        distribution: data.content_distribution(),
        performance: data.performance_table(),
    };
    Ok(Html(template.render()?))
}

/// Download the performance table as CSV.
///
/// GET /reports/export.csv
#[instrument(skip_all)]
async fn export_csv(
    State(state): State<AppState>,
    RequireIdentity(_identity): RequireIdentity,
) -> impl IntoResponse {
    let disposition = format!("attachment; filename=\"{EXPORT_FILE_NAME}\"");
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        state.data().performance_csv(),
    )
}
