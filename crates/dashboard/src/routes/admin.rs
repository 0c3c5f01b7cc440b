//! Platform administration (admin only).

use askama::Template;
use axum::{Router, extract::State, response::Html, routing::get};
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::services::data::{MonthlyMetrics, PlatformSummary, Transaction};
use crate::state::AppState;

use super::Layout;

/// Transaction row with the amount formatted for display.
#[derive(Debug, Clone)]
pub struct TransactionView {
    pub customer: &'static str,
    pub plan: &'static str,
    pub when: &'static str,
    pub amount: String,
    pub paid: bool,
}

impl From<Transaction> for TransactionView {
    fn from(tx: Transaction) -> Self {
        Self {
            customer: tx.customer,
            plan: tx.plan,
            when: tx.when,
            amount: format_cents(tx.amount),
            paid: tx.paid,
        }
    }
}

/// Admin panel template.
#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub layout: Layout,
    pub summary: PlatformSummary,
    pub months: Vec<MonthlyMetrics>,
    pub transactions: Vec<TransactionView>,
}

/// Build the admin router.
pub fn router() -> Router<AppState> {
    Router::new().route("/admin", get(admin_panel))
}

/// Format an amount in cents as dollars, e.g. `99700` -> `$997.00`.
fn format_cents(cents: u32) -> String {
    format!(
        "${}.{:02}",
        filters::group_thousands(&(cents / 100).to_string()),
        cents % 100
    )
}

/// Render the admin panel.
///
/// GET /admin
#[instrument(skip_all)]
async fn admin_panel(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<Html<String>, AppError> {
    let data = state.data();
    let template = AdminTemplate {
        layout: Layout::new(&admin, "/admin"),
        summary: data.platform_summary(),
        months: data.platform_performance(),
        transactions: data
            .recent_transactions()
            .into_iter()
            .map(TransactionView::from)
            .collect(),
    };
    Ok(Html(template.render()?))
}
