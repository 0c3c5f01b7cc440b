//! Strategy template catalog.
//!
//! "Use template" links to the Magic Box with the template pre-filled.

use askama::Template;
use axum::{Router, extract::Query, response::Html, routing::get};
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireIdentity;
use crate::services::catalog::{self, Template as Strategy, TemplateCategory};
use crate::state::AppState;

use super::Layout;
use super::tools::CategoryTab;

/// Template catalog page.
#[derive(Template)]
#[template(path = "templates.html")]
pub struct TemplatesTemplate {
    pub layout: Layout,
    pub tabs: Vec<CategoryTab>,
    pub search: String,
    pub category: &'static str,
    pub strategies: Vec<&'static Strategy>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TemplatesParams {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub q: String,
}

/// Build the templates router.
pub fn router() -> Router<AppState> {
    Router::new().route("/templates", get(catalog_page))
}

fn tabs(selected: Option<TemplateCategory>) -> Vec<CategoryTab> {
    std::iter::once(CategoryTab {
        value: "",
        label: "All",
        active: selected.is_none(),
    })
    .chain(TemplateCategory::ALL.iter().map(|c| CategoryTab {
        value: c.as_str(),
        label: c.label(),
        active: selected == Some(*c),
    }))
    .collect()
}

/// Render the template catalog.
///
/// GET /templates
#[instrument(skip(identity))]
async fn catalog_page(
    RequireIdentity(identity): RequireIdentity,
    Query(params): Query<TemplatesParams>,
) -> Result<Html<String>, AppError> {
    let selected = TemplateCategory::from_query(params.category.trim());

    let template = TemplatesTemplate {
        layout: Layout::new(&identity, "/templates"),
        tabs: tabs(selected),
        category: selected.map_or("", TemplateCategory::as_str),
        strategies: catalog::templates(selected, &params.q),
        search: params.q,
    };
    Ok(Html(template.render()?))
}
