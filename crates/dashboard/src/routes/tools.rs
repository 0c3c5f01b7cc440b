//! AI tool library and tool workspace.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use viralcopy_core::Identity;

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireIdentity;
use crate::services::catalog::{self, Tool, ToolCategory};
use crate::state::AppState;

use super::Layout;
use super::magicbox::generate;

/// Category filter tab.
#[derive(Debug, Clone)]
pub struct CategoryTab {
    /// Query value; empty for "all".
    pub value: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Tool library template.
#[derive(Template)]
#[template(path = "tools/index.html")]
pub struct ToolsTemplate {
    pub layout: Layout,
    pub tabs: Vec<CategoryTab>,
    pub tools: Vec<&'static Tool>,
}

/// Tool workspace template.
#[derive(Template)]
#[template(path = "tools/show.html")]
pub struct ToolTemplate {
    pub layout: Layout,
    pub tool: &'static Tool,
    pub category: &'static str,
    pub input: String,
    pub output: Option<String>,
    pub error: Option<String>,
}

/// Shown in place of a workspace when the tool id is unknown.
#[derive(Template)]
#[template(path = "tools/missing.html")]
pub struct ToolMissingTemplate {
    pub layout: Layout,
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToolsParams {
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct ToolForm {
    pub input: String,
}

/// Build the tools router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tools", get(library))
        .route("/tools/{id}", get(workspace).post(generate_with_tool))
}

fn tabs(selected: Option<ToolCategory>) -> Vec<CategoryTab> {
    let all = CategoryTab {
        value: "",
        label: "All",
        active: selected.is_none(),
    };
    std::iter::once(all)
        .chain(ToolCategory::ALL.iter().map(|c| CategoryTab {
            value: c.as_str(),
            label: c.label(),
            active: selected == Some(*c),
        }))
        .collect()
}

/// 404 page inside the layout, linking back to the library.
fn missing_page(identity: &Identity, id: String) -> Result<Response, AppError> {
    tracing::debug!(tool_id = %id, "Unknown tool");
    let template = ToolMissingTemplate {
        layout: Layout::new(identity, "/tools"),
        id,
    };
    Ok((StatusCode::NOT_FOUND, Html(template.render()?)).into_response())
}

fn workspace_page(
    identity: &Identity,
    tool: &'static Tool,
    input: String,
    output: Option<String>,
    error: Option<String>,
) -> Result<Html<String>, AppError> {
    let template = ToolTemplate {
        layout: Layout::new(identity, &format!("/tools/{}", tool.id)),
        tool,
        category: tool.category.label(),
        input,
        output,
        error,
    };
    Ok(Html(template.render()?))
}

/// Render the tool library.
///
/// GET /tools
#[instrument(skip(identity))]
async fn library(
    RequireIdentity(identity): RequireIdentity,
    Query(params): Query<ToolsParams>,
) -> Result<Html<String>, AppError> {
    let selected = ToolCategory::from_query(params.category.trim());

    let template = ToolsTemplate {
        layout: Layout::new(&identity, "/tools"),
        tabs: tabs(selected),
        tools: catalog::tools(selected),
    };
    Ok(Html(template.render()?))
}

/// Render a tool workspace.
///
/// GET /tools/{id}
#[instrument(skip(identity))]
async fn workspace(
    RequireIdentity(identity): RequireIdentity,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let Some(tool) = catalog::tool(&id) else {
        return missing_page(&identity, id);
    };
    Ok(workspace_page(&identity, tool, String::new(), None, None)?.into_response())
}

/// Generate copy with a tool.
///
/// POST /tools/{id}
#[instrument(skip(state, identity, form), fields(input_len = form.input.len()))]
async fn generate_with_tool(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Path(id): Path<String>,
    Form(form): Form<ToolForm>,
) -> Result<Response, AppError> {
    let Some(tool) = catalog::tool(&id) else {
        return missing_page(&identity, id);
    };
    let (output, error) = generate(&state, tool.id, &form.input).await;
    Ok(workspace_page(&identity, tool, form.input, output, error)?.into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use viralcopy_core::{Email, Role, UserId};

    fn identity() -> Identity {
        Identity {
            id: UserId::new("user-123"),
            email: Email::parse("sam.writer@viralcopy.ai").unwrap(),
            name: "Sam Writer".to_string(),
            role: Role::User,
            avatar_ref: None,
            company: None,
            phone: None,
        }
    }

    #[test]
    fn test_tabs_mark_selection() {
        let all = tabs(None);
        assert_eq!(all.len(), ToolCategory::ALL.len() + 1);
        assert!(all.first().is_some_and(|t| t.active));
        assert!(all.iter().skip(1).all(|t| !t.active));

        let seo = tabs(Some(ToolCategory::Seo));
        let active: Vec<_> = seo.iter().filter(|t| t.active).map(|t| t.value).collect();
        assert_eq!(active, vec!["seo"]);
    }

    #[test]
    fn test_missing_page_links_back_to_library() {
        let identity = identity();
        let response = missing_page(&identity, "99".to_string()).unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let html = ToolMissingTemplate {
            layout: Layout::new(&identity, "/tools"),
            id: "99".to_string(),
        }
        .render()
        .unwrap();
        assert!(html.contains("Tool not found"));
        assert!(html.contains("Browse the tool library"));
        assert!(html.contains("nav-link active"));
    }
}
