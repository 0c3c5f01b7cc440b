//! Magic Box: free-form copy generation.
//!
//! A strategy template can pre-fill the prompt via `?template=<id>`.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use crate::claude::{ClaudeError, MAGIC_BOX};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireIdentity;
use crate::services::catalog;
use crate::state::AppState;

use super::Layout;

/// Magic Box page template.
#[derive(Template)]
#[template(path = "magicbox.html")]
pub struct MagicBoxTemplate {
    pub layout: Layout,
    pub prompt: String,
    pub template_title: Option<&'static str>,
    pub output: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MagicBoxParams {
    pub template: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MagicBoxForm {
    pub prompt: String,
}

/// Build the Magic Box router.
pub fn router() -> Router<AppState> {
    Router::new().route("/magicbox", get(magic_box).post(generate_magic_box))
}

/// Generate copy, turning failures into the message shown in the output panel.
///
/// Blank input is rejected here so no generator is ever called with it.
pub(super) async fn generate(
    state: &AppState,
    tool: &str,
    input: &str,
) -> (Option<String>, Option<String>) {
    if input.trim().is_empty() {
        return (None, Some(ClaudeError::EmptyInput.user_message()));
    }

    let result = match state.generator() {
        Ok(generator) => generator.generate_copy(tool, input).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(output) => (Some(output), None),
        Err(e) => {
            match &e {
                ClaudeError::NotConfigured | ClaudeError::EmptyInput => {
                    tracing::info!(tool, error = %e, "Generation skipped");
                }
                _ => tracing::warn!(tool, error = %e, "Generation failed"),
            }
            (None, Some(e.user_message()))
        }
    }
}

/// Render the Magic Box.
///
/// GET /magicbox
#[instrument(skip(identity))]
async fn magic_box(
    RequireIdentity(identity): RequireIdentity,
    Query(params): Query<MagicBoxParams>,
) -> Result<Html<String>, AppError> {
    let selected = params
        .template
        .as_deref()
        .and_then(|id| id.trim().parse().ok())
        .and_then(catalog::template);

    let template = MagicBoxTemplate {
        layout: Layout::new(&identity, "/magicbox"),
        prompt: selected
            .map(|t| t.prompt_context.to_string())
            .unwrap_or_default(),
        template_title: selected.map(|t| t.title),
        output: None,
        error: None,
    };
    Ok(Html(template.render()?))
}

/// Generate copy from the Magic Box prompt.
///
/// POST /magicbox
#[instrument(skip_all, fields(prompt_len = form.prompt.len()))]
async fn generate_magic_box(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Form(form): Form<MagicBoxForm>,
) -> Result<Html<String>, AppError> {
    let (output, error) = generate(&state, MAGIC_BOX, &form.prompt).await;

    let template = MagicBoxTemplate {
        layout: Layout::new(&identity, "/magicbox"),
        prompt: form.prompt,
        template_title: None,
        output,
        error,
    };
    Ok(Html(template.render()?))
}
