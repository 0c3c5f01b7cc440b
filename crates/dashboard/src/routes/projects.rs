//! Project list and detail screens.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use viralcopy_core::{Identity, Project, ProjectId, ProjectStatus};

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireIdentity;
use crate::services::{DataError, NewProject, ProjectUpdate};
use crate::state::AppState;

use super::{Layout, SearchParams, submitted};

/// Project kinds offered by the "new project" form.
pub const PROJECT_KINDS: &[&str] = &[
    "Email Marketing",
    "Social Media",
    "Landing Page",
    "Ad Copy",
    "Blog Post",
    "Sales Script",
];

/// One row of the project list.
#[derive(Debug, Clone)]
pub struct ProjectRow {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub status: &'static str,
    pub status_label: &'static str,
    pub created: String,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.to_string(),
            name: project.name.clone(),
            kind: project.kind.clone(),
            status: project.status.as_str(),
            status_label: project.status.label(),
            created: project.created_at.format("%b %d, %Y").to_string(),
        }
    }
}

/// Option of the status select.
#[derive(Debug, Clone)]
pub struct StatusOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Project list template.
#[derive(Template)]
#[template(path = "projects/index.html")]
pub struct ProjectsTemplate {
    pub layout: Layout,
    pub projects: Vec<ProjectRow>,
    pub search: String,
    pub kinds: &'static [&'static str],
    pub error: Option<String>,
}

/// Project detail template.
#[derive(Template)]
#[template(path = "projects/show.html")]
pub struct ProjectTemplate {
    pub layout: Layout,
    pub project: ProjectRow,
    pub brief: String,
    pub content: String,
    pub statuses: Vec<StatusOption>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProjectForm {
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub brief: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProjectForm {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub status: Option<String>,
    pub brief: Option<String>,
    pub content: Option<String>,
}

/// Build the projects router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list).post(create))
        .route("/projects/{id}", get(show).post(update))
        .route("/projects/{id}/duplicate", post(duplicate))
        .route("/projects/{id}/delete", post(delete))
}

fn project_path(id: &ProjectId) -> String {
    format!("/projects/{}", urlencoding::encode(id.as_str()))
}

async fn render_list(
    state: &AppState,
    identity: &Identity,
    search: &SearchParams,
    error: Option<String>,
) -> Result<Html<String>, AppError> {
    let projects = state.data().list_projects(search.term()).await;
    let template = ProjectsTemplate {
        layout: Layout::new(identity, "/projects"),
        projects: projects.iter().map(ProjectRow::from).collect(),
        search: search.q.clone(),
        kinds: PROJECT_KINDS,
        error,
    };
    Ok(Html(template.render()?))
}

fn render_detail(
    identity: &Identity,
    project: &Project,
    error: Option<String>,
) -> Result<Html<String>, AppError> {
    let template = ProjectTemplate {
        layout: Layout::new(identity, &project_path(&project.id)),
        project: ProjectRow::from(project),
        brief: project.brief.clone().unwrap_or_default(),
        content: project.content.clone().unwrap_or_default(),
        statuses: ProjectStatus::ALL
            .iter()
            .map(|s| StatusOption {
                value: s.as_str(),
                label: s.label(),
                selected: *s == project.status,
            })
            .collect(),
        error,
    };
    Ok(Html(template.render()?))
}

/// Render the project list.
///
/// GET /projects
#[instrument(skip(state, identity))]
async fn list(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Query(search): Query<SearchParams>,
) -> Result<Html<String>, AppError> {
    render_list(&state, &identity, &search, None).await
}

/// Create a project and open it.
///
/// POST /projects
#[instrument(skip(state, identity, form), fields(name = %form.name))]
async fn create(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Form(form): Form<CreateProjectForm>,
) -> Result<Response, AppError> {
    let new = NewProject {
        name: form.name,
        kind: form.kind,
        status: ProjectStatus::Draft,
        brief: Some(form.brief),
        content: None,
    };

    match state.data().create_project(new).await {
        Ok(project) => Ok(Redirect::to(&project_path(&project.id)).into_response()),
        Err(DataError::InvalidInput(message)) => {
            let page = render_list(&state, &identity, &SearchParams::default(), Some(message))
                .await?;
            Ok(page.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Render one project.
///
/// GET /projects/{id}
#[instrument(skip(state, identity))]
async fn show(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let project = state.data().get_project(&ProjectId::new(id)).await?;
    render_detail(&identity, &project, None)
}

/// Save edits to a project.
///
/// POST /projects/{id}
#[instrument(skip(state, identity, form))]
async fn update(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Path(id): Path<String>,
    Form(form): Form<UpdateProjectForm>,
) -> Result<Response, AppError> {
    let id = ProjectId::new(id);
    let status = form
        .status
        .as_deref()
        .map(str::parse::<ProjectStatus>)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let update = ProjectUpdate {
        name: submitted(form.name),
        kind: submitted(form.kind),
        status,
        brief: form.brief,
        content: form.content,
    };

    match state.data().update_project(&id, update).await {
        Ok(project) => Ok(Redirect::to(&project_path(&project.id)).into_response()),
        Err(DataError::InvalidInput(message)) => {
            let project = state.data().get_project(&id).await?;
            Ok(render_detail(&identity, &project, Some(message))?.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Duplicate a project and open the copy.
///
/// POST /projects/{id}/duplicate
#[instrument(skip(state, _identity))]
async fn duplicate(
    State(state): State<AppState>,
    RequireIdentity(_identity): RequireIdentity,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let copy = state.data().duplicate_project(&ProjectId::new(id)).await?;
    Ok(Redirect::to(&project_path(&copy.id)))
}

/// Delete a project.
///
/// POST /projects/{id}/delete
#[instrument(skip(state, _identity))]
async fn delete(
    State(state): State<AppState>,
    RequireIdentity(_identity): RequireIdentity,
    Path(id): Path<String>,
) -> Redirect {
    let id = ProjectId::new(id);
    if !state.data().delete_project(&id).await {
        tracing::debug!(project_id = %id, "Delete of missing project");
    }
    Redirect::to("/projects")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_project_row() {
        let project = Project {
            id: ProjectId::new("p-1"),
            name: "Spring Launch".to_string(),
            kind: "Email Marketing".to_string(),
            status: ProjectStatus::Completed,
            created_at: Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap(),
            brief: None,
            content: None,
        };
        let row = ProjectRow::from(&project);
        assert_eq!(row.status, "completed");
        assert_eq!(row.status_label, "Completed");
        assert_eq!(row.created, "Mar 09, 2024");
    }

    #[test]
    fn test_project_path_is_encoded() {
        assert_eq!(project_path(&ProjectId::new("p-1")), "/projects/p-1");
        assert_eq!(project_path(&ProjectId::new("a b")), "/projects/a%20b");
    }
}
