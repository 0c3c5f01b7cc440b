//! Client management.

use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use tracing::instrument;

use viralcopy_core::Client;

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireIdentity;
use crate::services::data::ClientSummary;
use crate::state::AppState;

use super::{Layout, SearchParams};

/// One row of the client table.
#[derive(Debug, Clone)]
pub struct ClientRow {
    pub name: String,
    pub email: String,
    pub company: String,
    pub status: &'static str,
    pub status_label: &'static str,
    pub plan: &'static str,
    pub projects: u32,
    pub since: String,
}

impl From<&Client> for ClientRow {
    fn from(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            email: client.email.to_string(),
            company: client.company.clone().unwrap_or_default(),
            status: client.status.as_str(),
            status_label: client.status.label(),
            plan: client.plan.label(),
            projects: client.projects_count,
            since: client.created_at.format("%b %d, %Y").to_string(),
        }
    }
}

/// Clients page template.
#[derive(Template)]
#[template(path = "clients.html")]
pub struct ClientsTemplate {
    pub layout: Layout,
    pub summary: ClientSummary,
    pub clients: Vec<ClientRow>,
    pub search: String,
}

/// Build the clients router.
pub fn router() -> Router<AppState> {
    Router::new().route("/clients", get(clients))
}

/// Render the client list.
///
/// GET /clients
#[instrument(skip(state, identity))]
async fn clients(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Query(search): Query<SearchParams>,
) -> Result<Html<String>, AppError> {
    let data = state.data();
    let clients = data.list_clients(search.term()).await;

    let template = ClientsTemplate {
        layout: Layout::new(&identity, "/clients"),
        summary: data.client_summary().await,
        clients: clients.iter().map(ClientRow::from).collect(),
        search: search.q,
    };
    Ok(Html(template.render()?))
}
