//! Profile settings.
//!
//! A saved profile replaces the session identity, so the header and the
//! persisted session pick up the change immediately.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use viralcopy_core::{AvatarRef, Identity, ProfileUpdate};

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireIdentity;
use crate::services::AuthError;
use crate::state::AppState;

use super::{Layout, submitted};

/// Settings page template.
#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub layout: Layout,
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub avatar: String,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

impl SettingsTemplate {
    fn new(identity: &Identity) -> Self {
        Self {
            layout: Layout::new(identity, "/settings"),
            name: identity.name.clone(),
            email: identity.email.to_string(),
            company: identity.company.clone().unwrap_or_default(),
            phone: identity.phone.clone().unwrap_or_default(),
            avatar: identity
                .avatar_ref
                .as_ref()
                .map(|a| a.src().to_string())
                .unwrap_or_default(),
            success_message: None,
            error_message: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SettingsQueryParams {
    pub success: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub name: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
}

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new().route("/settings", get(settings_page).post(update_profile))
}

/// Render the settings page.
///
/// GET /settings
#[instrument(skip(identity))]
async fn settings_page(
    RequireIdentity(identity): RequireIdentity,
    Query(params): Query<SettingsQueryParams>,
) -> Result<Html<String>, AppError> {
    let mut template = SettingsTemplate::new(&identity);
    template.success_message = params
        .success
        .filter(|s| s == "profile_updated")
        .map(|_| "Your profile has been updated.".to_owned());
    Ok(Html(template.render()?))
}

/// Save profile changes.
///
/// POST /settings
#[instrument(skip_all)]
async fn update_profile(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Form(form): Form<ProfileForm>,
) -> Result<Response, AppError> {
    let avatar_ref = match submitted(form.avatar).filter(|a| !a.is_empty()) {
        Some(raw) => match AvatarRef::parse(&raw) {
            Ok(avatar) => Some(avatar),
            Err(e) => {
                let mut template = SettingsTemplate::new(&identity);
                template.avatar = raw;
                template.error_message = Some(e.to_string());
                return Ok(Html(template.render()?).into_response());
            }
        },
        None => None,
    };

    let update = ProfileUpdate {
        name: submitted(form.name),
        company: submitted(form.company),
        phone: submitted(form.phone),
        avatar_ref,
    };

    let updated = match state.auth().update_profile(&identity.id, &update).await {
        Ok(updated) => updated,
        Err(AuthError::UserNotFound) => {
            // Accounts live in memory; a persisted session can outlive them.
            tracing::warn!(user_id = %identity.id, "Account missing, updating session only");
            let mut updated = identity;
            updated.apply(&update);
            updated
        }
        Err(e) => return Err(e.into()),
    };

    // The session store logs a failed durable write
    let _ = state.session().set_current(updated);
    Ok(Redirect::to("/settings?success=profile_updated").into_response())
}
