//! Authentication route handlers.
//!
//! Login and registration are guest-only screens. A failed attempt re-renders
//! the form with an inline error and leaves the session untouched.

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use viralcopy_core::Identity;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::OptionalIdentity;
use crate::routes::table::{HOME_PATH, LOGIN_PATH};
use crate::services::AuthError;
use crate::services::auth::MIN_PASSWORD_LENGTH;
use crate::state::AppState;

/// Login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub email: String,
    pub error: Option<String>,
}

/// Registration page template.
#[derive(Template)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub name: String,
    pub email: String,
    pub error: Option<String>,
    pub min_password_length: usize,
}

impl RegisterTemplate {
    fn new(name: String, email: String, error: Option<String>) -> Self {
        Self {
            name,
            email,
            error,
            min_password_length: MIN_PASSWORD_LENGTH,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/register", get(register_page).post(register))
        .route("/logout", post(logout))
}

/// Render the login page.
///
/// GET /login
async fn login_page() -> Result<Html<String>, AppError> {
    let template = LoginTemplate {
        email: String::new(),
        error: None,
    };
    Ok(Html(template.render()?))
}

/// Sign in with email and password.
///
/// POST /login
#[instrument(skip(state, current, form), fields(email = %form.email))]
async fn login(
    State(state): State<AppState>,
    OptionalIdentity(current): OptionalIdentity,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if current.is_some() {
        return Ok(Redirect::to(HOME_PATH).into_response());
    }

    match state.auth().sign_in(&form.email, &form.password).await {
        Ok(identity) => Ok(establish(&state, identity)),
        Err(e @ (AuthError::PasswordHash | AuthError::UserNotFound)) => Err(e.into()),
        Err(e) => {
            tracing::info!(error = %e, "Sign-in rejected");
            let template = LoginTemplate {
                email: form.email,
                error: Some(e.user_message()),
            };
            Ok(Html(template.render()?).into_response())
        }
    }
}

/// Render the registration page.
///
/// GET /register
async fn register_page() -> Result<Html<String>, AppError> {
    let template = RegisterTemplate::new(String::new(), String::new(), None);
    Ok(Html(template.render()?))
}

/// Create an account and sign it in.
///
/// POST /register
#[instrument(skip(state, current, form), fields(email = %form.email))]
async fn register(
    State(state): State<AppState>,
    OptionalIdentity(current): OptionalIdentity,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    if current.is_some() {
        return Ok(Redirect::to(HOME_PATH).into_response());
    }

    let rejection = if form.password == form.confirm_password {
        match state
            .auth()
            .sign_up(&form.email, &form.password, Some(&form.name))
            .await
        {
            Ok(identity) => return Ok(establish(&state, identity)),
            Err(e @ AuthError::PasswordHash) => return Err(e.into()),
            Err(e) => e.user_message(),
        }
    } else {
        "Passwords do not match".to_string()
    };

    tracing::info!(reason = %rejection, "Registration rejected");
    let template = RegisterTemplate::new(form.name, form.email, Some(rejection));
    Ok(Html(template.render()?).into_response())
}

/// Sign out and clear the session.
///
/// POST /logout
#[instrument(skip_all)]
async fn logout(
    State(state): State<AppState>,
    OptionalIdentity(current): OptionalIdentity,
) -> Redirect {
    state.auth().sign_out(current.as_ref()).await;
    // A failed durable removal is logged by the store; the session is gone either way.
    let _ = state.session().clear();
    clear_sentry_user();
    Redirect::to(LOGIN_PATH)
}

/// Make `identity` current and send the browser home.
fn establish(state: &AppState, identity: Identity) -> Response {
    set_sentry_user(&identity);
    let _ = state.session().set_current(identity);
    Redirect::to(HOME_PATH).into_response()
}
