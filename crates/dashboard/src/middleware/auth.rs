//! Identity extractors.
//!
//! Navigations are already resolved by the gate; these extractors guard form
//! posts and give handlers the identity the request was authorized against.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use viralcopy_core::Identity;

use crate::routes::table::{HOME_PATH, LOGIN_PATH};
use crate::state::AppState;

/// Identity snapshot taken by the gate when the request arrived.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Option<Identity>);

fn identity_of(parts: &Parts, state: &AppState) -> Option<Identity> {
    parts
        .extensions
        .get::<CurrentIdentity>()
        .map_or_else(|| state.session().current(), |c| c.0.clone())
}

/// Extractor that requires an identity.
pub struct RequireIdentity(pub Identity);

/// Extractor that requires an identity with the admin role.
pub struct RequireAdmin(pub Identity);

/// Extractor for the identity, if any.
pub struct OptionalIdentity(pub Option<Identity>);

/// Rejection from the identity extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// No identity: go log in.
    RedirectToLogin,
    /// Identity lacks the role: go home.
    RedirectHome,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::RedirectHome => Redirect::to(HOME_PATH).into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireIdentity {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        identity_of(parts, state)
            .map(Self)
            .ok_or(AuthRejection::RedirectToLogin)
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = identity_of(parts, state).ok_or(AuthRejection::RedirectToLogin)?;
        if !identity.is_admin() {
            return Err(AuthRejection::RedirectHome);
        }
        Ok(Self(identity))
    }
}

impl FromRequestParts<AppState> for OptionalIdentity {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(identity_of(parts, state)))
    }
}
