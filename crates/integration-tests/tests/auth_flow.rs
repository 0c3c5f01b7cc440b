//! Sign-in, registration and sign-out through the HTTP surface.

use std::sync::Arc;

use axum::http::StatusCode;

use viralcopy_core::Role;
use viralcopy_dashboard::config::DEFAULT_DEMO_PASSWORD;
use viralcopy_dashboard::services::auth::{DEMO_ADMIN_EMAIL, DEMO_USER_EMAIL};
use viralcopy_dashboard::session::{FileStore, SessionStore};
use viralcopy_integration_tests::{Demo, TestContext, body_text, redirect_target};

#[tokio::test]
async fn test_login_sets_session_and_lands_home() {
    let ctx = TestContext::new();

    let response = ctx
        .post_form(
            "/login",
            &[("email", DEMO_ADMIN_EMAIL), ("password", DEFAULT_DEMO_PASSWORD)],
        )
        .await;

    assert_eq!(redirect_target(&response), Some("/"));
    let current = ctx.current().expect("session should hold the admin");
    assert_eq!(current.email.as_str(), DEMO_ADMIN_EMAIL);
    assert_eq!(current.role, Role::Admin);

    assert_eq!(ctx.get("/").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_is_case_insensitive_on_email() {
    let ctx = TestContext::new();

    let response = ctx
        .post_form(
            "/login",
            &[
                ("email", &DEMO_USER_EMAIL.to_uppercase()),
                ("password", DEFAULT_DEMO_PASSWORD),
            ],
        )
        .await;

    assert_eq!(redirect_target(&response), Some("/"));
    assert!(ctx.current().is_some());
}

#[tokio::test]
async fn test_failed_login_rerenders_form() {
    let ctx = TestContext::new();

    let response = ctx
        .post_form(
            "/login",
            &[("email", DEMO_USER_EMAIL), ("password", "wrong-password")],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Invalid email or password"));
    assert!(body.contains(DEMO_USER_EMAIL));
    assert!(ctx.current().is_none());
}

#[tokio::test]
async fn test_unknown_email_gets_same_message() {
    let ctx = TestContext::new();

    let response = ctx
        .post_form(
            "/login",
            &[("email", "nobody@viralcopy.ai"), ("password", DEFAULT_DEMO_PASSWORD)],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Invalid email or password"));
    assert!(ctx.current().is_none());
}

#[tokio::test]
async fn test_register_creates_creator_account() {
    let ctx = TestContext::new();

    let response = ctx
        .post_form(
            "/register",
            &[
                ("name", "Riley Quill"),
                ("email", "riley@example.com"),
                ("password", "correct-horse"),
                ("confirm_password", "correct-horse"),
            ],
        )
        .await;

    assert_eq!(redirect_target(&response), Some("/"));
    let current = ctx.current().expect("new account should be signed in");
    assert_eq!(current.name, "Riley Quill");
    assert_eq!(current.role, Role::User);

    // The new account can sign in again after logging out
    ctx.post_form("/logout", &[]).await;
    let again = ctx
        .post_form(
            "/login",
            &[("email", "riley@example.com"), ("password", "correct-horse")],
        )
        .await;
    assert_eq!(redirect_target(&again), Some("/"));
}

#[tokio::test]
async fn test_register_rejects_existing_email() {
    let ctx = TestContext::new();

    let response = ctx
        .post_form(
            "/register",
            &[
                ("name", "Imposter"),
                ("email", DEMO_USER_EMAIL),
                ("password", "correct-horse"),
                ("confirm_password", "correct-horse"),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        body_text(response)
            .await
            .contains("An account with this email already exists")
    );
    assert!(ctx.current().is_none());
}

#[tokio::test]
async fn test_register_rejects_mismatched_passwords() {
    let ctx = TestContext::new();

    let response = ctx
        .post_form(
            "/register",
            &[
                ("name", "Riley Quill"),
                ("email", "riley@example.com"),
                ("password", "correct-horse"),
                ("confirm_password", "battery-staple"),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Passwords do not match"));
    assert!(ctx.current().is_none());
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let ctx = TestContext::new();

    let response = ctx
        .post_form(
            "/register",
            &[
                ("name", "Riley Quill"),
                ("email", "riley@example.com"),
                ("password", "short"),
                ("confirm_password", "short"),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("at least 8 characters"));
    assert!(ctx.current().is_none());
}

#[tokio::test]
async fn test_logout_clears_session() {
    let ctx = TestContext::signed_in(Demo::User).await;

    let response = ctx.post_form("/logout", &[]).await;

    assert_eq!(redirect_target(&response), Some("/login"));
    assert!(ctx.current().is_none());
    assert_eq!(redirect_target(&ctx.get("/").await), Some("/login"));
}

#[tokio::test]
async fn test_signed_in_login_post_goes_home() {
    let ctx = TestContext::signed_in(Demo::User).await;

    let response = ctx
        .post_form(
            "/login",
            &[("email", DEMO_ADMIN_EMAIL), ("password", DEFAULT_DEMO_PASSWORD)],
        )
        .await;

    assert_eq!(redirect_target(&response), Some("/"));
    // The existing session is untouched
    assert_eq!(
        ctx.current().map(|i| i.email.as_str().to_owned()),
        Some(DEMO_USER_EMAIL.to_owned())
    );
}

#[tokio::test]
async fn test_session_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");

    let first = TestContext::with_session(SessionStore::hydrate(Arc::new(FileStore::new(
        dir.path(),
    ))));
    first
        .post_form(
            "/login",
            &[("email", DEMO_USER_EMAIL), ("password", DEFAULT_DEMO_PASSWORD)],
        )
        .await;
    assert!(first.state.session().is_durable());

    let second = TestContext::with_session(SessionStore::hydrate(Arc::new(FileStore::new(
        dir.path(),
    ))));
    assert_eq!(
        second.current().map(|i| i.email.as_str().to_owned()),
        Some(DEMO_USER_EMAIL.to_owned())
    );
    assert_eq!(second.get("/").await.status(), StatusCode::OK);

    second.post_form("/logout", &[]).await;
    let third = TestContext::with_session(SessionStore::hydrate(Arc::new(FileStore::new(
        dir.path(),
    ))));
    assert!(third.current().is_none());
}
