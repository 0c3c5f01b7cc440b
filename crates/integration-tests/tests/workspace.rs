//! Copy generation, projects, reports and profile settings.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::http::{StatusCode, header};

use viralcopy_dashboard::session::{DurableStore, MemoryStore, PersistenceError, SessionStore};
use viralcopy_integration_tests::{Demo, TestContext, body_text, redirect_target};

/// Session storage that can read but never write.
struct ReadOnlyStore(MemoryStore);

impl DurableStore for ReadOnlyStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.0.load(key)
    }

    fn save(&self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
        Err(std::io::Error::other("read-only filesystem").into())
    }

    fn remove(&self, _key: &str) -> Result<(), PersistenceError> {
        Err(std::io::Error::other("read-only filesystem").into())
    }
}

#[tokio::test]
async fn test_magic_box_renders_generated_copy() {
    let ctx = TestContext::signed_in(Demo::User).await;

    let response = ctx
        .post_form("/magicbox", &[("prompt", "Spring sale for handmade candles")])
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Generated by magic-box: Spring sale for handmade candles"));
    assert_eq!(ctx.generator.calls(), 1);
}

#[tokio::test]
async fn test_blank_prompt_skips_generation() {
    let ctx = TestContext::signed_in(Demo::User).await;

    let response = ctx.post_form("/magicbox", &[("prompt", "   ")]).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        body_text(response)
            .await
            .contains("Describe what you need before generating.")
    );
    assert_eq!(ctx.generator.calls(), 0);
}

#[tokio::test]
async fn test_template_prefills_magic_box() {
    let ctx = TestContext::signed_in(Demo::User).await;

    let body = body_text(ctx.get("/magicbox?template=1").await).await;
    assert!(body.contains("Seed Launch Funnel"));

    // Unknown or malformed template ids fall back to an empty box
    assert_eq!(ctx.get("/magicbox?template=999").await.status(), StatusCode::OK);
    assert_eq!(ctx.get("/magicbox?template=abc").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_tool_workspace_generates_copy() {
    let ctx = TestContext::signed_in(Demo::User).await;

    let page = body_text(ctx.get("/tools/1").await).await;
    assert!(page.contains("A/B Test Generator"));

    let response = ctx
        .post_form("/tools/1", &[("input", "Noise cancelling headphones")])
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        body_text(response)
            .await
            .contains("Noise cancelling headphones")
    );
    assert_eq!(ctx.generator.calls(), 1);
}

#[tokio::test]
async fn test_unknown_tool_is_not_found() {
    let ctx = TestContext::signed_in(Demo::User).await;

    let response = ctx.get("/tools/unknown").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_text(response).await;
    assert!(body.contains("Tool not found"));
    assert!(body.contains("Browse the tool library"));
    assert!(body.contains("AI Tools"), "rendered inside the layout");

    let response = ctx.post_form("/tools/unknown", &[("input", "anything")]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Tool not found"));
    assert_eq!(ctx.generator.calls(), 0);
}

#[tokio::test]
async fn test_project_lifecycle() {
    let ctx = TestContext::signed_in(Demo::User).await;

    let created = ctx
        .post_form(
            "/projects",
            &[
                ("name", "Spring Launch"),
                ("kind", "Landing Page"),
                ("brief", "Hero copy for the spring drop"),
            ],
        )
        .await;
    let detail_path = redirect_target(&created)
        .expect("create should redirect to the project")
        .to_owned();
    assert!(detail_path.starts_with("/projects/"));

    let detail = ctx.get(&detail_path).await;
    assert_eq!(detail.status(), StatusCode::OK);
    let body = body_text(detail).await;
    assert!(body.contains("Spring Launch"));
    assert!(body.contains("Hero copy for the spring drop"));

    let listing = body_text(ctx.get("/projects?q=spring").await).await;
    assert!(listing.contains("Spring Launch"));

    let deleted = ctx.post_form(&format!("{detail_path}/delete"), &[]).await;
    assert_eq!(redirect_target(&deleted), Some("/projects"));
    assert_eq!(ctx.get(&detail_path).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_project_without_name_shows_error() {
    let ctx = TestContext::signed_in(Demo::User).await;

    let response = ctx
        .post_form("/projects", &[("name", "  "), ("kind", "Landing Page"), ("brief", "")])
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("is required"));
}

#[tokio::test]
async fn test_admin_exports_csv() {
    let ctx = TestContext::signed_in(Demo::Admin).await;

    let response = ctx.get("/reports/export.csv").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"viralcopy_analytics.csv\""
    );
    let body = body_text(response).await;
    assert!(body.starts_with("Type,Projects,Conversion\n"));
    assert!(body.lines().count() > 1);
}

#[tokio::test]
async fn test_settings_update_changes_session() {
    let ctx = TestContext::signed_in(Demo::User).await;

    let response = ctx
        .post_form(
            "/settings",
            &[
                ("name", "Sam Rivers"),
                ("company", "Rivers Studio"),
                ("phone", ""),
                ("avatar", ""),
            ],
        )
        .await;

    assert_eq!(
        redirect_target(&response),
        Some("/settings?success=profile_updated")
    );
    let current = ctx.current().expect("still signed in");
    assert_eq!(current.name, "Sam Rivers");
    assert_eq!(current.company.as_deref(), Some("Rivers Studio"));

    let page = body_text(ctx.get("/settings?success=profile_updated").await).await;
    assert!(page.contains("Your profile has been updated."));
    assert!(page.contains("Sam Rivers"));
}

#[tokio::test]
async fn test_settings_update_without_durable_storage_reads_as_success() {
    let ctx = TestContext::with_session(SessionStore::hydrate(Arc::new(ReadOnlyStore(
        MemoryStore::new(),
    ))));
    ctx.sign_in(Demo::User).await;

    let response = ctx
        .post_form("/settings", &[("name", "Sam Rivers"), ("avatar", "")])
        .await;

    assert_eq!(
        redirect_target(&response),
        Some("/settings?success=profile_updated")
    );
    assert_eq!(ctx.current().map(|i| i.name), Some("Sam Rivers".to_owned()));

    let page = body_text(ctx.get("/settings?success=profile_updated").await).await;
    assert!(page.contains("Your profile has been updated."));
    assert!(!page.contains("disk"));
}

#[tokio::test]
async fn test_settings_ignores_unknown_success_code() {
    let ctx = TestContext::signed_in(Demo::User).await;

    let page = body_text(ctx.get("/settings?success=pwned").await).await;
    assert!(!page.contains("pwned"));
}

#[tokio::test]
async fn test_settings_rejects_bad_avatar() {
    let ctx = TestContext::signed_in(Demo::User).await;

    let response = ctx
        .post_form("/settings", &[("name", "Sam Rivers"), ("avatar", "ftp://example.com/me.png")])
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        ctx.current().map(|i| i.name),
        Some("Sam Writer".to_owned())
    );
}
