//! Sidebar navigation as rendered for each role.

use axum::http::StatusCode;

use viralcopy_integration_tests::{Demo, TestContext, body_text};

const MEMBER_ENTRIES: &[&str] = &[
    "Overview",
    "Magic Box",
    "AI Tools",
    "Templates",
    "Projects",
    "Settings",
];

const ADMIN_ENTRIES: &[&str] = &["Clients", "Reports", "Admin Panel"];

/// Sidebar entry labels in render order.
fn sidebar_labels(body: &str) -> Vec<String> {
    body.split("class=\"nav-link")
        .skip(1)
        .filter_map(|link| {
            let after_icon = link.split_once("</i>")?.1;
            let label = after_icon.split_once("</a>")?.0;
            Some(label.trim().to_owned())
        })
        .collect()
}

/// Label of the highlighted sidebar entry, if any.
fn active_label(body: &str) -> Option<String> {
    let link = body.split_once("class=\"nav-link active\"")?.1;
    let label = link.split_once("</i>")?.1.split_once("</a>")?.0;
    Some(label.trim().to_owned())
}

#[tokio::test]
async fn test_admin_sees_administration_group() {
    let ctx = TestContext::signed_in(Demo::Admin).await;

    let response = ctx.get("/settings").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;

    assert_eq!(
        sidebar_labels(&body),
        vec![
            "Overview",
            "Magic Box",
            "AI Tools",
            "Templates",
            "Projects",
            "Clients",
            "Reports",
            "Settings",
            "Admin Panel",
        ]
    );
    assert!(body.contains("Administration"));
}

#[tokio::test]
async fn test_user_never_sees_admin_entries() {
    let ctx = TestContext::signed_in(Demo::User).await;

    for path in ["/", "/magicbox", "/tools", "/templates", "/projects", "/settings"] {
        let body = body_text(ctx.get(path).await).await;
        assert_eq!(sidebar_labels(&body), MEMBER_ENTRIES, "path {path}");
        for entry in ADMIN_ENTRIES {
            assert!(!sidebar_labels(&body).iter().any(|l| l == entry), "{path} leaks {entry}");
        }
        assert!(!body.contains("Administration"), "{path} shows admin group");
    }
}

#[tokio::test]
async fn test_navigation_is_stable_across_requests() {
    let ctx = TestContext::signed_in(Demo::Admin).await;

    let first = sidebar_labels(&body_text(ctx.get("/").await).await);
    let second = sidebar_labels(&body_text(ctx.get("/projects").await).await);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_public_screens_have_no_sidebar() {
    let ctx = TestContext::new();

    let body = body_text(ctx.get("/login").await).await;
    assert!(sidebar_labels(&body).is_empty());
}

#[tokio::test]
async fn test_current_screen_is_highlighted() {
    let ctx = TestContext::signed_in(Demo::User).await;

    let tool = body_text(ctx.get("/tools/1").await).await;
    assert_eq!(active_label(&tool).as_deref(), Some("AI Tools"));

    let home = body_text(ctx.get("/").await).await;
    assert_eq!(active_label(&home).as_deref(), Some("Overview"));
}

#[tokio::test]
async fn test_sidebar_follows_session_change() {
    let ctx = TestContext::signed_in(Demo::User).await;
    let before = sidebar_labels(&body_text(ctx.get("/").await).await);
    assert_eq!(before, MEMBER_ENTRIES);

    ctx.post_form("/logout", &[]).await;
    ctx.sign_in(Demo::Admin).await;

    let after = sidebar_labels(&body_text(ctx.get("/").await).await);
    assert!(after.iter().any(|l| l == "Admin Panel"));
}

#[tokio::test]
async fn test_topbar_shows_identity() {
    let ctx = TestContext::new();
    let identity = ctx.sign_in(Demo::Admin).await;

    let body = body_text(ctx.get("/").await).await;
    assert!(body.contains(&identity.name));
    assert!(body.contains("Administrator"));
}
