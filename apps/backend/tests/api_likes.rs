//! Like API tests.
//!
//! These tests require a running PostgreSQL database.

mod common;

use axum_test::TestServer;

use common::TestContext;

#[tokio::test]
#[ignore = "requires database"]
async fn test_like_is_idempotent() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let user = TestContext::unique_user();

    for _ in 0..2 {
        let response = server
            .put(&format!("/api/users/{}/likes/easy-1", user))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["liked"], true);
    }

    let response = server.get(&format!("/api/users/{}/likes", user)).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["word_ids"], serde_json::json!(["easy-1"]));

    ctx.cleanup_user(&user).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_unlike_removes_word() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let user = TestContext::unique_user();

    server.put(&format!("/api/users/{}/likes/easy-1", user)).await;
    server.put(&format!("/api/users/{}/likes/hard-2", user)).await;

    let response = server
        .delete(&format!("/api/users/{}/likes/easy-1", user))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["liked"], false);

    let response = server.get(&format!("/api/users/{}/likes", user)).await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["word_ids"], serde_json::json!(["hard-2"]));

    ctx.cleanup_user(&user).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_unlike_unknown_word_succeeds() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let user = TestContext::unique_user();

    let response = server
        .delete(&format!("/api/users/{}/likes/medium-3", user))
        .await;

    response.assert_status_ok();
}
