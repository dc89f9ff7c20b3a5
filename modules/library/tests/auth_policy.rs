#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::http::{Method, StatusCode};
use serde_json::json;
use shelf_security::PolicyKind;
use shelf_security::context::{SUBJECT_ID_HEADER, SUBJECT_ROLE_HEADER};

mod support;
use support::{TestApp, request};

async fn guarded() -> TestApp {
    TestApp::with_policy(PolicyKind::AuthenticatedWrites).await
}

#[tokio::test]
async fn test_reads_are_open() {
    let app = guarded().await;
    app.author("Pat", "Rothfuss").await;

    let resp = app.get("/api/authors").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.items().len(), 1);
}

#[tokio::test]
async fn test_anonymous_write_is_unauthorized() {
    let app = guarded().await;
    let body = json!({"data": {"given_name": "Pat", "family_name": "Rothfuss"}});

    let resp = app.post("/api/authors", &body).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body, json!({"error": {"message": "Unauthorized"}}));

    let resp = app
        .send(request(
            Method::POST,
            "/api/authors",
            Some(&body),
            &[(SUBJECT_ID_HEADER, "1")],
        ))
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_garbage_subject_is_anonymous() {
    let app = guarded().await;
    let id = app.author("Pat", "Rothfuss").await;

    let resp = app
        .send(request(
            Method::DELETE,
            &format!("/api/authors/{id}"),
            None,
            &[(SUBJECT_ID_HEADER, "not-a-number")],
        ))
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_users_are_owner_guarded() {
    let app = guarded().await;
    let john = app.user("john@example.com", "John", "Doe").await;
    let juan = app.user("juan@example.com", "Juan", "Perez").await;
    let admin = app.user("root@example.com", "Ada", "Admin").await;
    let rename = json!({"data": {"given_name": "Jon"}});

    let juan_id = juan.to_string();
    let resp = app
        .send(request(
            Method::PATCH,
            &format!("/api/users/{john}"),
            Some(&rename),
            &[(SUBJECT_ID_HEADER, juan_id.as_str())],
        ))
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
    assert_eq!(resp.body, json!({"error": {"message": "Forbidden"}}));

    let john_id = john.to_string();
    let resp = app
        .send(request(
            Method::PATCH,
            &format!("/api/users/{john}"),
            Some(&rename),
            &[(SUBJECT_ID_HEADER, john_id.as_str())],
        ))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.data()["given_name"], "Jon");

    let admin_id = admin.to_string();
    let resp = app
        .send(request(
            Method::DELETE,
            &format!("/api/users/{john}"),
            None,
            &[
                (SUBJECT_ID_HEADER, admin_id.as_str()),
                (SUBJECT_ROLE_HEADER, "admin"),
            ],
        ))
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let resp = app
        .send(request(
            Method::DELETE,
            &format!("/api/users/{juan}"),
            None,
            &[(SUBJECT_ID_HEADER, juan_id.as_str())],
        ))
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_denial_happens_before_lookup() {
    let app = guarded().await;

    let resp = app.delete("/api/books/581832481").await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}
