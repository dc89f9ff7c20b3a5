#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Test support utilities for `library` integration tests.
//!
//! Each [`TestApp`] owns a fresh in-memory `SQLite` database with migrations
//! applied and the full `/api` router on top of it.

#![allow(dead_code)] // Support module provides utilities that may not all be used

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use library::{Library, LibraryConfig};
use serde_json::{Value, json};
use shelf_db::DbConfig;
use shelf_security::PolicyKind;
use shelf_security::context::{ADMIN_ROLE, SUBJECT_ID_HEADER, SUBJECT_ROLE_HEADER};
use tower::ServiceExt;

pub const HOST: &str = "www.example.com";

pub struct TestApp {
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    pub fn items(&self) -> &Vec<Value> {
        self.body["data"].as_array().expect("data should be an array")
    }

    pub fn ids(&self) -> Vec<i64> {
        self.items()
            .iter()
            .map(|item| item["id"].as_i64().expect("id"))
            .collect()
    }

    pub fn invalid_params(&self) -> &Value {
        &self.body["error"]["invalid_params"]
    }

    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn link(&self) -> Option<&str> {
        self.header(header::LINK)
    }
}

pub fn keys(item: &Value) -> Vec<&str> {
    item.as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect()
}

/// Builds a request with `Host: www.example.com`; brackets in the query are
/// percent-encoded the way browsers send them.
pub fn request(
    method: Method,
    uri: &str,
    body: Option<&Value>,
    headers: &[(&str, &str)],
) -> Request<Body> {
    let uri = uri.replace('[', "%5B").replace(']', "%5D");
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, HOST);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_policy(PolicyKind::AllowAll).await
    }

    pub async fn with_policy(kind: PolicyKind) -> Self {
        Self::with_config(kind, &LibraryConfig::default()).await
    }

    pub async fn with_config(kind: PolicyKind, config: &LibraryConfig) -> Self {
        let conn = shelf_db::connect(&DbConfig::default())
            .await
            .expect("in-memory database");
        Library::migrate(&conn).await.expect("migrations");
        let library = Library::new(conn, config, kind.engine()).expect("library module");
        Self {
            router: library.router(),
        }
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(request(Method::GET, uri, None, &[])).await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(request(Method::POST, uri, Some(body), &[])).await
    }

    pub async fn patch(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(request(Method::PATCH, uri, Some(body), &[])).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(request(Method::DELETE, uri, None, &[])).await
    }

    /// Creates a record through the API as an admin and returns its id.
    async fn seed(&self, uri: &str, data: Value) -> i64 {
        let body = json!({ "data": data });
        let resp = self
            .send(request(
                Method::POST,
                uri,
                Some(&body),
                &[(SUBJECT_ID_HEADER, "1"), (SUBJECT_ROLE_HEADER, ADMIN_ROLE)],
            ))
            .await;
        assert_eq!(resp.status, StatusCode::CREATED, "seeding {uri}: {}", resp.body);
        resp.data()["id"].as_i64().expect("id")
    }

    pub async fn author(&self, given_name: &str, family_name: &str) -> i64 {
        self.seed(
            "/api/authors",
            json!({"given_name": given_name, "family_name": family_name}),
        )
        .await
    }

    pub async fn publisher(&self, name: &str) -> i64 {
        self.seed("/api/publishers", json!({"name": name})).await
    }

    pub async fn book(&self, title: &str, author_id: i64, publisher_id: Option<i64>) -> i64 {
        let mut data = json!({
            "title": title,
            "released_on": "2007-03-27",
            "author_id": author_id,
        });
        if let Some(publisher_id) = publisher_id {
            data["publisher_id"] = json!(publisher_id);
        }
        self.seed("/api/books", data).await
    }

    pub async fn user(&self, email: &str, given_name: &str, family_name: &str) -> i64 {
        self.seed(
            "/api/users",
            json!({"email": email, "given_name": given_name, "family_name": family_name}),
        )
        .await
    }

    /// Pat Rothfuss, Brandon Sanderson, Patricia Briggs.
    pub async fn three_authors(&self) -> [i64; 3] {
        [
            self.author("Pat", "Rothfuss").await,
            self.author("Brandon", "Sanderson").await,
            self.author("Patricia", "Briggs").await,
        ]
    }
}
