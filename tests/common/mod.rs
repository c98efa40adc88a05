//! Shared fixtures for the REST tests

#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use fake::Fake;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::{FirstName, LastName};
use serde_json::{Value, json};
use tower::ServiceExt;

use miqa::api::{app_state::AppState, create_router};
use miqa::config::config::AppConfig;
use miqa::services::LogMailer;
use miqa::storage::SurrealPool;

/// HTTP client over an in-memory database
pub struct TestClient {
    pub state: AppState,
    app: Router,
}

impl TestClient {
    pub async fn new() -> Self {
        let config = AppConfig::in_memory();
        let pool = SurrealPool::new(config.database.clone()).await.unwrap();
        let state = AppState::new(pool, Box::new(LogMailer), &config)
            .await
            .unwrap();
        let app = create_router(state.clone(), &config.server.cors_origins);
        Self { state, app }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::HOST, "testserver");
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> Value {
        let (status, body) = self.request("GET", uri, None).await;
        assert_eq!(status, StatusCode::OK, "GET {} -> {}", uri, body);
        body
    }

    pub async fn post(&self, uri: &str, body: Value) -> Value {
        let (status, body) = self.request("POST", uri, Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "POST {} -> {}", uri, body);
        body
    }

    // ===== Factories =====

    pub async fn session(&self) -> Value {
        self.post(
            "/api/v1/sessions",
            json!({
                "name": format!("session {}", (1..10_000).fake::<u32>()),
                "importpath": "/data/import.csv",
                "exportpath": "/data/export.csv",
            }),
        )
        .await
    }

    pub async fn site(&self) -> Value {
        self.post("/api/v1/sites", json!({"name": FirstName().fake::<String>()}))
            .await
    }

    pub async fn user(&self) -> Value {
        let first: String = FirstName().fake();
        let last: String = LastName().fake();
        self.post(
            "/api/v1/users",
            json!({
                "username": format!("{}.{}", first, last).to_lowercase(),
                "email": "reviewer@example.com",
                "first_name": first,
                "last_name": last,
            }),
        )
        .await
    }

    pub async fn experiment(&self, session: &Value) -> Value {
        self.post(
            "/api/v1/experiments",
            json!({
                "name": format!("experiment {}", (1..10_000).fake::<u32>()),
                "note": Sentence(3..6).fake::<String>(),
                "session": session["id"],
            }),
        )
        .await
    }

    pub async fn scan(&self, experiment: &Value, site: &Value) -> Value {
        self.post(
            "/api/v1/scans",
            json!({
                "scan_id": format!("{:04}", (1..10_000).fake::<u32>()),
                "scan_type": "T1",
                "experiment": experiment["id"],
                "site": site["id"],
            }),
        )
        .await
    }

    pub async fn note(&self, scan: &Value, creator: &Value) -> Value {
        self.post(
            "/api/v1/scan_notes",
            json!({
                "note": Sentence(2..8).fake::<String>(),
                "scan": scan["id"],
                "creator": creator["id"],
            }),
        )
        .await
    }
}

/// Same elements in any order
pub fn assert_same_items(mut left: Vec<Value>, mut right: Vec<Value>) {
    let key = |v: &Value| v["id"].as_str().unwrap_or_default().to_string();
    left.sort_by_key(key);
    right.sort_by_key(key);
    assert_eq!(left, right);
}
