#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use loyalty_maturity::{
    app::create_router,
    app_state::AppState,
    config::Config,
    db::{AssessmentStore, MemoryAssessmentStore, StoreError},
    quiz::{Catalog, QuizAssessment, QuizResponse, QuizResult},
};

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryAssessmentStore>,
}

pub fn test_app() -> TestApp {
    test_app_with(Config::default())
}

pub fn test_app_with(config: Config) -> TestApp {
    let store = Arc::new(MemoryAssessmentStore::new());
    let state = AppState::new(config, Catalog::builtin(), store.clone());
    TestApp {
        router: create_router(state),
        store,
    }
}

/// Store that refuses every write
pub struct FailingStore;

#[async_trait]
impl AssessmentStore for FailingStore {
    async fn create(
        &self,
        _responses: Vec<QuizResponse>,
        _result: QuizResult,
    ) -> Result<QuizAssessment, StoreError> {
        Err(StoreError::Poisoned)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Poisoned)
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}

pub fn failing_app() -> Router {
    let state = AppState::new(Config::default(), Catalog::builtin(), Arc::new(FailingStore));
    create_router(state)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();

    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
    }
}

pub async fn get(router: &Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    send(router, request).await
}

pub async fn post_json(router: &Router, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request");
    send(router, request).await
}

pub async fn post_form(router: &Router, uri: &str, fields: &[(String, String)]) -> TestResponse {
    let body = fields
        .iter()
        .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .expect("valid request");
    send(router, request).await
}

fn encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            other => format!("%{:02X}", other),
        })
        .collect()
}

/// Every built-in item answered the same way, as API JSON
pub fn all_responses_json(deployed: bool) -> String {
    let responses: Vec<QuizResponse> = Catalog::builtin()
        .items()
        .iter()
        .map(|item| QuizResponse::new(item.id.clone(), deployed))
        .collect();
    serde_json::json!({ "responses": responses }).to_string()
}
