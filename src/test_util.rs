use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use async_trait::async_trait;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::app::build_app;
use crate::auth::store::{memory::MemoryStore, NewUser, StoreError, User, UserStore};
use crate::state::AppState;

pub(crate) fn test_app() -> Router {
    let (app, _store) = test_app_with_store();
    app
}

pub(crate) fn test_app_with_store() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let app = build_app(AppState::fake(store.clone()));
    (app, store)
}

/// Store whose every call fails as unavailable, for asserting that
/// outages surface as server errors rather than auth verdicts.
pub(crate) struct FailingStore;

impl FailingStore {
    fn unavailable() -> StoreError {
        StoreError::Unavailable(sqlx::Error::PoolTimedOut)
    }
}

#[async_trait]
impl UserStore for FailingStore {
    async fn create(&self, _new_user: NewUser) -> Result<User, StoreError> {
        Err(Self::unavailable())
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
        Err(Self::unavailable())
    }

    async fn find_by_token(&self, _token: &str) -> Result<Option<User>, StoreError> {
        Err(Self::unavailable())
    }
}

pub(crate) fn test_app_unavailable() -> Router {
    build_app(AppState::fake(Arc::new(FailingStore)))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.expect("request should run");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

pub(crate) async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    send(app, req).await
}

pub(crate) async fn get_with_auth(
    app: &Router,
    path: &str,
    auth: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(token) = auth {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    let req = builder.body(Body::empty()).expect("request should build");
    send(app, req).await
}
