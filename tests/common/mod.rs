//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which builds an [`AppContext`] from a config and
//! drives the router in-process with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use episodic::config::Config;
use episodic::server::{create_router, AppContext};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub struct TestHarness {
    pub ctx: AppContext,
}

impl TestHarness {
    /// Harness with default config: in-memory catalog only.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            ctx: AppContext::new(config),
        }
    }

    /// Harness backed by a SQLite catalog inside `dir`.
    pub fn with_db(dir: &tempfile::TempDir) -> Self {
        let mut config = Config::default();
        config.storage.db_path = Some(dir.path().join("catalog.db"));
        Self::with_config(config)
    }

    /// Send one request and return the status plus JSON body (`Null` if empty).
    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = create_router(self.ctx.clone(), None)
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("PUT", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request("DELETE", uri, None).await
    }

    /// Create an episode through the API and return its id.
    pub async fn create(&self, title: &str) -> String {
        let (status, json) = self
            .post(
                "/api/episodes",
                serde_json::json!({
                    "title": title,
                    "audioUrl": format!("https://cdn.test/{}.mp3", title.replace(' ', "-")),
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {json}");
        json["id"].as_str().unwrap().to_string()
    }
}
