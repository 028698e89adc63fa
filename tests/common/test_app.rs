//! Test application setup utilities
//!
//! Builds in-process instances of the relay with the API routes and
//! request-counting middleware wired exactly as in `main`, minus the
//! static-file fallback. The Lyzr endpoint is pointed at whatever the test
//! supplies, normally a wiremock server.

use std::sync::Arc;

use axum::{body::Body, http::Request, Router};
use tower::ServiceExt;

use seo_guardian::{
    api, config::AppConfig, middleware, services::LyzrClient, AppState, ServiceMetrics,
};

/// Test application wrapper for integration testing
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Create a test application with no Lyzr API key configured
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a test application relaying to the given upstream base URL
    pub fn with_upstream(upstream_base: &str) -> Self {
        let mut config = test_config();
        config.lyzr.api_key = Some("test-api-key".to_string());
        config.lyzr.api_url = format!("{}/v3/inference/chat/", upstream_base);
        Self::with_config(config)
    }

    /// Create a test application with custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        let lyzr = LyzrClient::from_config(&config.lyzr)
            .expect("Failed to initialize Lyzr client")
            .map(Arc::new);

        let state = AppState {
            config,
            lyzr,
            metrics: Arc::new(ServiceMetrics::new()),
        };

        let router = api::routes()
            .layer(axum::middleware::from_fn_with_state(
                state.metrics.clone(),
                middleware::track_requests,
            ))
            .with_state(state.clone());

        Self { router, state }
    }

    /// Make a GET request to the test application
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> TestResponse {
        self.request(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Make an arbitrary request
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");

        TestResponse { status, body }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: axum::http::StatusCode,
    pub body: bytes::Bytes,
}

impl TestResponse {
    /// Get the response body as a string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Parse the response body as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Failed to parse response as JSON")
    }

    /// Assert the response status
    pub fn assert_status(&self, expected: axum::http::StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
        self
    }

    /// Assert the response status is OK (200)
    pub fn assert_ok(&self) -> &Self {
        self.assert_status(axum::http::StatusCode::OK)
    }

    /// Assert the response status is Bad Request (400)
    pub fn assert_bad_request(&self) -> &Self {
        self.assert_status(axum::http::StatusCode::BAD_REQUEST)
    }
}

/// Create a test configuration without touching the environment
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.server.serve_frontend = false;
    config.server.static_dir = None;
    // Keep the probe quick so failure tests don't wait out the default
    config.lyzr.probe_timeout_secs = 2;
    config
}
