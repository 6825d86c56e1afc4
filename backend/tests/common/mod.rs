//! Common test utilities for integration tests
//!
//! Each `TestApp` runs the router in-process against its own wiremock
//! server standing in for the upstream tracking API.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use recovery_calendar_backend::{
    config::{AppConfig, ServerConfig, UpstreamConfig},
    routes,
    state::AppState,
};
use tower::ServiceExt;
use wiremock::MockServer;

pub const ACCESS_TOKEN: &str = "access-token";
pub const REFRESH_TOKEN: &str = "refresh-token";

/// Test response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }
}

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub upstream: MockServer,
}

impl TestApp {
    /// Create a new test application with a fresh mock upstream
    pub async fn new() -> Self {
        let upstream = MockServer::start().await;
        let state = AppState::new(test_config(&upstream.uri())).expect("Failed to build state");
        let app = routes::create_router(state);

        Self { app, upstream }
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(body.to_vec()).unwrap(),
        }
    }

    /// Make an unauthenticated GET request
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Make a GET request with the default bearer token
    pub async fn get_auth(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .header("Authorization", format!("Bearer {ACCESS_TOKEN}"))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Make a GET request carrying both the access and refresh tokens
    pub async fn get_with_refresh(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .header("Authorization", format!("Bearer {ACCESS_TOKEN}"))
            .header("X-Refresh-Token", REFRESH_TOKEN)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .header("Content-Length", body.len())
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }
}

fn test_config(upstream_url: &str) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_secs: 5,
        },
        upstream: UpstreamConfig {
            base_url: upstream_url.to_string(),
            timeout_secs: 5,
            user_agent: "recovery-calendar-tests".to_string(),
        },
    }
}
