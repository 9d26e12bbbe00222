//! Test utilities for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use proofmint_core::Address;
use proofmint_server::{config::ServerConfig, state::AppState};
use proofmint_store::SnapshotStore;
use serde_json::Value;
use tower::ServiceExt;

/// Deployer used by every test app; holds the admin and pauser roles
pub const ADMIN: &str = "0x00000000000000000000000000000000000000ad";

pub fn admin() -> Address {
    ADMIN.parse().unwrap()
}

/// Test application wrapper
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// In-memory registry with a fixed admin
    pub async fn new() -> Self {
        let state = AppState::new(ServerConfig::with_admin(admin()));
        Self {
            router: proofmint_server::create_router(state),
        }
    }

    /// Registry persisted to `store`, restoring whatever it already holds
    pub async fn with_store(store: Arc<dyn SnapshotStore>) -> Self {
        let state = AppState::restore(ServerConfig::with_admin(admin()), store)
            .await
            .unwrap();
        Self {
            router: proofmint_server::create_router(state),
        }
    }

    /// Get the router for making requests
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post(&self, uri: &str, caller: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json");
        if let Some(caller) = caller {
            builder = builder.header("X-Caller-Address", caller);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.send(request).await
    }

    /// POST an arbitrary body; `content_type` of `None` omits the header
    pub async fn post_raw(
        &self,
        uri: &str,
        caller: Option<&str>,
        content_type: Option<&str>,
        body: &str,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header("Content-Type", content_type);
        }
        if let Some(caller) = caller {
            builder = builder.header("X-Caller-Address", caller);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(Value::Null)
        };
        (status, json)
    }
}
