//! Helpers shared by the REST router tests.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tower::util::ServiceExt; // for `oneshot`

use crate::config::AppConfig;
use crate::{initialize_backend, AppState};

pub async fn setup_test_state() -> AppState {
    let config = AppConfig {
        filter_debounce: Duration::from_millis(20),
        ..AppConfig::default()
    };
    initialize_backend(config).await.expect("Failed to initialize test backend")
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

pub async fn get_json<T: DeserializeOwned>(app: Router, uri: &str) -> (StatusCode, T) {
    let (status, body) = send(app, Method::GET, uri, None).await;
    (status, serde_json::from_slice(&body).unwrap())
}

pub async fn post_json<T: DeserializeOwned>(app: Router, uri: &str, body: Value) -> (StatusCode, T) {
    let (status, body) = send(app, Method::POST, uri, Some(body)).await;
    (status, serde_json::from_slice(&body).unwrap())
}
