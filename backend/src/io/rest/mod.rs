//! # REST API Interface Layer
//!
//! HTTP endpoints for the dashboard core. Each `*_apis` module owns one area
//! and exposes a `router()` nested under `/api` by [`api_router`].
//!
//! Handlers are pure translation: they parse the request, call one domain
//! service and shape the response. Errors go through [`error::AppError`] so
//! every failure body has the same `{code, message}` shape.

pub mod calendar_apis;
pub mod chart_apis;
pub mod dashboard_apis;
pub mod error;
pub mod export_apis;
pub mod notification_apis;
pub mod range_apis;
pub mod snapshot_apis;
pub mod transaction_apis;
pub mod validation_apis;

#[cfg(test)]
pub(crate) mod test_utils;

use axum::Router;

use crate::AppState;

pub use error::{ApiError, ApiResult, AppError};

/// Every REST area, ready to be nested under `/api`
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/calendar", calendar_apis::router())
        .nest("/range", range_apis::router())
        .nest("/snapshots", snapshot_apis::router())
        .nest("/charts", chart_apis::router())
        .nest("/dashboard", dashboard_apis::router())
        .nest("/transactions", transaction_apis::router())
        .nest("/export", export_apis::router())
        .nest("/notifications", notification_apis::router())
        .nest("/validation", validation_apis::router())
}
