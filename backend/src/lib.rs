//! # Finnza Backend
//!
//! Contains all non-UI logic for the Finnza financial dashboard.
//!
//! This crate brings together:
//! - **Domain**: Calendar grids, the range picker, period snapshots, chart
//!   series, filtering and the dashboard state machine
//! - **Storage**: The transaction store and its seed data
//! - **IO**: The REST surface any host UI talks to
//!
//! ## Architecture
//!
//! ```text
//! Host UI (web, desktop)
//!     ↓
//! IO Layer (REST API)
//!     ↓
//! Domain Layer (services, boundary mapper, dashboard controller)
//!     ↓
//! Storage Layer (in-memory repository, seed data)
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use log::{info, warn};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::domain::{
    CalendarService, ChartSeriesBuilder, DashboardController, DashboardReducer, ExportService,
    FormValidationService, NotificationService, PeriodLoader, PeriodViewBuilder, RangeSelector, SnapshotService,
    StaticSnapshotProvider, TextFilterDebouncer, TransactionFilterService, TransactionMapper, TransactionTableService,
};
use crate::storage::{InMemoryTransactionRepository, TransactionRepository};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub calendar_service: CalendarService,
    pub range_selector: RangeSelector,
    pub snapshot_service: SnapshotService,
    pub chart_series_builder: ChartSeriesBuilder,
    pub period_view_builder: PeriodViewBuilder,
    pub filter_service: TransactionFilterService,
    pub transaction_table_service: TransactionTableService,
    pub export_service: ExportService,
    pub form_validation_service: FormValidationService,
    pub notification_service: NotificationService,
    pub search_debouncer: TextFilterDebouncer,
    pub dashboard: DashboardController,
    pub repository: Arc<dyn TransactionRepository>,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: AppConfig) -> Result<AppState> {
    info!("Loading transaction seed");
    let raws = storage::seed::load_seed(config.seed_file.as_deref())
        .with_context(|| format!("loading seed data from {:?}", config.seed_file))?;
    let records = TransactionMapper::to_records(raws).context("validating seed transactions")?;
    info!("Seeded {} transactions", records.len());
    let repository: Arc<dyn TransactionRepository> = Arc::new(InMemoryTransactionRepository::new(records));

    info!("Setting up domain model");
    let calendar_service = CalendarService::new();
    let range_selector = RangeSelector::new(calendar_service.clone());
    let snapshot_service = SnapshotService::new();
    let chart_series_builder = ChartSeriesBuilder::new(calendar_service.clone());
    let period_view_builder = PeriodViewBuilder::new(snapshot_service.clone(), chart_series_builder.clone());

    let provider = StaticSnapshotProvider::new(
        period_view_builder.clone(),
        repository.clone(),
        config.opening_balance,
    );
    let loader = PeriodLoader::new(Arc::new(provider));
    let reducer = DashboardReducer::new(
        range_selector.clone(),
        snapshot_service.clone(),
        chart_series_builder.clone(),
    );
    let dashboard = DashboardController::new(reducer, loader, Utc::now().date_naive());

    info!("Setting up application state");
    Ok(AppState {
        notification_service: NotificationService::new(config.notification_ttl),
        search_debouncer: TextFilterDebouncer::new(config.filter_debounce),
        config: Arc::new(config),
        calendar_service,
        range_selector,
        snapshot_service,
        chart_series_builder,
        period_view_builder,
        filter_service: TransactionFilterService::new(),
        transaction_table_service: TransactionTableService::new(),
        export_service: ExportService::new(),
        form_validation_service: FormValidationService::new(),
        dashboard,
        repository,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);
    let cors = match app_state.config.allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(origin),
        Err(_) => {
            warn!(
                "Allowed origin {:?} is not a valid header value, allowing any origin",
                app_state.config.allowed_origin
            );
            cors.allow_origin(Any)
        }
    };

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", io::rest::api_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_utils::{get_json, post_json, setup_test_state};
    use axum::http::StatusCode;
    use serde_json::json;
    use shared::{DashboardState, FinancialSnapshot};
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_health_check() {
        let app = create_router(setup_test_state().await);
        let (status, body): (_, Value) = get_json(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_areas_are_nested_under_api() {
        let app = create_router(setup_test_state().await);

        let (status, body): (_, Value) = get_json(app.clone(), "/api/snapshots/2025").await;
        assert_eq!(status, StatusCode::OK);
        let snapshot: FinancialSnapshot = serde_json::from_value(body["snapshot"].clone()).unwrap();
        assert!(snapshot.revenue > 0.0);

        let (status, state): (_, DashboardState) =
            post_json(app, "/api/dashboard/mount", json!({ "today": "2025-11-03" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(state.selected_key.to_string(), "2025-11");
    }

    #[tokio::test]
    async fn test_missing_seed_file_fails_initialization() {
        let config = AppConfig {
            seed_file: Some(PathBuf::from("/nonexistent/finnza-seed.json")),
            ..AppConfig::default()
        };
        assert!(initialize_backend(config).await.is_err());
    }

    #[test]
    fn test_invalid_allowed_origin_still_builds_router() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut state = runtime.block_on(setup_test_state());
        state.config = Arc::new(AppConfig {
            allowed_origin: "bad\norigin".to_string(),
            ..AppConfig::default()
        });
        let _router = create_router(state);
    }
}
