use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{NaiveDate, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use shared::{FinancialSnapshot, PeriodKey, PeriodMetrics, PeriodType, PeriodView, ProfitStatus};

use crate::io::rest::error::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub period_type: PeriodType,
    /// Start of the selected range; today when absent
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SnapshotResponse {
    /// Echo of the requested key; absent when it was malformed
    pub key: Option<PeriodKey>,
    pub snapshot: FinancialSnapshot,
    pub profit_margin: f64,
    pub expense_margin: f64,
    pub profit_status: ProfitStatus,
}

/// Create a router for period snapshot APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/resolve", get(resolve_snapshot))
        .route("/:key", get(get_snapshot))
        .route("/:key/metrics", get(get_metrics))
        .route("/:key/view", get(get_view))
}

fn snapshot_response(state: &AppState, key: Option<PeriodKey>, snapshot: FinancialSnapshot) -> SnapshotResponse {
    let profit_margin = state.snapshot_service.profit_margin(&snapshot);
    SnapshotResponse {
        key,
        expense_margin: state.snapshot_service.expense_margin(&snapshot),
        profit_status: state.snapshot_service.profit_status(profit_margin),
        profit_margin,
        snapshot,
    }
}

/// Snapshot for a raw key. Unknown or malformed keys get the default snapshot.
async fn get_snapshot(State(state): State<AppState>, Path(key): Path<String>) -> Json<SnapshotResponse> {
    info!("GET /api/snapshots/{}", key);

    let snapshot = state.snapshot_service.lookup_raw(&key);
    Json(snapshot_response(&state, key.parse().ok(), snapshot))
}

/// Derive the key from a period type and a start date, then look it up
async fn resolve_snapshot(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Json<SnapshotResponse> {
    info!("GET /api/snapshots/resolve - query: {:?}", query);

    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let key = state.snapshot_service.key_for(query.period_type, date);
    let snapshot = state.snapshot_service.lookup(&key);
    Json(snapshot_response(&state, Some(key), snapshot))
}

async fn get_metrics(State(state): State<AppState>, Path(key): Path<String>) -> ApiResult<Json<PeriodMetrics>> {
    info!("GET /api/snapshots/{}/metrics", key);

    let key: PeriodKey = key.parse().map_err(crate::error::DashboardError::from)?;
    Ok(Json(state.snapshot_service.metrics(&key)))
}

/// Snapshot, metrics and chart series for one key in a single payload
async fn get_view(State(state): State<AppState>, Path(key): Path<String>) -> ApiResult<Json<PeriodView>> {
    info!("GET /api/snapshots/{}/view", key);

    let key: PeriodKey = key.parse().map_err(crate::error::DashboardError::from)?;
    let records = state.repository.list()?;
    Ok(Json(state.period_view_builder.build(key, &records, state.config.opening_balance)))
}
