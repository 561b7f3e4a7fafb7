//! # REST API for the Live Dashboard
//!
//! Drives the single dashboard instance held by [`crate::domain::DashboardController`].
//! Every endpoint returns the full dashboard state after the event settled.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use shared::{DashboardEvent, DashboardState, PeriodType};

use crate::io::rest::error::{ApiResult, AppError};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MountRequest {
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct PeriodTypeRequest {
    pub period_type: PeriodType,
}

#[derive(Debug, Deserialize)]
pub struct RangeRequest {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoadingResponse {
    pub loading: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_state))
        .route("/loading", get(get_loading))
        .route("/mount", post(mount))
        .route("/unmount", post(unmount))
        .route("/period-type", post(change_period_type))
        .route("/range", post(select_range))
        .route("/events", post(dispatch_event))
}

async fn get_state(State(state): State<AppState>) -> Json<DashboardState> {
    info!("GET /api/dashboard");
    Json(state.dashboard.state().await)
}

/// Whether a period load is in flight, for hosts that show their own spinner
async fn get_loading(State(state): State<AppState>) -> Json<LoadingResponse> {
    debug!("GET /api/dashboard/loading");
    Json(LoadingResponse {
        loading: state.dashboard.is_loading(),
    })
}

async fn mount(State(state): State<AppState>, Json(request): Json<MountRequest>) -> Json<DashboardState> {
    info!("POST /api/dashboard/mount - request: {:?}", request);

    let today = request.today.unwrap_or_else(|| Utc::now().date_naive());
    Json(state.dashboard.on_mount(today).await)
}

async fn unmount(State(state): State<AppState>) -> Json<DashboardState> {
    info!("POST /api/dashboard/unmount");
    Json(state.dashboard.on_unmount().await)
}

async fn change_period_type(
    State(state): State<AppState>,
    Json(request): Json<PeriodTypeRequest>,
) -> Json<DashboardState> {
    info!("POST /api/dashboard/period-type - {:?}", request.period_type);
    Json(state.dashboard.on_period_change(request.period_type).await)
}

async fn select_range(State(state): State<AppState>, Json(request): Json<RangeRequest>) -> Json<DashboardState> {
    info!("POST /api/dashboard/range - {} .. {}", request.start, request.end);
    Json(state.dashboard.select_range(request.start, request.end).await)
}

/// Dispatch a user event. Load results are produced internally and are not
/// accepted from clients.
async fn dispatch_event(
    State(state): State<AppState>,
    Json(event): Json<DashboardEvent>,
) -> ApiResult<Json<DashboardState>> {
    info!("POST /api/dashboard/events - {:?}", event);

    if matches!(event, DashboardEvent::ViewLoaded { .. } | DashboardEvent::LoadFailed { .. }) {
        warn!("Rejecting client-supplied load result");
        return Err(AppError::BadRequest("load results cannot be dispatched by clients".to_string()));
    }

    Ok(Json(state.dashboard.dispatch(event).await))
}
