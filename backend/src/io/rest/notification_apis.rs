use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use log::info;
use serde::{Deserialize, Serialize};
use shared::{BackendFailure, ErrorNotification, FailureAction};
use uuid::Uuid;

use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DismissRequest {
    /// Dismiss only if this is still the current notification
    pub id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DismissResponse {
    pub dismissed: bool,
}

/// Create a router for notification related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/failures", post(report_failure))
        .route("/current", get(get_current))
        .route("/dismiss", post(dismiss))
}

/// Classify a failed upstream call and publish its notification
async fn report_failure(
    State(state): State<AppState>,
    Json(failure): Json<BackendFailure>,
) -> Json<FailureAction> {
    info!("POST /api/notifications/failures - status: {:?}", failure.status);
    Json(state.notification_service.handle(&failure))
}

async fn get_current(State(state): State<AppState>) -> Json<Option<ErrorNotification>> {
    Json(state.notification_service.current())
}

async fn dismiss(State(state): State<AppState>, Json(request): Json<DismissRequest>) -> Json<DismissResponse> {
    info!("POST /api/notifications/dismiss - id: {:?}", request.id);

    let dismissed = match request.id {
        Some(id) => state.notification_service.dismiss_if(id),
        None => {
            let had_one = state.notification_service.current().is_some();
            state.notification_service.dismiss();
            had_one
        }
    };
    Json(DismissResponse { dismissed })
}
