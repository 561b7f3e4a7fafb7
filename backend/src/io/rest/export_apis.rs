//! # REST API for Data Export
//!
//! Endpoints for exporting transaction data as CSV.

use axum::{extract::State, response::Json, routing::post, Router};
use log::info;
use shared::{ExportDataResponse, TransactionFilter};

use crate::io::rest::error::ApiResult;
use crate::AppState;

/// Create a router for export related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/csv", post(export_transactions_csv))
}

/// Export the records matching the posted filter as CSV data
pub async fn export_transactions_csv(
    State(state): State<AppState>,
    Json(filter): Json<TransactionFilter>,
) -> ApiResult<Json<ExportDataResponse>> {
    info!("POST /api/export/csv - filter: {:?}", filter);

    let records = state.repository.list()?;
    let filtered = state.filter_service.apply(&records, &filter);
    Ok(Json(state.export_service.export_transactions_csv(&filtered)?))
}
