use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use log::info;
use serde::{Deserialize, Serialize};
use shared::{ChartPeriod, ChartSeries, PeriodKey, PeriodType};

use crate::error::DashboardError;
use crate::io::rest::error::ApiResult;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    /// Overrides the configured opening balance
    pub opening_balance: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartResponse {
    pub key: PeriodKey,
    pub series: ChartSeries,
}

/// Create a router for chart series APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:key", get(get_chart))
        .route("/:key/toggled", get(get_toggled_chart))
}

fn build_chart(state: &AppState, key: PeriodKey, query: &ChartQuery) -> ApiResult<ChartResponse> {
    let records = state.repository.list()?;
    let category = state.chart_series_builder.category_series(&key, &records);
    let opening_balance = query.opening_balance.unwrap_or(state.config.opening_balance);

    Ok(ChartResponse {
        key,
        series: state.chart_series_builder.build(&key, &category, opening_balance),
    })
}

async fn get_chart(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<ChartQuery>,
) -> ApiResult<Json<ChartResponse>> {
    info!("GET /api/charts/{} - query: {:?}", key, query);

    let key: PeriodKey = key.parse().map_err(DashboardError::from)?;
    Ok(Json(build_chart(&state, key, &query)?))
}

/// Chart of the other granularity: a month key becomes its year, a quarter or
/// year key becomes the first month it covers
async fn get_toggled_chart(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<ChartQuery>,
) -> ApiResult<Json<ChartResponse>> {
    info!("GET /api/charts/{}/toggled", key);

    let key: PeriodKey = key.parse().map_err(DashboardError::from)?;
    let target_type = match state.chart_series_builder.chart_period_for(&key).toggled() {
        ChartPeriod::DailyWithinMonth => PeriodType::Month,
        ChartPeriod::MonthlyWithinYear => PeriodType::Year,
    };
    let anchor = key.first_day().ok_or_else(|| DashboardError::InvalidDate { value: key.to_string() })?;
    let toggled = state.snapshot_service.key_for(target_type, anchor);

    Ok(Json(build_chart(&state, toggled, &query)?))
}
