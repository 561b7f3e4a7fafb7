use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{Datelike, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use shared::CalendarMonthGrid;

use crate::io::rest::error::{ApiResult, AppError};
use crate::AppState;

// Query parameters for the month grid API. `date` wins over `month`/`year`;
// with neither, the current month is returned.
#[derive(Debug, Deserialize)]
pub struct CalendarMonthQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NavigationDirection {
    Previous,
    Next,
}

#[derive(Debug, Deserialize)]
pub struct CalendarNavigateQuery {
    pub month: u32,
    pub year: i32,
    pub direction: NavigationDirection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalendarMonthResponse {
    #[serde(flatten)]
    pub grid: CalendarMonthGrid,
    pub label: String,
    pub days_in_month: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentDateResponse {
    pub date: String,
    pub formatted: String,
    pub label: String,
}

/// Create a router for calendar related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/month", get(get_calendar_month))
        .route("/navigate", get(navigate_month))
        .route("/current-date", get(get_current_date))
}

fn month_response(state: &AppState, grid: CalendarMonthGrid) -> CalendarMonthResponse {
    CalendarMonthResponse {
        label: state.calendar_service.month_year_label(grid.month, grid.year),
        days_in_month: state.calendar_service.days_in_month(grid.month, grid.year),
        grid,
    }
}

/// Get the Sunday-first grid for one month
async fn get_calendar_month(
    State(state): State<AppState>,
    Query(query): Query<CalendarMonthQuery>,
) -> ApiResult<Json<CalendarMonthResponse>> {
    info!("GET /api/calendar/month - query: {:?}", query);

    let grid = match (query.date.as_deref(), query.month, query.year) {
        (Some(date), _, _) => {
            let date = state.calendar_service.parse_iso_date(date)?;
            state.calendar_service.build_month_grid(date)?
        }
        (None, Some(month), Some(year)) => state.calendar_service.build_grid_for(month, year)?,
        (None, None, None) => state.calendar_service.build_month_grid(Utc::now().date_naive())?,
        _ => return Err(AppError::BadRequest("month and year must be given together".to_string())),
    };

    Ok(Json(month_response(&state, grid)))
}

/// Grid of the month before or after the given one
async fn navigate_month(
    State(state): State<AppState>,
    Query(query): Query<CalendarNavigateQuery>,
) -> ApiResult<Json<CalendarMonthResponse>> {
    info!("GET /api/calendar/navigate - query: {:?}", query);

    let (month, year) = match query.direction {
        NavigationDirection::Previous => state.calendar_service.previous_month(query.month, query.year)?,
        NavigationDirection::Next => state.calendar_service.next_month(query.month, query.year)?,
    };
    let grid = state.calendar_service.build_grid_for(month, year)?;

    Ok(Json(month_response(&state, grid)))
}

async fn get_current_date(State(state): State<AppState>) -> Json<CurrentDateResponse> {
    info!("GET /api/calendar/current-date");

    let today = Utc::now().date_naive();
    Json(CurrentDateResponse {
        date: today.format("%Y-%m-%d").to_string(),
        formatted: state.calendar_service.format_date_for_display(today),
        label: state.calendar_service.month_year_label(today.month(), today.year()),
    })
}
