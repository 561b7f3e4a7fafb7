//! # REST API for the Range Picker
//!
//! The picker is stateless on the server: the client posts its current
//! state with one action and receives the next state, the highlighted grid
//! and, after a confirm, the committed range.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, Utc};
use log::info;
use serde::Deserialize;
use shared::{DateRange, RangePickerState, RangeTransitionRequest, RangeTransitionResponse};

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct InitialRangeQuery {
    pub today: Option<NaiveDate>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/initial", get(get_initial_state))
        .route("/transition", post(apply_transition))
}

fn respond(state: &AppState, picker: RangePickerState, emitted: Option<DateRange>) -> RangeTransitionResponse {
    RangeTransitionResponse {
        month_label: state.range_selector.month_label(&picker),
        cells: state.range_selector.highlighted_cells(&picker),
        state: picker,
        emitted,
    }
}

/// Closed picker showing the current (or given) month
async fn get_initial_state(
    State(state): State<AppState>,
    Query(query): Query<InitialRangeQuery>,
) -> Json<RangeTransitionResponse> {
    info!("GET /api/range/initial - query: {:?}", query);

    let today = query.today.unwrap_or_else(|| Utc::now().date_naive());
    let picker = state.range_selector.initial_state(today);
    Json(respond(&state, picker, None))
}

/// Apply one picker action
async fn apply_transition(
    State(state): State<AppState>,
    Json(request): Json<RangeTransitionRequest>,
) -> Json<RangeTransitionResponse> {
    info!("POST /api/range/transition - action: {:?}", request.action);

    let transition = state.range_selector.apply(&request.state, request.action);
    Json(respond(&state, transition.state, transition.emitted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_utils::{get_json, post_json, setup_test_state};
    use axum::http::StatusCode;
    use serde_json::json;
    use shared::RangeSelection;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn step(app: &Router, state: &RangePickerState, action: serde_json::Value) -> RangeTransitionResponse {
        let (status, body) = post_json(
            app.clone(),
            "/transition",
            json!({ "state": state, "action": action }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    #[tokio::test]
    async fn test_initial_state_is_closed_and_empty() {
        let app = router().with_state(setup_test_state().await);
        let (status, body): (_, RangeTransitionResponse) = get_json(app, "/initial?today=2025-10-16").await;

        assert_eq!(status, StatusCode::OK);
        assert!(!body.state.open);
        assert_eq!(body.state.selection, RangeSelection::Empty);
        assert_eq!(body.month_label, "outubro de 2025");
        assert!(body.cells.iter().all(|cell| !cell.highlight.in_range));
    }

    #[tokio::test]
    async fn test_two_clicks_and_confirm_emit_ordered_range() {
        let app = router().with_state(setup_test_state().await);
        let (_, initial): (_, RangeTransitionResponse) = get_json(app.clone(), "/initial?today=2025-10-16").await;

        let opened = step(&app, &initial.state, json!({ "action": "open", "today": "2025-10-16" })).await;
        let first = step(&app, &opened.state, json!({ "action": "select", "date": "2025-10-20" })).await;
        let hovered = step(&app, &first.state, json!({ "action": "hover", "date": "2025-10-10" })).await;

        let previewed: Vec<u32> = hovered
            .cells
            .iter()
            .filter(|cell| cell.highlight.in_range)
            .map(|cell| cell.cell.day)
            .collect();
        assert_eq!(previewed, (11..=19).collect::<Vec<u32>>());

        let second = step(&app, &hovered.state, json!({ "action": "select", "date": "2025-10-03" })).await;
        assert_eq!(second.emitted, None);

        let confirmed = step(&app, &second.state, json!({ "action": "confirm" })).await;
        assert_eq!(confirmed.emitted, Some(DateRange::new(date(2025, 10, 3), date(2025, 10, 20))));
        assert!(!confirmed.state.open);
    }

    #[tokio::test]
    async fn test_cancel_emits_nothing() {
        let app = router().with_state(setup_test_state().await);
        let (_, initial): (_, RangeTransitionResponse) = get_json(app.clone(), "/initial?today=2025-10-16").await;

        let opened = step(&app, &initial.state, json!({ "action": "open", "today": "2025-10-16" })).await;
        let first = step(&app, &opened.state, json!({ "action": "select", "date": "2025-10-20" })).await;
        let cancelled = step(&app, &first.state, json!({ "action": "cancel" })).await;

        assert_eq!(cancelled.emitted, None);
        assert_eq!(cancelled.state.selection, RangeSelection::Empty);
        assert!(!cancelled.state.open);
    }
}
