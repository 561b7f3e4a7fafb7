//! # REST API for Transactions
//!
//! Filtered, sorted and paginated listing with totals, pre-formatted table
//! rows, a debounced search endpoint for type-ahead filters, and record
//! upsert/delete through the boundary mapper.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use shared::{
    DateRange, FormattedTransaction, PageRequest, RawTransaction, TransactionFilter, TransactionKind,
    TransactionPageResponse, TransactionRecord, TransactionTotals,
};

use crate::domain::debounce::DebounceOutcome;
use crate::domain::TransactionMapper;
use crate::domain::transaction_table::{
    format_brl, AmountFormat, DateFormat, TransactionTableConfig, TransactionTableService,
};
use crate::io::rest::error::{ApiResult, AppError};
use crate::AppState;

/// Filter, paging and sort parameters shared by the listing endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionListQuery {
    pub category: Option<String>,
    pub account: Option<String>,
    pub kind: Option<TransactionKind>,
    pub text: Option<String>,
    /// Due-date range; ignored unless both ends are given
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

impl TransactionListQuery {
    pub fn filter(&self) -> TransactionFilter {
        TransactionFilter {
            category: self.category.clone(),
            account: self.account.clone(),
            kind: self.kind,
            text: self.text.clone(),
            due_between: match (self.start, self.end) {
                (Some(start), Some(end)) => Some(DateRange::new(start, end)),
                _ => None,
            },
        }
    }

    pub fn page_request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest {
            page: self.page.unwrap_or(defaults.page),
            size: self.size.unwrap_or(defaults.size),
            sort: self.sort.clone().or(defaults.sort),
        }
    }
}

/// Display overrides for the table endpoint; omitted fields keep the
/// configured formats
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableFormatQuery {
    pub date_format: Option<DateFormat>,
    pub amount_format: Option<AmountFormat>,
    pub currency_symbol: Option<bool>,
}

impl TableFormatQuery {
    pub fn apply_to(&self, base: &TransactionTableConfig) -> TransactionTableConfig {
        TransactionTableConfig {
            show_currency_symbol: self.currency_symbol.unwrap_or(base.show_currency_symbol),
            date_format: self.date_format.unwrap_or(base.date_format),
            amount_format: self.amount_format.unwrap_or(base.amount_format),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionTableResponse {
    pub transactions: Vec<FormattedTransaction>,
    pub totals: TransactionTotals,
    pub formatted_revenue: String,
    pub formatted_expense: String,
    pub formatted_net_balance: String,
    pub total_pages: u32,
}

/// Create a router for transaction related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transactions).post(upsert_transaction))
        .route("/table", get(get_transaction_table))
        .route("/search", get(search_transactions))
        .route("/raw", get(list_raw_transactions))
        .route("/:id", get(get_transaction).delete(delete_transaction))
}

fn list_page(state: &AppState, query: &TransactionListQuery) -> ApiResult<TransactionPageResponse> {
    let records = state.repository.list()?;
    let filtered = state.filter_service.apply(&records, &query.filter());
    let totals = state.filter_service.totals(&filtered);
    let page = state.filter_service.paginate(&filtered, &query.page_request())?;

    Ok(TransactionPageResponse { page, totals })
}

/// List transactions with filters, sorting and pagination
async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionListQuery>,
) -> ApiResult<Json<TransactionPageResponse>> {
    info!("GET /api/transactions - query: {:?}", query);
    Ok(Json(list_page(&state, &query)?))
}

/// One page of rows formatted for the transactions table
async fn get_transaction_table(
    State(state): State<AppState>,
    Query(query): Query<TransactionListQuery>,
    Query(format): Query<TableFormatQuery>,
) -> ApiResult<Json<TransactionTableResponse>> {
    info!("GET /api/transactions/table - query: {:?}, format: {:?}", query, format);

    let response = list_page(&state, &query)?;
    let totals = response.totals;
    let table = TransactionTableService::with_config(format.apply_to(state.transaction_table_service.config()));
    Ok(Json(TransactionTableResponse {
        transactions: table.format_transactions_for_table(&response.page.content),
        formatted_revenue: format_brl(totals.revenue),
        formatted_expense: format_brl(totals.expense),
        formatted_net_balance: format_brl(totals.net_balance),
        total_pages: response.page.total_pages,
        totals,
    }))
}

/// Type-ahead search. Only the newest request within the debounce window is
/// answered; superseded ones get 204 No Content.
async fn search_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionListQuery>,
) -> ApiResult<Response> {
    debug!("GET /api/transactions/search - text: {:?}", query.text);

    match state.search_debouncer.submit(query).await {
        DebounceOutcome::Fire(query) => {
            info!("GET /api/transactions/search - running {:?}", query.text);
            Ok(Json(list_page(&state, &query)?).into_response())
        }
        DebounceOutcome::Superseded => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Every record in the upstream wire format
async fn list_raw_transactions(State(state): State<AppState>) -> ApiResult<Json<Vec<RawTransaction>>> {
    info!("GET /api/transactions/raw");

    let records = state.repository.list()?;
    Ok(Json(records.iter().map(TransactionMapper::to_raw).collect()))
}

async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<TransactionRecord>> {
    info!("GET /api/transactions/{}", id);

    state
        .repository
        .get(&id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("transaction {} not found", id)))
}

/// Validate a loosely typed record and store it, replacing any record with the same id
async fn upsert_transaction(
    State(state): State<AppState>,
    Json(raw): Json<RawTransaction>,
) -> ApiResult<(StatusCode, Json<TransactionRecord>)> {
    info!("POST /api/transactions - id: {:?}", raw.id);

    let record = TransactionMapper::to_record(raw)?;
    state.repository.upsert(record.clone())?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn delete_transaction(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    info!("DELETE /api/transactions/{}", id);

    if state.repository.delete(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("transaction {} not found", id)))
    }
}
