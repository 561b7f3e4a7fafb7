//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// API error response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Error type returned by REST handlers
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Domain(DashboardError),
}

impl AppError {
    fn status_and_body(&self) -> (StatusCode, ApiError) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg.clone())),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg.clone())),
            AppError::Domain(e) => {
                let (status, code) = match e {
                    DashboardError::InvalidPeriodKey(_) => (StatusCode::BAD_REQUEST, "INVALID_PERIOD_KEY"),
                    DashboardError::InvalidDate { .. } => (StatusCode::BAD_REQUEST, "INVALID_DATE"),
                    DashboardError::InvalidMonth { .. } => (StatusCode::BAD_REQUEST, "INVALID_MONTH"),
                    DashboardError::InvalidRecord { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_RECORD"),
                    DashboardError::InvalidSort(_) => (StatusCode::BAD_REQUEST, "INVALID_SORT"),
                    DashboardError::InvalidPageSize => (StatusCode::BAD_REQUEST, "INVALID_PAGE_SIZE"),
                    DashboardError::Provider { .. } => (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR"),
                    DashboardError::Export(_) => (StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_ERROR"),
                    DashboardError::SeedIo(_) | DashboardError::SeedFormat(_) | DashboardError::Storage(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR")
                    }
                };
                let body = match e {
                    DashboardError::InvalidRecord { id, .. } => {
                        ApiError::new(code, e.to_string()).with_details(format!("id: {}", id))
                    }
                    _ => ApiError::new(code, e.to_string()),
                };
                (status, body)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        if status.is_server_error() {
            error!("Request failed: {} ({})", body.message, body.code);
        }
        (status, Json(body)).into_response()
    }
}

impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        AppError::Domain(err)
    }
}

pub type ApiResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::PeriodKeyError;

    #[test]
    fn test_domain_errors_map_to_status_codes() {
        let cases = vec![
            (
                AppError::from(DashboardError::InvalidPeriodKey(PeriodKeyError::Malformed("x".into()))),
                StatusCode::BAD_REQUEST,
                "INVALID_PERIOD_KEY",
            ),
            (
                AppError::from(DashboardError::InvalidRecord {
                    id: "t1".into(),
                    reason: "missing kind".into(),
                }),
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_RECORD",
            ),
            (
                AppError::from(DashboardError::Storage("lock poisoned".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
            ),
            (AppError::NotFound("tx-1".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
        ];

        for (error, status, code) in cases {
            let (actual_status, body) = error.status_and_body();
            assert_eq!(actual_status, status);
            assert_eq!(body.code, code);
        }
    }

    #[test]
    fn test_invalid_record_names_the_record() {
        let error = AppError::from(DashboardError::InvalidRecord {
            id: "tx-9".into(),
            reason: "negative amount".into(),
        });
        let (_, body) = error.status_and_body();
        assert_eq!(body.details.as_deref(), Some("id: tx-9"));
    }

    #[test]
    fn test_details_are_omitted_when_absent() {
        let json = serde_json::to_value(ApiError::new("BAD_REQUEST", "nope")).unwrap();
        assert!(json.get("details").is_none());

        let json = serde_json::to_value(ApiError::new("BAD_REQUEST", "nope").with_details("field: email")).unwrap();
        assert_eq!(json["details"], "field: email");
    }
}
