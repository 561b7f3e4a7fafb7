//! Domain error type shared by services, storage and the REST layer.

use shared::PeriodKeyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("invalid period key: {0}")]
    InvalidPeriodKey(#[from] PeriodKeyError),

    #[error("invalid date {value:?}: expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("invalid month {month}/{year}")]
    InvalidMonth { month: u32, year: i32 },

    #[error("invalid transaction record {id:?}: {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("invalid sort expression {0:?}")]
    InvalidSort(String),

    #[error("page size must be at least 1")]
    InvalidPageSize,

    #[error("failed to serialize export: {0}")]
    Export(#[from] csv::Error),

    #[error("failed to read seed data: {0}")]
    SeedIo(#[from] std::io::Error),

    #[error("failed to parse seed data: {0}")]
    SeedFormat(#[from] serde_json::Error),

    #[error("storage failure: {0}")]
    Storage(String),

    #[error("snapshot provider failed for {key}: {reason}")]
    Provider { key: String, reason: String },
}

pub type DashboardResult<T> = Result<T, DashboardError>;
