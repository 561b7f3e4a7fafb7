//! # Storage Traits
//!
//! Storage abstractions the domain layer works against, so the in-memory
//! store can be swapped for a remote-backed one without touching services.

use chrono::NaiveDate;
use shared::TransactionRecord;

use crate::error::DashboardResult;

/// Trait defining the interface for transaction storage operations
pub trait TransactionRepository: Send + Sync {
    /// All records in insertion order
    fn list(&self) -> DashboardResult<Vec<TransactionRecord>>;

    /// Records whose due date falls in `[start, end]`
    fn list_between(&self, start: NaiveDate, end: NaiveDate) -> DashboardResult<Vec<TransactionRecord>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|record| record.due_date >= start && record.due_date <= end)
            .collect())
    }

    fn get(&self, id: &str) -> DashboardResult<Option<TransactionRecord>>;

    /// Insert, or replace the record with the same id
    fn upsert(&self, record: TransactionRecord) -> DashboardResult<()>;

    /// Returns true if the record existed
    fn delete(&self, id: &str) -> DashboardResult<bool>;
}
