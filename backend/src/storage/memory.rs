//! In-memory transaction store.

use log::debug;
use shared::TransactionRecord;
use std::sync::RwLock;

use crate::error::{DashboardError, DashboardResult};
use crate::storage::traits::TransactionRepository;

#[derive(Default)]
pub struct InMemoryTransactionRepository {
    records: RwLock<Vec<TransactionRecord>>,
}

impl InMemoryTransactionRepository {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

fn poisoned<T>(_: T) -> DashboardError {
    DashboardError::Storage("transaction store lock poisoned".to_string())
}

impl TransactionRepository for InMemoryTransactionRepository {
    fn list(&self) -> DashboardResult<Vec<TransactionRecord>> {
        Ok(self.records.read().map_err(poisoned)?.clone())
    }

    fn get(&self, id: &str) -> DashboardResult<Option<TransactionRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.iter().find(|record| record.id == id).cloned())
    }

    fn upsert(&self, record: TransactionRecord) -> DashboardResult<()> {
        let mut records = self.records.write().map_err(poisoned)?;
        match records.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => {
                debug!("💾 STORE: Replacing transaction {}", record.id);
                *existing = record;
            }
            None => {
                debug!("💾 STORE: Inserting transaction {}", record.id);
                records.push(record);
            }
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> DashboardResult<bool> {
        let mut records = self.records.write().map_err(poisoned)?;
        let before = records.len();
        records.retain(|record| record.id != id);
        Ok(records.len() != before)
    }
}
