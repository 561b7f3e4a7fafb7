//! Boundary validation for incoming transactions.
//!
//! Seed files and upstream payloads carry loosely typed records
//! ([`RawTransaction`]). Nothing past this mapper sees one: it either produces
//! a well-formed [`TransactionRecord`] or rejects the record.

use serde_json::Value;
use shared::{RawTransaction, TransactionKind, TransactionRecord};
use uuid::Uuid;

use crate::domain::calendar::CalendarService;
use crate::domain::transaction_table::parse_brl;
use crate::error::{DashboardError, DashboardResult};

pub struct TransactionMapper;

impl TransactionMapper {
    pub fn to_record(raw: RawTransaction) -> DashboardResult<TransactionRecord> {
        let id = raw
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let invalid = |reason: &str| DashboardError::InvalidRecord {
            id: id.clone(),
            reason: reason.to_string(),
        };

        let kind = match raw.kind.as_deref().map(|k| k.trim().to_lowercase()).as_deref() {
            Some("revenue" | "receita" | "entrada") => TransactionKind::Revenue,
            Some("expense" | "despesa" | "saida" | "saída") => TransactionKind::Expense,
            Some(_) => return Err(invalid("unknown kind")),
            None => return Err(invalid("missing kind")),
        };

        let due_date = match raw.due_date.as_deref() {
            Some(value) => Self::parse_date(value).map_err(|_| invalid("invalid due date"))?,
            None => return Err(invalid("missing due date")),
        };
        let settlement_date = match raw.settlement_date.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => {
                Some(Self::parse_date(value).map_err(|_| invalid("invalid settlement date"))?)
            }
            _ => None,
        };

        let amount = match raw.amount {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => parse_brl(&s),
            _ => None,
        }
        .ok_or_else(|| invalid("missing or malformed amount"))?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(invalid("amount must be a non-negative number"));
        }

        let text = |value: Option<String>| value.map(|v| v.trim().to_string()).unwrap_or_default();

        Ok(TransactionRecord {
            kind,
            due_date,
            settlement_date,
            counterparty: text(raw.counterparty),
            description: text(raw.description),
            category: text(raw.category),
            account: text(raw.account),
            amount,
            id,
        })
    }

    /// Convert a batch, failing on the first invalid record
    pub fn to_records(raws: Vec<RawTransaction>) -> DashboardResult<Vec<TransactionRecord>> {
        raws.into_iter().map(Self::to_record).collect()
    }

    pub fn to_raw(record: &TransactionRecord) -> RawTransaction {
        RawTransaction {
            id: Some(record.id.clone()),
            kind: Some(
                match record.kind {
                    TransactionKind::Revenue => "revenue",
                    TransactionKind::Expense => "expense",
                }
                .to_string(),
            ),
            due_date: Some(record.due_date.format("%Y-%m-%d").to_string()),
            settlement_date: record.settlement_date.map(|d| d.format("%Y-%m-%d").to_string()),
            counterparty: Some(record.counterparty.clone()),
            description: Some(record.description.clone()),
            category: Some(record.category.clone()),
            account: Some(record.account.clone()),
            amount: serde_json::Number::from_f64(record.amount).map(Value::Number),
        }
    }

    /// ISO date, optionally followed by a time part (`2025-10-05T10:00:00Z`)
    fn parse_date(value: &str) -> DashboardResult<chrono::NaiveDate> {
        let date_part = value.trim().split('T').next().unwrap_or_default();
        CalendarService::new().parse_iso_date(date_part)
    }
}
