//! Filter and aggregate engine over the in-memory transaction set.
//!
//! A [`TransactionFilter`] is a conjunction of optional predicates; with no
//! predicates set the input passes through unchanged. Totals are plain
//! reductions over whatever the filter kept. Pagination and sorting follow
//! the upstream backend's `page`/`size`/`sort` contract.

use log::debug;
use shared::{
    PageRequest, PageResponse, TransactionFilter, TransactionKind, TransactionRecord, TransactionTotals,
};
use std::cmp::Ordering;

use crate::error::{DashboardError, DashboardResult};

/// Column accepted in a `"<field>,<asc|desc>"` sort expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    DueDate,
    Amount,
    Counterparty,
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::DueDate,
            direction: SortDirection::Desc,
        }
    }
}

impl SortSpec {
    /// Parse `"dueDate,desc"`. A missing direction means ascending.
    pub fn parse(raw: &str) -> DashboardResult<Self> {
        let mut parts = raw.split(',').map(str::trim);
        let field = match parts.next() {
            Some("dueDate") => SortField::DueDate,
            Some("amount") => SortField::Amount,
            Some("counterparty") => SortField::Counterparty,
            Some("category") => SortField::Category,
            _ => return Err(DashboardError::InvalidSort(raw.to_string())),
        };
        let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            None | Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            Some(_) => return Err(DashboardError::InvalidSort(raw.to_string())),
        };
        if parts.next().is_some() {
            return Err(DashboardError::InvalidSort(raw.to_string()));
        }

        Ok(Self { field, direction })
    }

    fn compare(&self, a: &TransactionRecord, b: &TransactionRecord) -> Ordering {
        let ordering = match self.field {
            SortField::DueDate => a.due_date.cmp(&b.due_date),
            SortField::Amount => a.amount.total_cmp(&b.amount),
            SortField::Counterparty => a.counterparty.to_lowercase().cmp(&b.counterparty.to_lowercase()),
            SortField::Category => a.category.cmp(&b.category),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

#[derive(Clone, Default)]
pub struct TransactionFilterService;

impl TransactionFilterService {
    pub fn new() -> Self {
        Self
    }

    pub fn matches(&self, filter: &TransactionFilter, record: &TransactionRecord) -> bool {
        if let Some(category) = non_blank(&filter.category) {
            if record.category != category {
                return false;
            }
        }
        if let Some(account) = non_blank(&filter.account) {
            if record.account != account {
                return false;
            }
        }
        if let Some(kind) = filter.kind {
            if record.kind != kind {
                return false;
            }
        }
        if let Some(range) = filter.due_between.filter(|range| range.is_complete()) {
            if !range.contains(record.due_date) {
                return false;
            }
        }
        if let Some(text) = non_blank(&filter.text) {
            let needle = text.to_lowercase();
            if !record.counterparty.to_lowercase().contains(&needle)
                && !record.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }

    /// Records satisfying every set predicate, in input order
    pub fn apply(&self, records: &[TransactionRecord], filter: &TransactionFilter) -> Vec<TransactionRecord> {
        let kept: Vec<TransactionRecord> = records
            .iter()
            .filter(|record| self.matches(filter, record))
            .cloned()
            .collect();
        debug!("🔍 FILTER: Kept {} of {} records", kept.len(), records.len());
        kept
    }

    pub fn totals(&self, records: &[TransactionRecord]) -> TransactionTotals {
        let (revenue, expense) = records.iter().fold((0.0, 0.0), |(revenue, expense), record| match record.kind {
            TransactionKind::Revenue => (revenue + record.amount, expense),
            TransactionKind::Expense => (revenue, expense + record.amount),
        });

        TransactionTotals {
            revenue,
            expense,
            net_balance: revenue - expense,
            count: records.len(),
        }
    }

    /// Sort then slice one page out of `records`
    pub fn paginate(
        &self,
        records: &[TransactionRecord],
        request: &PageRequest,
    ) -> DashboardResult<PageResponse<TransactionRecord>> {
        if request.size == 0 {
            return Err(DashboardError::InvalidPageSize);
        }
        let sort = match request.sort.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(raw) => SortSpec::parse(raw)?,
            None => SortSpec::default(),
        };

        let mut sorted = records.to_vec();
        sorted.sort_by(|a, b| sort.compare(a, b));

        let size = request.size as usize;
        let total_elements = sorted.len();
        let total_pages = total_elements.div_ceil(size) as u32;
        let content: Vec<TransactionRecord> = sorted
            .into_iter()
            .skip((request.page as usize).saturating_mul(size))
            .take(size)
            .collect();

        Ok(PageResponse {
            content,
            total_elements: total_elements as u64,
            total_pages,
            size: request.size,
            number: request.page,
            first: request.page == 0,
            last: request.page.saturating_add(1) >= total_pages,
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
