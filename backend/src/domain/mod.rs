//! # Domain Module
//!
//! Contains all business logic for the financial dashboard.
//!
//! ## Module Organization
//!
//! - **calendar**: Month grids, month navigation and pt-BR month names
//! - **range_selector**: Two-click date range picker state machine
//! - **snapshot_tables / snapshot_service**: Seeded period snapshots and their lookup
//! - **chart_series**: Daily or monthly chart series with the projected balance
//! - **period_view / period_loader**: Per-key views and last-request-wins loading
//! - **dashboard_state**: The dashboard state, its events and its controller
//! - **debounce**: Coalescing of free-text filter edits
//! - **transaction_mapper**: Validation of loosely typed incoming records
//! - **transaction_filter / transaction_table**: Filtering, totals, paging and table formatting
//! - **export_service**: CSV export of transaction lists
//! - **form_validation / notification_service**: Form checks and user-facing error notifications
//!
//! ## Core Concepts
//!
//! - **Period key**: `2025-10`, `2025-Q4` or `2025`; the unit every lookup is keyed on
//! - **Snapshot**: Revenue, expense, profit and breakdowns for one key
//! - **Period view**: Snapshot, metrics and chart series of one key, always replaced together
//!
//! Services are cheap to clone and hold no mutable state, except the loader,
//! the debouncer, the notifier and the dashboard controller.

pub mod calendar;
pub mod chart_series;
pub mod dashboard_state;
pub mod debounce;
pub mod export_service;
pub mod form_validation;
pub mod notification_service;
pub mod period_loader;
pub mod period_view;
pub mod range_selector;
pub mod snapshot_service;
pub mod snapshot_tables;
pub mod transaction_filter;
pub mod transaction_mapper;
pub mod transaction_table;

pub use calendar::CalendarService;
pub use chart_series::ChartSeriesBuilder;
pub use dashboard_state::{DashboardController, DashboardReducer};
pub use debounce::{DebounceOutcome, TextFilterDebouncer};
pub use export_service::ExportService;
pub use form_validation::FormValidationService;
pub use notification_service::NotificationService;
pub use period_loader::{LoadOutcome, PeriodLoader, SnapshotProvider, StaticSnapshotProvider};
pub use period_view::PeriodViewBuilder;
pub use range_selector::RangeSelector;
pub use snapshot_service::SnapshotService;
pub use transaction_filter::{SortSpec, TransactionFilterService};
pub use transaction_mapper::TransactionMapper;
pub use transaction_table::TransactionTableService;
