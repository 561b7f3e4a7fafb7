//! # IO Module
//!
//! The interface layer between host UIs and the domain logic.
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: REST endpoints for every dashboard operation
//! - **Boundary Mapping**: Loosely typed transaction JSON validated into records
//! - **Error Translation**: Domain errors turned into status codes and JSON bodies
//!
//! ## Supported Operations
//!
//! - **/api/calendar**: Month grids and month navigation
//! - **/api/range**: Range picker transitions
//! - **/api/snapshots, /api/charts**: Period lookups and chart series
//! - **/api/dashboard**: Lifecycle and events of the live dashboard
//! - **/api/transactions, /api/export**: Filtered listing, table rows and CSV
//! - **/api/notifications, /api/validation**: Failure handling and form checks

pub mod rest;
