//! Seed data for the in-memory store.
//!
//! The embedded document ships with the binary; `FINNZA_SEED_FILE` can point
//! at a replacement. Both yield raw wire records; validation into
//! [`shared::TransactionRecord`] happens in the domain mapper.

use log::info;
use shared::RawTransaction;
use std::path::Path;

use crate::error::DashboardResult;

const EMBEDDED_SEED: &str = include_str!("seed_transactions.json");

pub fn parse_seed(json: &str) -> DashboardResult<Vec<RawTransaction>> {
    Ok(serde_json::from_str(json)?)
}

pub fn embedded_seed() -> DashboardResult<Vec<RawTransaction>> {
    parse_seed(EMBEDDED_SEED)
}

pub fn load_seed_file(path: &Path) -> DashboardResult<Vec<RawTransaction>> {
    info!("💾 STORE: Loading seed transactions from {:?}", path);
    let json = std::fs::read_to_string(path)?;
    parse_seed(&json)
}

/// Seed from `path` when given, otherwise from the embedded document
pub fn load_seed(path: Option<&Path>) -> DashboardResult<Vec<RawTransaction>> {
    let raws = match path {
        Some(path) => load_seed_file(path)?,
        None => embedded_seed()?,
    };
    info!("💾 STORE: Read {} seed transactions", raws.len());
    Ok(raws)
}
