//! Period bucket lookup.
//!
//! Maps a [`PeriodKey`] to its pre-aggregated [`FinancialSnapshot`] and to the
//! dependent metric tables. A miss never fails: the documented default
//! snapshot (and zeroed metrics) are served instead.

use chrono::NaiveDate;
use log::{debug, info, warn};
use shared::{FinancialSnapshot, PeriodKey, PeriodMetrics, PeriodType, ProfitStatus};

use crate::domain::snapshot_tables::{
    CHURN, CONTRACT_AVERAGES, COST_AVERAGES, DEFAULT_CHURN, DEFAULT_CONTRACT_AVERAGES, DEFAULT_COST_AVERAGES,
    DEFAULT_DELINQUENCY, DEFAULT_LTV, DEFAULT_SNAPSHOT, DELINQUENCY, LTV, SNAPSHOTS,
};

#[derive(Clone, Default)]
pub struct SnapshotService;

impl SnapshotService {
    pub fn new() -> Self {
        Self
    }

    /// Key of the bucket containing `selected_start`
    pub fn key_for(&self, period_type: PeriodType, selected_start: NaiveDate) -> PeriodKey {
        PeriodKey::from_date(period_type, selected_start)
    }

    pub fn lookup(&self, key: &PeriodKey) -> FinancialSnapshot {
        let raw = key.to_string();
        match SNAPSHOTS.get(raw.as_str()) {
            Some(snapshot) => {
                debug!("📊 SNAPSHOT: Hit for {}", raw);
                snapshot.clone()
            }
            None => {
                info!("📊 SNAPSHOT: No data for {}, serving default snapshot", raw);
                DEFAULT_SNAPSHOT.clone()
            }
        }
    }

    /// Lookup by the raw string form. Malformed keys get the default snapshot.
    pub fn lookup_raw(&self, raw: &str) -> FinancialSnapshot {
        match raw.parse::<PeriodKey>() {
            Ok(key) => self.lookup(&key),
            Err(e) => {
                warn!("📊 SNAPSHOT: {}, serving default snapshot", e);
                DEFAULT_SNAPSHOT.clone()
            }
        }
    }

    /// Every dependent table re-run against the same key
    pub fn metrics(&self, key: &PeriodKey) -> PeriodMetrics {
        let raw = key.to_string();
        let raw = raw.as_str();

        PeriodMetrics {
            contract_averages: CONTRACT_AVERAGES.get(raw).copied().unwrap_or(DEFAULT_CONTRACT_AVERAGES),
            cost_averages: COST_AVERAGES.get(raw).copied().unwrap_or(DEFAULT_COST_AVERAGES),
            churn: CHURN.get(raw).copied().unwrap_or(DEFAULT_CHURN),
            ltv: LTV.get(raw).copied().unwrap_or(DEFAULT_LTV),
            delinquency: DELINQUENCY.get(raw).copied().unwrap_or(DEFAULT_DELINQUENCY),
        }
    }

    /// Profit over revenue in percent, zero when there is no revenue
    pub fn profit_margin(&self, snapshot: &FinancialSnapshot) -> f64 {
        if snapshot.revenue > 0.0 {
            snapshot.profit / snapshot.revenue * 100.0
        } else {
            0.0
        }
    }

    /// Expense over revenue in percent, zero when there is no revenue
    pub fn expense_margin(&self, snapshot: &FinancialSnapshot) -> f64 {
        if snapshot.revenue > 0.0 {
            snapshot.expense / snapshot.revenue * 100.0
        } else {
            0.0
        }
    }

    pub fn profit_status(&self, margin: f64) -> ProfitStatus {
        if margin >= 20.0 {
            ProfitStatus::Excellent
        } else if margin >= 10.0 {
            ProfitStatus::Good
        } else if margin >= 0.0 {
            ProfitStatus::Fair
        } else {
            ProfitStatus::Poor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_seeded_month_lookup_is_exact() {
        let service = SnapshotService::new();
        let snapshot = service.lookup_raw("2025-10");

        assert_eq!(snapshot.revenue, 45_000.0);
        assert_eq!(snapshot.expense, 32_000.0);
        assert_eq!(snapshot.profit, 13_000.0);
        assert_eq!(snapshot.net_margin, 28.9);
        assert_eq!(snapshot.indicators.revenue_growth, 12.5);
    }

    #[test]
    fn test_missing_key_returns_default() {
        let service = SnapshotService::new();
        let snapshot = service.lookup_raw("1999-01");

        assert_eq!(snapshot, *DEFAULT_SNAPSHOT);
        assert_eq!(snapshot.revenue, 85_000.0);
        assert_eq!(snapshot.expense, 35_000.0);
        assert_eq!(snapshot.profit, 50_000.0);
        assert_eq!(snapshot.active_contracts, 2);
        assert_eq!(snapshot.pending_contracts, 1);
        assert_eq!(snapshot.revenue_by_month.len(), 4);
        assert_eq!(snapshot.expense_by_category[0].category, "Salários");
    }

    #[test]
    fn test_malformed_key_returns_default() {
        let service = SnapshotService::new();
        assert_eq!(service.lookup_raw("outubro"), *DEFAULT_SNAPSHOT);
        assert_eq!(service.lookup_raw("2025-13"), *DEFAULT_SNAPSHOT);
    }

    #[test]
    fn test_period_type_cycle_restores_snapshot() {
        let service = SnapshotService::new();
        let start = date(2025, 10, 16);

        let mut period_type = PeriodType::Month;
        let original = service.lookup(&service.key_for(period_type, start));
        let mut seen = Vec::new();
        for _ in 0..3 {
            period_type = period_type.next();
            seen.push(service.key_for(period_type, start).to_string());
        }

        assert_eq!(seen, vec!["2025-Q4", "2025", "2025-10"]);
        assert_eq!(service.lookup(&service.key_for(period_type, start)), original);
    }

    #[test]
    fn test_metrics_follow_the_same_key() {
        let service = SnapshotService::new();

        let october = service.metrics(&"2025-10".parse().unwrap());
        assert_eq!(october.churn.lost_contracts, 1);
        assert_eq!(october.delinquency.amount, 3_150.0);

        let quarter = service.metrics(&"2025-Q4".parse().unwrap());
        assert_ne!(october.cost_averages, quarter.cost_averages);

        let missing = service.metrics(&"1999-01".parse().unwrap());
        assert_eq!(missing.ltv, DEFAULT_LTV);
        assert_eq!(missing.delinquency, DEFAULT_DELINQUENCY);
    }

    #[test]
    fn test_margins_and_profit_status() {
        let service = SnapshotService::new();
        let snapshot = service.lookup_raw("2025-10");

        let margin = service.profit_margin(&snapshot);
        assert!((margin - 28.888).abs() < 0.01);
        assert!((service.expense_margin(&snapshot) - 71.111).abs() < 0.01);
        assert_eq!(service.profit_status(margin), ProfitStatus::Excellent);

        assert_eq!(service.profit_status(20.0), ProfitStatus::Excellent);
        assert_eq!(service.profit_status(10.0), ProfitStatus::Good);
        assert_eq!(service.profit_status(0.0), ProfitStatus::Fair);
        assert_eq!(service.profit_status(-0.1), ProfitStatus::Poor);
    }

    #[test]
    fn test_zero_revenue_margins() {
        let service = SnapshotService::new();
        let mut snapshot = DEFAULT_SNAPSHOT.clone();
        snapshot.revenue = 0.0;
        assert_eq!(service.profit_margin(&snapshot), 0.0);
        assert_eq!(service.expense_margin(&snapshot), 0.0);
    }
}
