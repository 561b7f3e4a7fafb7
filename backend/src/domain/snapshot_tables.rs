//! Seeded period tables.
//!
//! Each table is keyed by the period key string (`2025-10`, `2025-Q4`,
//! `2025`). Lookups that miss fall back to the `DEFAULT_*` values below.

use once_cell::sync::Lazy;
use shared::{
    CategorySeries, CategoryValue, ChurnMetrics, ContractAverages, CostAverages, DelinquencyMetrics,
    FinancialSnapshot, LtvMetrics, MonthlyValue, SnapshotIndicators,
};
use std::collections::HashMap;

/// Snapshot served for any key without seeded data
pub static DEFAULT_SNAPSHOT: Lazy<FinancialSnapshot> = Lazy::new(|| {
    snapshot(
        85_000.0,
        35_000.0,
        (2, 1, 0),
        &[("Jan", 15_000.0), ("Fev", 22_000.0), ("Mar", 18_000.0), ("Abr", 30_000.0)],
        &[("Salários", 20_000.0), ("Tecnologia", 8_000.0), ("Marketing", 4_000.0), ("Outros", 3_000.0)],
        (0.0, 0.0, 0.0, 0.0),
    )
});

pub const DEFAULT_CONTRACT_AVERAGES: ContractAverages = ContractAverages {
    average_contract_value: 0.0,
    average_recurring_value: 0.0,
};

pub const DEFAULT_COST_AVERAGES: CostAverages = CostAverages { fixed: 0.0, variable: 0.0 };

pub const DEFAULT_CHURN: ChurnMetrics = ChurnMetrics {
    rate: 0.0,
    lost_contracts: 0,
};

pub const DEFAULT_LTV: LtvMetrics = LtvMetrics {
    value: 0.0,
    average_lifetime_months: 0.0,
};

pub const DEFAULT_DELINQUENCY: DelinquencyMetrics = DelinquencyMetrics { amount: 0.0, rate: 0.0 };

pub static SNAPSHOTS: Lazy<HashMap<&'static str, FinancialSnapshot>> = Lazy::new(|| {
    HashMap::from([
        (
            "2025-08",
            snapshot(
                38_500.0,
                29_800.0,
                (16, 3, 1),
                &[("Mai", 33_200.0), ("Jun", 35_900.0), ("Jul", 36_400.0), ("Ago", 38_500.0)],
                &[("Salários", 17_500.0), ("Tecnologia", 6_100.0), ("Marketing", 3_900.0), ("Outros", 2_300.0)],
                (5.8, 82.0, 91.0, 7.4),
            ),
        ),
        (
            "2025-09",
            snapshot(
                40_000.0,
                30_500.0,
                (17, 3, 2),
                &[("Jun", 35_900.0), ("Jul", 36_400.0), ("Ago", 38_500.0), ("Set", 40_000.0)],
                &[("Salários", 18_000.0), ("Tecnologia", 6_300.0), ("Marketing", 3_800.0), ("Outros", 2_400.0)],
                (3.9, 84.0, 92.0, 7.6),
            ),
        ),
        (
            "2025-10",
            snapshot(
                45_000.0,
                32_000.0,
                (18, 4, 2),
                &[("Jul", 36_400.0), ("Ago", 38_500.0), ("Set", 40_000.0), ("Out", 45_000.0)],
                &[("Salários", 18_500.0), ("Tecnologia", 6_800.0), ("Marketing", 4_200.0), ("Outros", 2_500.0)],
                (12.5, 87.0, 94.0, 8.2),
            ),
        ),
        (
            "2025-11",
            snapshot(
                43_200.0,
                31_100.0,
                (18, 2, 3),
                &[("Ago", 38_500.0), ("Set", 40_000.0), ("Out", 45_000.0), ("Nov", 43_200.0)],
                &[("Salários", 18_500.0), ("Tecnologia", 6_200.0), ("Marketing", 3_900.0), ("Outros", 2_500.0)],
                (-4.0, 85.0, 93.0, 8.0),
            ),
        ),
        (
            "2025-Q3",
            snapshot(
                114_900.0,
                89_600.0,
                (17, 3, 2),
                &[("Jul", 36_400.0), ("Ago", 38_500.0), ("Set", 40_000.0)],
                &[("Salários", 53_000.0), ("Tecnologia", 18_400.0), ("Marketing", 11_300.0), ("Outros", 6_900.0)],
                (6.2, 83.0, 91.0, 7.5),
            ),
        ),
        (
            "2025-Q4",
            snapshot(
                133_200.0,
                95_300.0,
                (18, 4, 3),
                &[("Out", 45_000.0), ("Nov", 43_200.0), ("Dez", 45_000.0)],
                &[("Salários", 55_500.0), ("Tecnologia", 19_600.0), ("Marketing", 12_700.0), ("Outros", 7_500.0)],
                (15.9, 86.0, 93.0, 8.1),
            ),
        ),
        (
            "2024",
            snapshot(
                362_000.0,
                281_000.0,
                (12, 2, 1),
                &[("T1", 82_000.0), ("T2", 88_500.0), ("T3", 93_000.0), ("T4", 98_500.0)],
                &[("Salários", 168_000.0), ("Tecnologia", 57_000.0), ("Marketing", 34_000.0), ("Outros", 22_000.0)],
                (9.1, 79.0, 89.0, 6.9),
            ),
        ),
        (
            "2025",
            snapshot(
                462_300.0,
                352_600.0,
                (18, 4, 3),
                &[("T1", 102_400.0), ("T2", 111_800.0), ("T3", 114_900.0), ("T4", 133_200.0)],
                &[("Salários", 212_000.0), ("Tecnologia", 72_600.0), ("Marketing", 43_100.0), ("Outros", 24_900.0)],
                (27.7, 85.0, 92.0, 7.8),
            ),
        ),
    ])
});

pub static CONTRACT_AVERAGES: Lazy<HashMap<&'static str, ContractAverages>> = Lazy::new(|| {
    HashMap::from([
        ("2025-09", contract_averages(2_352.9, 1_480.0)),
        ("2025-10", contract_averages(2_500.0, 1_550.0)),
        ("2025-11", contract_averages(2_400.0, 1_550.0)),
        ("2025-Q3", contract_averages(2_253.0, 1_460.0)),
        ("2025-Q4", contract_averages(2_466.7, 1_550.0)),
        ("2024", contract_averages(2_514.0, 1_320.0)),
        ("2025", contract_averages(2_140.3, 1_510.0)),
    ])
});

pub static COST_AVERAGES: Lazy<HashMap<&'static str, CostAverages>> = Lazy::new(|| {
    HashMap::from([
        ("2025-09", CostAverages { fixed: 24_300.0, variable: 6_200.0 }),
        ("2025-10", CostAverages { fixed: 25_300.0, variable: 6_700.0 }),
        ("2025-11", CostAverages { fixed: 25_300.0, variable: 5_800.0 }),
        ("2025-Q3", CostAverages { fixed: 23_900.0, variable: 5_970.0 }),
        ("2025-Q4", CostAverages { fixed: 25_300.0, variable: 6_470.0 }),
        ("2024", CostAverages { fixed: 19_100.0, variable: 4_320.0 }),
        ("2025", CostAverages { fixed: 23_800.0, variable: 5_580.0 }),
    ])
});

pub static CHURN: Lazy<HashMap<&'static str, ChurnMetrics>> = Lazy::new(|| {
    HashMap::from([
        ("2025-09", ChurnMetrics { rate: 5.6, lost_contracts: 1 }),
        ("2025-10", ChurnMetrics { rate: 2.8, lost_contracts: 1 }),
        ("2025-11", ChurnMetrics { rate: 5.3, lost_contracts: 1 }),
        ("2025-Q3", ChurnMetrics { rate: 8.3, lost_contracts: 2 }),
        ("2025-Q4", ChurnMetrics { rate: 7.4, lost_contracts: 2 }),
        ("2024", ChurnMetrics { rate: 14.3, lost_contracts: 2 }),
        ("2025", ChurnMetrics { rate: 18.2, lost_contracts: 4 }),
    ])
});

pub static LTV: Lazy<HashMap<&'static str, LtvMetrics>> = Lazy::new(|| {
    HashMap::from([
        ("2025-09", LtvMetrics { value: 26_400.0, average_lifetime_months: 17.8 }),
        ("2025-10", LtvMetrics { value: 55_357.1, average_lifetime_months: 35.7 }),
        ("2025-11", LtvMetrics { value: 29_245.3, average_lifetime_months: 18.9 }),
        ("2025-Q3", LtvMetrics { value: 17_590.4, average_lifetime_months: 12.0 }),
        ("2025-Q4", LtvMetrics { value: 20_945.9, average_lifetime_months: 13.5 }),
        ("2024", LtvMetrics { value: 9_230.8, average_lifetime_months: 7.0 }),
        ("2025", LtvMetrics { value: 8_296.7, average_lifetime_months: 5.5 }),
    ])
});

pub static DELINQUENCY: Lazy<HashMap<&'static str, DelinquencyMetrics>> = Lazy::new(|| {
    HashMap::from([
        ("2025-09", DelinquencyMetrics { amount: 2_800.0, rate: 7.0 }),
        ("2025-10", DelinquencyMetrics { amount: 3_150.0, rate: 7.0 }),
        ("2025-11", DelinquencyMetrics { amount: 4_320.0, rate: 10.0 }),
        ("2025-Q3", DelinquencyMetrics { amount: 6_900.0, rate: 6.0 }),
        ("2025-Q4", DelinquencyMetrics { amount: 10_660.0, rate: 8.0 }),
        ("2024", DelinquencyMetrics { amount: 21_720.0, rate: 6.0 }),
        ("2025", DelinquencyMetrics { amount: 32_360.0, rate: 7.0 }),
    ])
});

/// Seeded chart buckets. Month keys hold one value per day, quarter and year
/// keys one value per month.
pub static CATEGORY_SERIES: Lazy<HashMap<&'static str, CategorySeries>> = Lazy::new(|| {
    HashMap::from([
        (
            "2025-10",
            CategorySeries {
                revenue: vec![
                    5000.0, 3000.0, 4000.0, 0.0, 0.0, 0.0, 0.0, 6000.0, 7000.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 8000.0,
                    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9000.0, 10000.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 5000.0,
                ],
                renegotiated: vec![
                    0.0, 0.0, 0.0, 2000.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1500.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
                    3000.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1000.0,
                ],
                expense: vec![
                    0.0, 0.0, 0.0, 0.0, 0.0, 15000.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 12000.0, 0.0,
                    0.0, 0.0, 0.0, 0.0, 8000.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
                ],
            },
        ),
        (
            "2025-Q4",
            CategorySeries {
                revenue: vec![45_000.0, 43_200.0, 45_000.0],
                renegotiated: vec![7_500.0, 4_100.0, 3_600.0],
                expense: vec![32_000.0, 31_100.0, 32_200.0],
            },
        ),
        (
            "2025",
            CategorySeries {
                revenue: vec![
                    32_100.0, 33_600.0, 36_700.0, 36_200.0, 37_700.0, 37_900.0, 36_400.0, 38_500.0, 40_000.0,
                    45_000.0, 43_200.0, 45_000.0,
                ],
                renegotiated: vec![
                    1_200.0, 2_400.0, 1_800.0, 3_100.0, 2_200.0, 1_900.0, 2_600.0, 3_300.0, 2_900.0, 7_500.0,
                    4_100.0, 3_600.0,
                ],
                expense: vec![
                    27_900.0, 28_400.0, 28_800.0, 29_100.0, 29_000.0, 29_300.0, 29_300.0, 29_800.0, 30_500.0,
                    32_000.0, 31_100.0, 32_200.0,
                ],
            },
        ),
    ])
});

fn snapshot(
    revenue: f64,
    expense: f64,
    (active_contracts, pending_contracts, overdue_contracts): (u32, u32, u32),
    revenue_by_month: &[(&str, f64)],
    expense_by_category: &[(&str, f64)],
    (revenue_growth, efficiency, satisfaction, productivity): (f64, f64, f64, f64),
) -> FinancialSnapshot {
    let profit = revenue - expense;
    let net_margin = if revenue > 0.0 {
        (profit / revenue * 1000.0).round() / 10.0
    } else {
        0.0
    };

    FinancialSnapshot {
        revenue,
        expense,
        profit,
        net_margin,
        active_contracts,
        pending_contracts,
        overdue_contracts,
        revenue_by_month: revenue_by_month
            .iter()
            .map(|(month, value)| MonthlyValue {
                month: month.to_string(),
                value: *value,
            })
            .collect(),
        expense_by_category: expense_by_category
            .iter()
            .map(|(category, value)| CategoryValue {
                category: category.to_string(),
                value: *value,
            })
            .collect(),
        indicators: SnapshotIndicators {
            revenue_growth,
            efficiency,
            satisfaction,
            productivity,
        },
    }
}

fn contract_averages(average_contract_value: f64, average_recurring_value: f64) -> ContractAverages {
    ContractAverages {
        average_contract_value,
        average_recurring_value,
    }
}
