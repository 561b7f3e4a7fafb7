//! Chart series builder.
//!
//! Turns per-bucket category values into label-aligned series plus the
//! projected balance. Month keys are charted day by day, quarter and year keys
//! month by month. Series are always rebuilt wholesale for a key, never
//! patched.

use chrono::{Datelike, NaiveDate};
use log::debug;
use shared::{CategorySeries, ChartPeriod, ChartSeries, PeriodKey, TransactionKind, TransactionRecord};

use crate::domain::calendar::CalendarService;
use crate::domain::snapshot_tables::CATEGORY_SERIES;

/// Revenue booked under this category is charted as renegotiated
pub const RENEGOTIATION_CATEGORY: &str = "Renegociação";

#[derive(Clone, Default)]
pub struct ChartSeriesBuilder {
    calendar: CalendarService,
}

impl ChartSeriesBuilder {
    pub fn new(calendar: CalendarService) -> Self {
        Self { calendar }
    }

    pub fn chart_period_for(&self, key: &PeriodKey) -> ChartPeriod {
        match key {
            PeriodKey::Month { .. } => ChartPeriod::DailyWithinMonth,
            PeriodKey::Quarter { .. } | PeriodKey::Year(_) => ChartPeriod::MonthlyWithinYear,
        }
    }

    /// Calendar months covered by `key`, in order
    fn months_of(&self, key: &PeriodKey) -> Vec<u32> {
        match *key {
            PeriodKey::Month { month, .. } => vec![month],
            PeriodKey::Quarter { quarter, .. } => {
                let first = (quarter - 1) * 3 + 1;
                (first..first + 3).collect()
            }
            PeriodKey::Year(_) => (1..=12).collect(),
        }
    }

    /// X-axis labels: day numbers for a month, pt-BR abbreviations otherwise
    pub fn labels(&self, key: &PeriodKey) -> Vec<String> {
        match *key {
            PeriodKey::Month { year, month } => {
                (1..=self.calendar.days_in_month(month, year)).map(|day| day.to_string()).collect()
            }
            _ => self
                .months_of(key)
                .into_iter()
                .map(|month| self.calendar.month_abbreviation(month).to_string())
                .collect(),
        }
    }

    /// Pad with zeros or truncate so the series matches the label count
    pub fn align(&self, values: &[f64], len: usize) -> Vec<f64> {
        let mut aligned: Vec<f64> = values.iter().copied().take(len).collect();
        aligned.resize(len, 0.0);
        aligned
    }

    /// Running sum of `(revenue + renegotiated) - expense` seeded with the
    /// opening balance. Returns the series floored at zero for rendering and
    /// the raw final value.
    pub fn projected_balance(
        &self,
        opening_balance: f64,
        revenue: &[f64],
        renegotiated: &[f64],
        expense: &[f64],
    ) -> (Vec<f64>, f64) {
        let mut running = opening_balance;
        let mut rendered = Vec::with_capacity(revenue.len());

        for ((income, renegotiated), expense) in revenue.iter().zip(renegotiated).zip(expense) {
            running += (income + renegotiated) - expense;
            rendered.push(running.max(0.0));
        }

        (rendered, running)
    }

    pub fn build(&self, key: &PeriodKey, category: &CategorySeries, opening_balance: f64) -> ChartSeries {
        let labels = self.labels(key);
        let len = labels.len();

        let revenue = self.align(&category.revenue, len);
        let renegotiated = self.align(&category.renegotiated, len);
        let expense = self.align(&category.expense, len);
        let (projected_balance, period_end_balance) =
            self.projected_balance(opening_balance, &revenue, &renegotiated, &expense);

        debug!(
            "📈 CHART: Built {} buckets for {} (period end balance {:.2})",
            len, key, period_end_balance
        );

        ChartSeries {
            period: self.chart_period_for(key),
            labels,
            revenue,
            renegotiated,
            expense,
            projected_balance,
            period_end_balance,
        }
    }

    /// Seeded bucket values for `key`, if any
    pub fn seeded_series(&self, key: &PeriodKey) -> Option<CategorySeries> {
        CATEGORY_SERIES.get(key.to_string().as_str()).cloned()
    }

    /// Bucket records by due date into the buckets of `key`
    pub fn bucket_transactions(&self, key: &PeriodKey, records: &[TransactionRecord]) -> CategorySeries {
        let len = self.labels(key).len();
        let mut series = CategorySeries {
            revenue: vec![0.0; len],
            renegotiated: vec![0.0; len],
            expense: vec![0.0; len],
        };

        for record in records {
            let Some(index) = self.bucket_index(key, record.due_date) else {
                continue;
            };
            let target = match record.kind {
                TransactionKind::Revenue if record.category == RENEGOTIATION_CATEGORY => &mut series.renegotiated,
                TransactionKind::Revenue => &mut series.revenue,
                TransactionKind::Expense => &mut series.expense,
            };
            target[index] += record.amount;
        }

        series
    }

    /// Seeded values when present, otherwise bucketed from `records`
    pub fn category_series(&self, key: &PeriodKey, records: &[TransactionRecord]) -> CategorySeries {
        self.seeded_series(key)
            .unwrap_or_else(|| self.bucket_transactions(key, records))
    }

    fn bucket_index(&self, key: &PeriodKey, date: NaiveDate) -> Option<usize> {
        if date.year() != key.year() {
            return None;
        }
        match *key {
            PeriodKey::Month { month, .. } => (date.month() == month).then(|| date.day0() as usize),
            _ => self.months_of(key).iter().position(|&m| m == date.month()),
        }
    }
}
