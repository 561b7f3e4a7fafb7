//! Assembles the snapshot, metrics and chart series of one key into a single
//! [`PeriodView`], so they can only ever be swapped together.

use log::info;
use shared::{PeriodKey, PeriodView, TransactionRecord};

use crate::domain::chart_series::ChartSeriesBuilder;
use crate::domain::snapshot_service::SnapshotService;

#[derive(Clone, Default)]
pub struct PeriodViewBuilder {
    snapshots: SnapshotService,
    charts: ChartSeriesBuilder,
}

impl PeriodViewBuilder {
    pub fn new(snapshots: SnapshotService, charts: ChartSeriesBuilder) -> Self {
        Self { snapshots, charts }
    }

    pub fn build(&self, key: PeriodKey, records: &[TransactionRecord], opening_balance: f64) -> PeriodView {
        let snapshot = self.snapshots.lookup(&key);
        let metrics = self.snapshots.metrics(&key);
        let profit_status = self.snapshots.profit_status(self.snapshots.profit_margin(&snapshot));
        let category = self.charts.category_series(&key, records);
        let series = self.charts.build(&key, &category, opening_balance);

        info!("📊 SNAPSHOT: Built view for {} ({:?})", key, profit_status);

        PeriodView {
            key,
            snapshot,
            metrics,
            profit_status,
            series,
        }
    }
}
