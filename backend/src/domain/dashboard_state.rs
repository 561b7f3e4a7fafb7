//! Dashboard state and its single update function.
//!
//! [`DashboardReducer::apply`] is pure: it takes the current state and one
//! event and returns the next state plus the effects to run. The
//! [`DashboardController`] owns the one live state, runs effects through the
//! [`PeriodLoader`] and feeds the results back in as events. Load tickets are
//! taken under the state lock, so the newest selection always holds the
//! newest ticket.
//!
//! The selected key is re-derived from the confirmed range start (or today)
//! whenever the range or the period type changes. A loaded view is accepted
//! only while its key is still the selected key.

use chrono::NaiveDate;
use log::{debug, info, warn};
use shared::{
    ChartPeriod, DashboardEvent, DashboardState, DateRange, PeriodKey, PeriodType, RangeAction, RangeSelection,
};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::chart_series::ChartSeriesBuilder;
use crate::domain::period_loader::{LoadOutcome, LoadTicket, PeriodLoader};
use crate::domain::range_selector::RangeSelector;
use crate::domain::snapshot_service::SnapshotService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEffect {
    LoadPeriod(PeriodKey),
    CancelLoads,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardTransition {
    pub state: DashboardState,
    pub effects: Vec<DashboardEffect>,
}

#[derive(Clone, Default)]
pub struct DashboardReducer {
    range: RangeSelector,
    snapshots: SnapshotService,
    charts: ChartSeriesBuilder,
}

impl DashboardReducer {
    pub fn new(range: RangeSelector, snapshots: SnapshotService, charts: ChartSeriesBuilder) -> Self {
        Self {
            range,
            snapshots,
            charts,
        }
    }

    /// Unmounted state anchored on `today`, month granularity
    pub fn initial_state(&self, today: NaiveDate) -> DashboardState {
        DashboardState {
            mounted: false,
            today,
            period_type: PeriodType::Month,
            selected_range: DateRange::default(),
            picker: self.range.initial_state(today),
            selected_key: self.snapshots.key_for(PeriodType::Month, today),
            view: None,
            loading: false,
        }
    }

    pub fn apply(&self, state: &DashboardState, event: DashboardEvent) -> DashboardTransition {
        let mut next = state.clone();
        let mut effects = Vec::new();

        if !state.mounted && !matches!(event, DashboardEvent::Mounted { .. }) {
            debug!("🖥️ DASHBOARD: Ignoring {:?} while unmounted", event);
            return DashboardTransition { state: next, effects };
        }

        match event {
            DashboardEvent::Mounted { today } => {
                next = DashboardState {
                    mounted: true,
                    loading: true,
                    ..self.initial_state(today)
                };
                effects.push(DashboardEffect::LoadPeriod(next.selected_key));
            }
            DashboardEvent::Unmounted => {
                next.mounted = false;
                next.loading = false;
                next.picker.open = false;
                effects.push(DashboardEffect::CancelLoads);
            }
            DashboardEvent::Picker { action } => {
                let transition = self.range.apply(&state.picker, action);
                next.picker = transition.state;
                if let Some(range) = transition.emitted {
                    next.selected_range = range;
                    self.reselect(&mut next, &mut effects);
                }
            }
            DashboardEvent::PeriodTypeToggled => {
                next.period_type = state.period_type.next();
                self.reselect(&mut next, &mut effects);
            }
            DashboardEvent::PeriodTypeSelected { period_type } => {
                next.period_type = period_type;
                self.reselect(&mut next, &mut effects);
            }
            DashboardEvent::ChartPeriodToggled => {
                next.period_type = match self.charts.chart_period_for(&state.selected_key).toggled() {
                    ChartPeriod::DailyWithinMonth => PeriodType::Month,
                    ChartPeriod::MonthlyWithinYear => PeriodType::Year,
                };
                self.reselect(&mut next, &mut effects);
            }
            DashboardEvent::ViewLoaded { view } => {
                if view.key == state.selected_key {
                    info!("🖥️ DASHBOARD: Showing {}", view.key);
                    next.view = Some(view);
                    next.loading = false;
                } else {
                    debug!(
                        "🖥️ DASHBOARD: Dropping view for {} (selected {})",
                        view.key, state.selected_key
                    );
                }
            }
            DashboardEvent::LoadFailed { key, message } => {
                if key == state.selected_key {
                    warn!("🖥️ DASHBOARD: Loading {} failed: {}", key, message);
                    next.loading = false;
                }
            }
        }

        DashboardTransition { state: next, effects }
    }

    fn anchor(&self, state: &DashboardState) -> NaiveDate {
        state.selected_range.start.unwrap_or(state.today)
    }

    fn reselect(&self, next: &mut DashboardState, effects: &mut Vec<DashboardEffect>) {
        let key = self.snapshots.key_for(next.period_type, self.anchor(next));
        let showing = next.view.as_ref().map(|view| view.key);
        if key == next.selected_key && showing == Some(key) {
            return;
        }

        debug!("🖥️ DASHBOARD: Selected key {} -> {}", next.selected_key, key);
        next.selected_key = key;
        next.loading = true;
        effects.push(DashboardEffect::LoadPeriod(key));
    }
}

/// Owner of the live dashboard state
#[derive(Clone)]
pub struct DashboardController {
    reducer: DashboardReducer,
    loader: PeriodLoader,
    state: Arc<Mutex<DashboardState>>,
}

impl DashboardController {
    pub fn new(reducer: DashboardReducer, loader: PeriodLoader, today: NaiveDate) -> Self {
        let state = reducer.initial_state(today);
        Self {
            reducer,
            loader,
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub async fn state(&self) -> DashboardState {
        self.state.lock().await.clone()
    }

    /// Apply one event, then run its effects to completion
    pub async fn dispatch(&self, event: DashboardEvent) -> DashboardState {
        let tickets = self.apply(event).await;
        self.run_loads(tickets).await;
        self.state().await
    }

    pub async fn on_mount(&self, today: NaiveDate) -> DashboardState {
        self.dispatch(DashboardEvent::Mounted { today }).await
    }

    pub async fn on_unmount(&self) -> DashboardState {
        self.dispatch(DashboardEvent::Unmounted).await
    }

    pub async fn on_period_change(&self, period_type: PeriodType) -> DashboardState {
        self.dispatch(DashboardEvent::PeriodTypeSelected { period_type }).await
    }

    /// Whether a period load is still in flight
    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    /// Convenience for hosts that drive the picker with two clicks and a
    /// confirm. The whole sequence is applied under one lock.
    pub async fn select_range(&self, start: NaiveDate, end: NaiveDate) -> DashboardState {
        let tickets = {
            let mut state = self.state.lock().await;
            let mut actions = Vec::with_capacity(4);
            if !state.picker.open {
                actions.push(RangeAction::Open { today: state.today });
            } else if !matches!(state.picker.selection, RangeSelection::Empty) {
                actions.push(RangeAction::Clear);
            }
            actions.extend([
                RangeAction::Select { date: start },
                RangeAction::Select { date: end },
                RangeAction::Confirm,
            ]);

            let mut tickets = Vec::new();
            for action in actions {
                tickets.extend(self.apply_locked(&mut state, DashboardEvent::Picker { action }));
            }
            tickets
        };

        self.run_loads(tickets).await;
        self.state().await
    }

    async fn apply(&self, event: DashboardEvent) -> Vec<LoadTicket> {
        let mut state = self.state.lock().await;
        self.apply_locked(&mut state, event)
    }

    fn apply_locked(&self, state: &mut DashboardState, event: DashboardEvent) -> Vec<LoadTicket> {
        let transition = self.reducer.apply(state, event);
        *state = transition.state;

        let mut tickets = Vec::new();
        for effect in transition.effects {
            match effect {
                DashboardEffect::CancelLoads => self.loader.cancel(),
                DashboardEffect::LoadPeriod(key) => tickets.push(self.loader.begin(key)),
            }
        }
        tickets
    }

    async fn run_loads(&self, tickets: Vec<LoadTicket>) {
        for ticket in tickets {
            let key = ticket.key;
            let event = match self.loader.finish(ticket).await {
                Ok(LoadOutcome::Applied(view)) => DashboardEvent::ViewLoaded { view },
                Ok(LoadOutcome::Stale { .. }) => continue,
                Err(e) => DashboardEvent::LoadFailed {
                    key,
                    message: e.to_string(),
                },
            };
            // Load results never start further loads
            let _ = self.apply(event).await;
        }
    }
}
