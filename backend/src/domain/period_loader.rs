//! Asynchronous period loading where the last request wins.
//!
//! [`PeriodLoader::begin`] takes a ticket from a generation counter and
//! [`PeriodLoader::finish`] asks the provider. The answer is applied only if no
//! newer ticket was taken in the meantime; otherwise it is reported as stale
//! and dropped. Callers that order loads by some other state take the ticket
//! while holding that state's lock. The loading flag is published on a
//! `watch` channel and stays up until the newest request settles.

use async_trait::async_trait;
use log::{debug, info, warn};
use shared::{PeriodKey, PeriodView};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::period_view::PeriodViewBuilder;
use crate::error::DashboardResult;
use crate::storage::TransactionRepository;

/// Source of period views, local or remote
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    async fn load(&self, key: PeriodKey) -> DashboardResult<PeriodView>;
}

/// Provider backed by the seeded tables and the local transaction store
pub struct StaticSnapshotProvider {
    views: PeriodViewBuilder,
    repository: Arc<dyn TransactionRepository>,
    opening_balance: f64,
}

impl StaticSnapshotProvider {
    pub fn new(views: PeriodViewBuilder, repository: Arc<dyn TransactionRepository>, opening_balance: f64) -> Self {
        Self {
            views,
            repository,
            opening_balance,
        }
    }
}

#[async_trait]
impl SnapshotProvider for StaticSnapshotProvider {
    async fn load(&self, key: PeriodKey) -> DashboardResult<PeriodView> {
        let records = self.repository.list()?;
        Ok(self.views.build(key, &records, self.opening_balance))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Applied(PeriodView),
    /// A newer load superseded this one; its result was discarded
    Stale { key: PeriodKey },
}

/// A started load; only the newest ticket's answer is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub key: PeriodKey,
    generation: u64,
}

#[derive(Clone)]
pub struct PeriodLoader {
    provider: Arc<dyn SnapshotProvider>,
    generation: Arc<AtomicU64>,
    loading: Arc<watch::Sender<bool>>,
}

impl PeriodLoader {
    pub fn new(provider: Arc<dyn SnapshotProvider>) -> Self {
        let (loading, _) = watch::channel(false);
        Self {
            provider,
            generation: Arc::new(AtomicU64::new(0)),
            loading: Arc::new(loading),
        }
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Invalidate every in-flight load
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.loading.send_replace(false);
        debug!("⏳ LOADER: Cancelled in-flight loads");
    }

    /// Supersede every earlier ticket and raise the loading flag
    pub fn begin(&self, key: PeriodKey) -> LoadTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.loading.send_replace(true);
        debug!("⏳ LOADER: Loading {} (ticket {})", key, generation);
        LoadTicket { key, generation }
    }

    pub async fn finish(&self, ticket: LoadTicket) -> DashboardResult<LoadOutcome> {
        let key = ticket.key;
        let result = self.provider.load(key).await;

        if self.generation.load(Ordering::SeqCst) != ticket.generation {
            info!("⏳ LOADER: Discarding stale response for {}", key);
            return Ok(LoadOutcome::Stale { key });
        }
        self.loading.send_replace(false);

        let view = result?;
        if view.key != key {
            warn!("⏳ LOADER: Provider answered {} for request {}, discarding", view.key, key);
            return Ok(LoadOutcome::Stale { key });
        }
        Ok(LoadOutcome::Applied(view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::storage::InMemoryTransactionRepository;
    use std::time::Duration;

    /// Answers after a per-key delay; keys starting with "1999" fail
    struct DelayedProvider {
        views: PeriodViewBuilder,
    }

    #[async_trait]
    impl SnapshotProvider for DelayedProvider {
        async fn load(&self, key: PeriodKey) -> DashboardResult<PeriodView> {
            let delay = match key {
                PeriodKey::Month { .. } => 150,
                _ => 10,
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            if key.year() == 1999 {
                return Err(DashboardError::Provider {
                    key: key.to_string(),
                    reason: "upstream unavailable".to_string(),
                });
            }
            Ok(self.views.build(key, &[], 0.0))
        }
    }

    fn seeded_records() -> Vec<shared::TransactionRecord> {
        crate::domain::TransactionMapper::to_records(crate::storage::seed::embedded_seed().unwrap()).unwrap()
    }

    fn loader() -> PeriodLoader {
        PeriodLoader::new(Arc::new(DelayedProvider {
            views: PeriodViewBuilder::default(),
        }))
    }

    async fn load(loader: &PeriodLoader, key: PeriodKey) -> DashboardResult<LoadOutcome> {
        let ticket = loader.begin(key);
        loader.finish(ticket).await
    }

    #[tokio::test]
    async fn test_single_load_applies() {
        let loader = loader();
        let key: PeriodKey = "2025-Q4".parse().unwrap();

        match load(&loader, key).await.unwrap() {
            LoadOutcome::Applied(view) => assert_eq!(view.key, key),
            other => panic!("expected applied, got {:?}", other),
        }
        assert!(!loader.is_loading());
    }

    #[tokio::test]
    async fn test_newer_request_supersedes_slow_one() {
        let loader = loader();
        let slow: PeriodKey = "2025-10".parse().unwrap();
        let fast: PeriodKey = "2025".parse().unwrap();

        let first = {
            let loader = loader.clone();
            tokio::spawn(async move { load(&loader, slow).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(loader.is_loading());

        let second = load(&loader, fast).await.unwrap();
        let first = first.await.unwrap().unwrap();

        assert!(matches!(second, LoadOutcome::Applied(ref view) if view.key == fast));
        assert_eq!(first, LoadOutcome::Stale { key: slow });
        assert!(!loader.is_loading());
    }

    #[tokio::test]
    async fn test_loading_flag_stays_up_for_newest_request() {
        let loader = loader();

        let slow = {
            let loader = loader.clone();
            tokio::spawn(async move { load(&loader, "2025-09".parse().unwrap()).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        let newest = {
            let loader = loader.clone();
            tokio::spawn(async move { load(&loader, "2025-11".parse().unwrap()).await })
        };

        // First request settles (stale) while the newest is still running
        slow.await.unwrap().unwrap();
        assert!(loader.is_loading());

        newest.await.unwrap().unwrap();
        assert!(!loader.is_loading());
    }

    #[tokio::test]
    async fn test_ticket_order_decides_not_completion_order() {
        let loader = loader();
        let older = loader.begin("2025".parse().unwrap());
        let newer = loader.begin("2025-Q4".parse().unwrap());

        // The newer ticket settles first, the older one afterwards
        let newer = loader.finish(newer).await.unwrap();
        let older = loader.finish(older).await.unwrap();

        assert!(matches!(newer, LoadOutcome::Applied(ref view) if view.key.to_string() == "2025-Q4"));
        assert!(matches!(older, LoadOutcome::Stale { .. }));
        assert!(!loader.is_loading());
    }

    #[tokio::test]
    async fn test_failure_of_latest_request_clears_loading() {
        let loader = loader();
        let result = load(&loader, "1999".parse().unwrap()).await;

        assert!(matches!(result, Err(DashboardError::Provider { .. })));
        assert!(!loader.is_loading());
    }

    #[tokio::test]
    async fn test_cancel_discards_in_flight() {
        let loader = loader();
        let pending = {
            let loader = loader.clone();
            tokio::spawn(async move { load(&loader, "2025-10".parse().unwrap()).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        loader.cancel();

        assert!(matches!(pending.await.unwrap().unwrap(), LoadOutcome::Stale { .. }));
        assert!(!loader.is_loading());
    }

    #[tokio::test]
    async fn test_static_provider_uses_repository() {
        let repository = Arc::new(InMemoryTransactionRepository::new(seeded_records()));
        let provider = StaticSnapshotProvider::new(PeriodViewBuilder::default(), repository, 0.0);

        // No seeded series for September, so it is bucketed from the store
        let view = provider.load("2025-09".parse().unwrap()).await.unwrap();
        assert_eq!(view.series.labels.len(), 30);
        assert_eq!(view.series.revenue[1], 3200.0);
        assert_eq!(view.series.renegotiated[17], 850.0);
        assert_eq!(view.series.expense[14], 9200.0);
    }
}
