//! AdvanceCycleHandler - Command handler that publishes the next article.
//!
//! One invocation moves the cursor exactly one position. The record is
//! written back with a compare-and-swap on its store version; a lost race
//! re-runs the whole read-modify-write against the fresh record.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::domain::cycle::{CycleError, CycleRecord, CycleSnapshot};
use crate::domain::foundation::Timestamp;
use crate::ports::{ArticleSource, CursorStore};

use super::common::load_candidates;

/// Tuning for the advance step.
#[derive(Debug, Clone)]
pub struct AdvanceCycleConfig {
    /// Wait for the previous position to be acknowledged before advancing.
    pub consumption_gating: bool,
    /// Upper bound on the acknowledgment wait.
    pub consumption_wait: Duration,
    /// Interval between acknowledgment checks.
    pub consumption_poll: Duration,
    /// Read-modify-write attempts before giving up on a contended record.
    pub max_write_attempts: u32,
    /// Cycles kept in the article map, the active one included.
    pub retained_cycles: u64,
}

impl Default for AdvanceCycleConfig {
    fn default() -> Self {
        Self {
            consumption_gating: false,
            consumption_wait: Duration::from_secs(10),
            consumption_poll: Duration::from_secs(1),
            max_write_attempts: 3,
            retained_cycles: 2,
        }
    }
}

/// Command to advance the cursor by one position.
#[derive(Debug, Clone, Default)]
pub struct AdvanceCycleCommand;

/// Outcome of an advance.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceCycleResult {
    /// The cursor moved; the snapshot reflects the persisted state.
    Advanced(CycleSnapshot),
    /// The candidate set was empty; nothing was written.
    NoArticles,
}

/// Handler for advancing the cycle.
pub struct AdvanceCycleHandler {
    source: Arc<dyn ArticleSource>,
    store: Arc<dyn CursorStore>,
    config: AdvanceCycleConfig,
}

impl AdvanceCycleHandler {
    pub fn new(
        source: Arc<dyn ArticleSource>,
        store: Arc<dyn CursorStore>,
        config: AdvanceCycleConfig,
    ) -> Self {
        Self {
            source,
            store,
            config,
        }
    }

    pub async fn handle(
        &self,
        _cmd: AdvanceCycleCommand,
    ) -> Result<AdvanceCycleResult, CycleError> {
        let candidates = load_candidates(self.source.as_ref()).await?;
        if candidates.is_empty() {
            debug!("No publishable articles, cursor left in place");
            return Ok(AdvanceCycleResult::NoArticles);
        }

        if self.config.consumption_gating {
            if let Some(stored) = self.store.load().await? {
                let parked = stored.value.cursor.current_index;
                if parked >= 0 {
                    self.wait_for_consumption(parked).await?;
                }
            }
        }

        let attempts = self.config.max_write_attempts.max(1);
        for attempt in 1..=attempts {
            let stored = self.store.load().await?;
            let (version, mut record) = match stored {
                Some(stored) => (Some(stored.version), stored.value),
                None => (None, CycleRecord::fresh(Timestamp::now())),
            };

            let Some(snapshot) =
                record.advance(&candidates, Timestamp::now(), self.config.retained_cycles)
            else {
                return Ok(AdvanceCycleResult::NoArticles);
            };

            let written = match version {
                Some(expected) => self.store.compare_and_swap(expected, &record).await,
                None => self.store.insert(&record).await,
            };

            match written {
                Ok(_) => {
                    if snapshot.metadata.is_new_cycle {
                        info!(cycle_count = snapshot.metadata.cycle_count, "Started new cycle");
                    }
                    info!(
                        index = snapshot.metadata.current_index,
                        cycle_count = snapshot.metadata.cycle_count,
                        article_id = %snapshot.article.id,
                        "Advanced cursor"
                    );
                    return Ok(AdvanceCycleResult::Advanced(snapshot));
                }
                Err(e) if e.is_race() => {
                    warn!(attempt, error = %e, "Cursor write lost a race, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(CycleError::store_conflict(attempts))
    }

    /// Blocks until `index` is acknowledged or the wait bound passes.
    async fn wait_for_consumption(&self, index: i64) -> Result<(), CycleError> {
        let deadline = Instant::now() + self.config.consumption_wait;
        loop {
            let consumed = self.store.load_consumption().await?;
            if consumed.as_ref().is_some_and(|record| record.releases(index)) {
                debug!(index, "Previous article acknowledged");
                return Ok(());
            }

            let now = Instant::now();
            if now >= deadline {
                warn!(
                    index,
                    last_consumed = consumed.map(|record| record.last_consumed_index),
                    "Consumption wait timed out, advancing anyway"
                );
                return Ok(());
            }
            tokio::time::sleep(self.config.consumption_poll.min(deadline - now)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::cursor_store::InMemoryCursorStore;
    use crate::adapters::source::InMemorySource;
    use crate::domain::cycle::ConsumptionRecord;
    use crate::ports::{StoreError, Versioned};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn source(ids: &[&str]) -> Arc<InMemorySource> {
        Arc::new(InMemorySource::new(
            ids.iter()
                .map(|id| json!({ "message_id": id, "link": format!("https://example.com/{}", id) }))
                .collect(),
        ))
    }

    fn handler(
        source: Arc<InMemorySource>,
        store: Arc<dyn CursorStore>,
        config: AdvanceCycleConfig,
    ) -> AdvanceCycleHandler {
        AdvanceCycleHandler::new(source, store, config)
    }

    async fn advance(handler: &AdvanceCycleHandler) -> CycleSnapshot {
        match handler.handle(AdvanceCycleCommand).await.unwrap() {
            AdvanceCycleResult::Advanced(snapshot) => snapshot,
            AdvanceCycleResult::NoArticles => panic!("expected an advance"),
        }
    }

    /// Store that reports a conflict for the first `conflicts` conditional writes.
    struct ContendedStore {
        inner: InMemoryCursorStore,
        conflicts: AtomicU32,
    }

    impl ContendedStore {
        fn new(conflicts: u32) -> Self {
            Self {
                inner: InMemoryCursorStore::new(),
                conflicts: AtomicU32::new(conflicts),
            }
        }

        fn lose_race(&self) -> bool {
            self.conflicts
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
        }
    }

    #[async_trait]
    impl CursorStore for ContendedStore {
        async fn load(&self) -> Result<Option<Versioned<CycleRecord>>, StoreError> {
            self.inner.load().await
        }
        async fn insert(&self, record: &CycleRecord) -> Result<u64, StoreError> {
            if self.lose_race() {
                return Err(StoreError::AlreadyExists);
            }
            self.inner.insert(record).await
        }
        async fn compare_and_swap(
            &self,
            expected: u64,
            record: &CycleRecord,
        ) -> Result<u64, StoreError> {
            if self.lose_race() {
                return Err(StoreError::Conflict);
            }
            self.inner.compare_and_swap(expected, record).await
        }
        async fn put(&self, record: &CycleRecord) -> Result<u64, StoreError> {
            self.inner.put(record).await
        }
        async fn load_consumption(&self) -> Result<Option<ConsumptionRecord>, StoreError> {
            self.inner.load_consumption().await
        }
        async fn save_consumption(&self, record: &ConsumptionRecord) -> Result<(), StoreError> {
            self.inner.save_consumption(record).await
        }
        async fn clear_consumption(&self) -> Result<(), StoreError> {
            self.inner.clear_consumption().await
        }
    }

    #[tokio::test]
    async fn walks_three_articles_and_wraps() {
        let store = Arc::new(InMemoryCursorStore::new());
        let handler = handler(source(&["A", "B", "C"]), store, AdvanceCycleConfig::default());

        let expected = [(0, "A", 0, false), (1, "B", 0, false), (2, "C", 0, false), (0, "A", 1, true)];
        for (index, id, cycle, new_cycle) in expected {
            let snapshot = advance(&handler).await;
            assert_eq!(snapshot.metadata.current_index, index);
            assert_eq!(snapshot.article.id.as_str(), id);
            assert_eq!(snapshot.metadata.cycle_count, cycle);
            assert_eq!(snapshot.metadata.is_new_cycle, new_cycle);
            assert_eq!(snapshot.metadata.total_articles, 3);
        }
    }

    #[tokio::test]
    async fn advance_persists_cursor() {
        let store = Arc::new(InMemoryCursorStore::new());
        let handler = handler(source(&["A", "B"]), store.clone(), AdvanceCycleConfig::default());

        advance(&handler).await;
        advance(&handler).await;

        let stored = store.load().await.unwrap().unwrap();
        assert_eq!(stored.value.cursor.current_index, 1);
        assert_eq!(stored.version, 2);
    }

    #[tokio::test]
    async fn empty_source_reports_no_articles_without_writing() {
        let store = Arc::new(InMemoryCursorStore::new());
        let handler = handler(source(&[]), store.clone(), AdvanceCycleConfig::default());

        let result = handler.handle(AdvanceCycleCommand).await.unwrap();

        assert_eq!(result, AdvanceCycleResult::NoArticles);
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn invalid_links_are_never_published() {
        let source = Arc::new(InMemorySource::new(vec![
            json!({ "message_id": "bad", "link": "not-a-url" }),
            json!({ "message_id": "good", "link": "https://example.com/good" }),
        ]));
        let handler = handler(source, Arc::new(InMemoryCursorStore::new()), AdvanceCycleConfig::default());

        for _ in 0..3 {
            let snapshot = advance(&handler).await;
            assert_eq!(snapshot.article.id.as_str(), "good");
            assert_eq!(snapshot.metadata.total_articles, 1);
        }
    }

    #[tokio::test]
    async fn lost_races_are_retried() {
        let store = Arc::new(ContendedStore::new(2));
        let handler = handler(source(&["A", "B"]), store.clone(), AdvanceCycleConfig::default());

        let snapshot = advance(&handler).await;

        assert_eq!(snapshot.metadata.current_index, 0);
        assert_eq!(store.load().await.unwrap().unwrap().value.cursor.current_index, 0);
    }

    #[tokio::test]
    async fn persistent_contention_fails_with_conflict() {
        let store = Arc::new(ContendedStore::new(10));
        let handler = handler(source(&["A"]), store, AdvanceCycleConfig::default());

        let result = handler.handle(AdvanceCycleCommand).await;

        assert_eq!(result, Err(CycleError::store_conflict(3)));
    }

    #[tokio::test]
    async fn concurrent_advances_never_lose_an_update() {
        let store = Arc::new(InMemoryCursorStore::new());
        let config = AdvanceCycleConfig {
            max_write_attempts: 50,
            ..AdvanceCycleConfig::default()
        };
        let handler = Arc::new(handler(source(&["A", "B", "C", "D", "E"]), store.clone(), config));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let handler = handler.clone();
                tokio::spawn(async move { handler.handle(AdvanceCycleCommand).await })
            })
            .collect();
        let results = futures::future::join_all(tasks).await;

        let succeeded = results
            .into_iter()
            .filter(|r| matches!(r, Ok(Ok(AdvanceCycleResult::Advanced(_)))))
            .count() as u64;
        let stored = store.load().await.unwrap().unwrap();
        assert_eq!(stored.version, succeeded);
        assert_eq!(stored.value.cursor.current_index, ((succeeded - 1) % 5) as i64);
        assert_eq!(stored.value.cursor.cycle_count, (succeeded - 1) / 5);
    }

    #[tokio::test]
    async fn gated_advance_proceeds_once_acknowledged() {
        let store = Arc::new(InMemoryCursorStore::new());
        let config = AdvanceCycleConfig {
            consumption_gating: true,
            consumption_wait: Duration::from_secs(5),
            consumption_poll: Duration::from_millis(10),
            ..AdvanceCycleConfig::default()
        };
        let handler = handler(source(&["A", "B"]), store.clone(), config);

        advance(&handler).await;
        store
            .save_consumption(&ConsumptionRecord::new(0, Timestamp::now()))
            .await
            .unwrap();

        let started = Instant::now();
        let snapshot = advance(&handler).await;

        assert_eq!(snapshot.metadata.current_index, 1);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn gated_advance_times_out_and_proceeds() {
        let store = Arc::new(InMemoryCursorStore::new());
        let config = AdvanceCycleConfig {
            consumption_gating: true,
            consumption_wait: Duration::from_millis(50),
            consumption_poll: Duration::from_millis(10),
            ..AdvanceCycleConfig::default()
        };
        let handler = handler(source(&["A", "B"]), store, config);

        advance(&handler).await;
        let started = Instant::now();
        let snapshot = advance(&handler).await;

        assert_eq!(snapshot.metadata.current_index, 1);
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn fresh_cursor_never_waits() {
        let config = AdvanceCycleConfig {
            consumption_gating: true,
            consumption_wait: Duration::from_secs(30),
            ..AdvanceCycleConfig::default()
        };
        let handler = handler(source(&["A"]), Arc::new(InMemoryCursorStore::new()), config);

        let started = Instant::now();
        advance(&handler).await;

        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
