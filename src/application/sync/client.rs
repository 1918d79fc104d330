//! SyncClient - Background poller that keeps a local feed in step with the
//! cycling engine.
//!
//! ## Loop
//!
//! 1. On start, load the active cycle's snapshot (best effort)
//! 2. Advance the engine, merge the result, notify subscribers
//! 3. Acknowledge the shown article on a detached task
//! 4. Sleep `poll_interval`, or a backoff delay after a failure
//!
//! After more than `max_retries` consecutive failures the loop halts and stays
//! down until [`SyncClient::start`] is called again.
//!
//! ## Shutdown
//!
//! [`SyncClient::stop`] flips a watch channel. The loop checks it between
//! iterations and while sleeping; a request already in flight runs to
//! completion and its result is dropped.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::domain::article::Article;
use crate::domain::feed::{FeedCache, FeedMetadata, FeedOrder, FeedUpdate};
use crate::domain::foundation::Backoff;
use crate::ports::{ApiError, CycleApi, CyclePayload};

use super::subscription::{Subscribers, Subscription};

/// Configuration for the SyncClient.
#[derive(Debug, Clone)]
pub struct SyncClientConfig {
    /// Delay between successful polls.
    pub poll_interval: Duration,
    /// Delay policy after failed or empty polls.
    pub backoff: Backoff,
    /// Consecutive failures tolerated before the loop halts.
    pub max_retries: u32,
    pub feed_order: FeedOrder,
}

impl Default for SyncClientConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            backoff: Backoff::default(),
            max_retries: 3,
            feed_order: FeedOrder::NewestFirst,
        }
    }
}

impl SyncClientConfig {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_feed_order(mut self, order: FeedOrder) -> Self {
        self.feed_order = order;
        self
    }
}

/// State shared between the client handle and its poll task.
struct Shared {
    api: Arc<dyn CycleApi>,
    config: SyncClientConfig,
    cache: Mutex<FeedCache>,
    subscribers: Arc<Subscribers>,
}

struct Running {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Client-side synchronizer for the news wire.
pub struct SyncClient {
    shared: Arc<Shared>,
    running: Mutex<Option<Running>>,
}

impl SyncClient {
    pub fn new(api: Arc<dyn CycleApi>, config: SyncClientConfig) -> Self {
        let cache = FeedCache::new(config.feed_order);
        Self {
            shared: Arc::new(Shared {
                api,
                config,
                cache: Mutex::new(cache),
                subscribers: Arc::new(Subscribers::default()),
            }),
            running: Mutex::new(None),
        }
    }

    /// Starts polling. Does nothing if the loop is already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) {
        let mut running = self.running.lock().unwrap_or_else(PoisonError::into_inner);
        if running.as_ref().is_some_and(|r| !r.handle.is_finished()) {
            debug!("Sync client already running");
            return;
        }

        let (shutdown, signal) = watch::channel(false);
        let shared = self.shared.clone();
        let handle = tokio::spawn(async move { shared.run(signal).await });
        *running = Some(Running { shutdown, handle });
        info!("Sync client started");
    }

    /// Stops polling and discards the local feed. Idempotent.
    pub fn stop(&self) {
        let stopped = self
            .running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(running) = stopped {
            let _ = running.shutdown.send(true);
            self.shared.lock_cache().clear();
            info!("Sync client stopped");
        }
    }

    /// True while the poll loop is alive.
    pub fn is_running(&self) -> bool {
        self.running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|r| !r.handle.is_finished())
    }

    /// Registers a callback for feed updates.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&FeedUpdate) + Send + Sync + 'static,
    {
        self.shared.subscribers.add(Arc::new(callback))
    }

    /// Resets the engine, empties the local feed, and tells subscribers.
    pub async fn reset_cycle(&self) -> Result<(), ApiError> {
        self.shared.api.reset().await?;
        self.shared.lock_cache().clear();
        self.shared.subscribers.notify(&FeedUpdate::reset());
        info!("Cycle reset");
        Ok(())
    }

    /// The feed as currently cached.
    pub fn snapshot(&self) -> Vec<Article> {
        self.shared.lock_cache().ordered()
    }
}

impl Drop for SyncClient {
    fn drop(&mut self) {
        if let Some(running) = self
            .running
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            let _ = running.shutdown.send(true);
        }
    }
}

impl Shared {
    fn lock_cache(&self) -> std::sync::MutexGuard<'_, FeedCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        self.load_snapshot(&shutdown).await;

        let mut retries: u32 = 0;
        loop {
            if *shutdown.borrow() {
                break;
            }

            let outcome = self.api.advance().await;
            if *shutdown.borrow() {
                debug!("Discarding poll result after stop");
                break;
            }

            let delay = match outcome {
                Ok(payload) if !payload.is_empty() => {
                    retries = 0;
                    self.publish(payload, true);
                    self.config.poll_interval
                }
                Ok(_) => {
                    retries += 1;
                    warn!(retries, "Engine returned no articles");
                    self.config.backoff.delay(retries)
                }
                Err(e) => {
                    retries += 1;
                    warn!(retries, error = %e, "Poll failed");
                    self.config.backoff.delay(retries)
                }
            };

            if retries > self.config.max_retries {
                error!(retries, "Giving up after repeated poll failures");
                break;
            }

            tokio::select! {
                _ = shutdown.changed() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }
        debug!("Poll loop exited");
    }

    /// Seeds the feed from the engine's cycle snapshot without advancing.
    async fn load_snapshot(&self, shutdown: &watch::Receiver<bool>) {
        match self.api.cycle_articles().await {
            Ok(payload) if *shutdown.borrow() => drop(payload),
            Ok(payload) => self.publish(payload, false),
            Err(e) => warn!(error = %e, "Could not load cycle snapshot"),
        }
    }

    /// Merges `payload` into the cache and notifies subscribers.
    ///
    /// `advanced` marks a payload produced by an advance, which carries the
    /// new-cycle flag and is acknowledged back to the engine.
    fn publish(&self, payload: CyclePayload, advanced: bool) {
        let CyclePayload {
            article,
            mut articles,
            metadata,
        } = payload;

        let ack_index = metadata
            .as_ref()
            .and_then(|m| usize::try_from(m.current_index).ok())
            .or_else(|| article.as_ref().and_then(|a| a.cycle_index));
        let current_id = article.as_ref().map(|a| a.id.clone());
        articles.extend(article);

        let update = {
            let mut cache = self.lock_cache();
            let cycle = metadata
                .as_ref()
                .map(|m| m.cycle_count)
                .or_else(|| cache.cycle())
                .unwrap_or(0);
            let outcome = cache.merge(articles, cycle);
            if let Some(id) = current_id.clone() {
                cache.set_current(id);
            }
            if outcome.restarted {
                info!(cycle_count = cycle, "Feed restarted for new cycle");
            }

            let feed = cache.ordered();
            FeedUpdate {
                metadata: FeedMetadata {
                    cycle_count: cycle,
                    is_new_cycle: advanced
                        && metadata.as_ref().is_some_and(|m| m.is_new_cycle),
                    is_reset: false,
                    total_articles: metadata
                        .as_ref()
                        .map_or(feed.len(), |m| m.total_articles),
                    current_article: cache.current().cloned(),
                },
                articles: feed,
            }
        };
        debug!(
            articles = update.articles.len(),
            current = ?update.metadata.current_article,
            "Feed updated"
        );
        self.subscribers.notify(&update);

        if advanced && current_id.is_some() {
            if let Some(index) = ack_index {
                let api = self.api.clone();
                tokio::spawn(async move {
                    if let Err(e) = api.acknowledge(index).await {
                        warn!(index, error = %e, "Acknowledgment failed");
                    }
                });
            }
        }
    }
}
