//! Query controller
//!
//! Turns raw keystrokes into a debounced, cancellable, two-phase fetch:
//!
//! ```text
//! set_query ─▶ Debouncing ─(quiet period)─▶ Searching ─┬─▶ QuotaRejected
//!     ▲            │                                     └─▶ FetchingDetails ─▶ Settled
//!     └────────────┘ (re-arm)
//! ```
//!
//! Any keystroke or clear supersedes the running epoch: its token is
//! cancelled and the generation counter moves on, so nothing it later
//! produces can be committed. A superseded epoch has no visible phase of its
//! own; the state simply reflects the epoch that replaced it.
//!
//! # Architecture
//!
//! - `state` - `SearchState` and the epoch-checked `StateStore`
//! - `epoch` - live cancellation token tracking
//! - `debounce` - quiet-period worker
//! - `pipeline` - search then detail fan-out for one epoch
//! - `stats` - lock-free counters

mod debounce;
mod epoch;
mod pipeline;
mod state;
mod stats;


pub use debounce::{DebounceHandle, Debouncer};
pub use epoch::EpochTracker;
pub use state::{Notification, Phase, SearchState, StateStore};
pub use stats::{ControllerStats, ControllerStatsSnapshot};

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::RecipeSource;
use crate::config::ClientConfig;
use crate::error::{LookupError, LookupResult};
use pipeline::EpochContext;

struct ControllerInner<S> {
    source: S,
    config: ClientConfig,
    store: StateStore,
    epochs: Arc<EpochTracker>,
    stats: Arc<ControllerStats>,
}

impl<S: RecipeSource> ControllerInner<S> {
    /// Debounce settlement for the generation the timer was armed with
    async fn settle(self: Arc<Self>, armed: u64) {
        let Some((epoch, query)) = self.store.begin_search(armed) else {
            debug!(armed, "settle skipped: query empty or superseded");
            return;
        };

        let token = self.epochs.start(epoch);
        if token.is_cancelled() {
            ControllerStats::record(&self.stats.epochs_cancelled, 1);
            debug!(epoch, "settle lost the race to a newer epoch");
            return;
        }
        let ctx = EpochContext {
            source: &self.source,
            store: &self.store,
            stats: &self.stats,
            token: &token,
            epoch,
            limit: self.config.result_limit(),
        };

        let outcome = pipeline::run_epoch(&ctx, &query).await;
        self.finish(epoch, outcome);
        self.epochs.finish(epoch);
    }

    fn finish(&self, epoch: u64, outcome: LookupResult<usize>) {
        let err = match outcome {
            Ok(_) => return,
            Err(err) => err,
        };

        if let LookupError::Cancelled = err {
            ControllerStats::record(&self.stats.epochs_cancelled, 1);
            debug!(epoch, "epoch superseded; late results discarded");
            return;
        }

        if let Some(message) = err.notification_message() {
            ControllerStats::record(&self.stats.quota_rejections, 1);
            warn!(epoch, error = %err, "primary search rejected");

            let ttl = self.config.notification_ttl();
            if let Some(id) = self.store.notify(epoch, message, ttl) {
                let store = self.store.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(ttl).await;
                    store.dismiss_notification(id);
                });
            }
            self.store
                .commit(epoch, |state| state.phase = Phase::QuotaRejected);
            return;
        }

        ControllerStats::record(&self.stats.failures_swallowed, 1);
        warn!(epoch, error = %err, "recipe lookup failed; keeping previous results");
        self.store.commit(epoch, |state| state.phase = Phase::Settled);
    }
}

/// Cheap handle used by the presenter to read state and reset the cycle
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    store: StateStore,
    epochs: Arc<EpochTracker>,
    debounce: DebounceHandle,
}

impl ControllerHandle {
    #[must_use]
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Reset query, results, links and highlight
    ///
    /// Drops the pending debounce and cancels the live epoch so the next
    /// keystroke starts a clean cycle.
    pub fn clear(&self) {
        self.debounce.disarm();
        self.store.clear();
        if let Some(epoch) = self.epochs.supersede() {
            debug!(epoch, "clear cancelled in-flight epoch");
        }
    }
}

/// Debounced, cancellable search pipeline over a `RecipeSource`
///
/// Must be created inside a tokio runtime; the debounce worker and every
/// epoch run as spawned tasks.
pub struct QueryController<S: RecipeSource> {
    inner: Arc<ControllerInner<S>>,
    debouncer: Debouncer,
}

impl<S: RecipeSource> QueryController<S> {
    pub fn new(source: S, config: ClientConfig) -> Self {
        let window = config.debounce();
        let inner = Arc::new(ControllerInner {
            source,
            config,
            store: StateStore::new(),
            epochs: Arc::new(EpochTracker::new()),
            stats: Arc::new(ControllerStats::new()),
        });

        let weak = Arc::downgrade(&inner);
        let debouncer = Debouncer::spawn(window, move |armed| {
            if let Some(inner) = weak.upgrade() {
                tokio::spawn(inner.settle(armed));
            }
        });

        Self { inner, debouncer }
    }

    /// Replace the query and re-arm the debounce timer
    ///
    /// No validation is performed; an empty query settles into a no-op.
    pub fn set_query(&self, text: impl Into<String>) {
        let generation = self.inner.store.set_query(text.into());
        if let Some(epoch) = self.inner.epochs.supersede() {
            debug!(epoch, generation, "keystroke cancelled in-flight epoch");
        }
        self.debouncer.handle().arm(generation);
    }

    /// Settle immediately instead of waiting out the quiet period
    ///
    /// Runs the full pipeline for the current query on the caller's task.
    pub async fn settle_now(&self) {
        self.debouncer.handle().disarm();
        let armed = self.inner.store.snapshot().epoch();
        Arc::clone(&self.inner).settle(armed).await;
    }

    /// Same as `ControllerHandle::clear`
    pub fn clear(&self) {
        self.handle().clear();
    }

    #[must_use]
    pub fn handle(&self) -> ControllerHandle {
        ControllerHandle {
            store: self.inner.store.clone(),
            epochs: Arc::clone(&self.inner.epochs),
            debounce: self.debouncer.handle(),
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.inner.store.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> SearchState {
        self.inner.store.snapshot()
    }

    #[must_use]
    pub fn stats(&self) -> ControllerStatsSnapshot {
        self.inner.stats.snapshot()
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Stop the debounce worker and cancel the live epoch
    pub fn shutdown(&self) {
        self.debouncer.handle().shutdown();
        self.inner.epochs.supersede();
    }
}

impl<S: RecipeSource> Drop for QueryController<S> {
    fn drop(&mut self) {
        self.inner.epochs.supersede();
    }
}
