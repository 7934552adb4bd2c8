//! Search state container
//!
//! All visible state lives in one `SearchState` held by a `watch` channel.
//! Every transition goes through `StateStore`, and every pipeline commit is
//! checked against the epoch number inside the channel's lock, so a
//! superseded epoch can never write after the check passes.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

use crate::api::SearchResult;

/// Position of the latest epoch in the query state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing pending
    #[default]
    Idle,
    /// Waiting for the keystroke quiet period
    Debouncing,
    /// Primary search in flight
    Searching,
    /// Primary search rejected; notification shown
    QuotaRejected,
    /// Results committed, detail requests in flight
    FetchingDetails,
    /// Epoch finished (successfully or with a swallowed failure)
    Settled,
}

/// A transient, auto-dismissing user notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub expires_at: Instant,
}

impl Notification {
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Snapshot of everything the presenter renders
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub(crate) query: String,
    pub(crate) results: Vec<SearchResult>,
    /// Index-aligned with `results`, or empty until the detail phase commits
    pub(crate) links: Vec<Option<String>>,
    pub(crate) highlight: Option<usize>,
    pub(crate) phase: Phase,
    pub(crate) notification: Option<Notification>,
    pub(crate) epoch: u64,
}

impl SearchState {
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    #[must_use]
    pub fn links(&self) -> &[Option<String>] {
        &self.links
    }

    #[must_use]
    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Generation counter; bumped by every keystroke, clear and search start
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Link for the result at `index`, if resolved
    #[must_use]
    pub fn link(&self, index: usize) -> Option<&str> {
        self.links.get(index).and_then(|link| link.as_deref())
    }

    /// `(result, link)` pairs in API order
    pub fn entries(&self) -> impl Iterator<Item = (&SearchResult, Option<&str>)> {
        self.results
            .iter()
            .enumerate()
            .map(|(index, result)| (result, self.link(index)))
    }

    fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }
}

/// Shared handle over the search state channel
#[derive(Debug, Clone)]
pub struct StateStore {
    tx: Arc<watch::Sender<SearchState>>,
    next_notification_id: Arc<AtomicU64>,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(SearchState::default());
        Self {
            tx: Arc::new(tx),
            next_notification_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Receiver that observes every committed change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.tx.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> SearchState {
        self.tx.borrow().clone()
    }

    /// Replace the query and supersede whatever epoch was running
    ///
    /// Returns the new generation, which the debounce timer is armed with.
    pub fn set_query(&self, text: String) -> u64 {
        let mut generation = 0;
        self.tx.send_modify(|state| {
            state.query = text;
            state.epoch += 1;
            state.phase = if state.has_query() {
                Phase::Debouncing
            } else {
                Phase::Idle
            };
            generation = state.epoch;
        });
        generation
    }

    /// Start a search epoch for the generation the debounce timer was armed with
    ///
    /// Returns `None` if anything has happened since arming, or if the query
    /// is empty; state is left untouched in both cases.
    pub fn begin_search(&self, armed: u64) -> Option<(u64, String)> {
        let mut started = None;
        self.tx.send_if_modified(|state| {
            if state.epoch != armed || !state.has_query() {
                return false;
            }
            state.epoch += 1;
            state.phase = Phase::Searching;
            started = Some((state.epoch, state.query.clone()));
            true
        });
        started
    }

    /// Apply `update` only if `epoch` is still the current generation
    pub fn commit(&self, epoch: u64, update: impl FnOnce(&mut SearchState)) -> bool {
        self.tx.send_if_modified(|state| {
            if state.epoch != epoch {
                return false;
            }
            update(state);
            true
        })
    }

    /// Show a notification on behalf of `epoch`
    ///
    /// Returns the notification id, or `None` if the epoch was superseded.
    pub fn notify(&self, epoch: u64, message: String, ttl: Duration) -> Option<u64> {
        let id = self.next_notification_id.fetch_add(1, Ordering::Relaxed);
        let expires_at = Instant::now() + ttl;
        self.commit(epoch, |state| {
            state.notification = Some(Notification {
                id,
                message,
                expires_at,
            });
        })
        .then_some(id)
    }

    /// Remove the notification with `id` if it is still the one showing
    pub fn dismiss_notification(&self, id: u64) -> bool {
        self.tx.send_if_modified(|state| {
            if state.notification.as_ref().is_some_and(|n| n.id == id) {
                state.notification = None;
                true
            } else {
                false
            }
        })
    }

    /// Reset query, results, links and highlight; supersedes the current epoch
    pub fn clear(&self) -> u64 {
        let mut generation = 0;
        self.tx.send_modify(|state| {
            state.query.clear();
            state.results.clear();
            state.links.clear();
            state.highlight = None;
            state.phase = Phase::Idle;
            state.epoch += 1;
            generation = state.epoch;
        });
        generation
    }

    /// Set the highlighted row, clamped to the current result set
    ///
    /// Out-of-range indexes clear the highlight. Returns the applied value.
    pub fn set_highlight(&self, index: Option<usize>) -> Option<usize> {
        let mut applied = None;
        self.tx.send_if_modified(|state| {
            let next = index.filter(|&i| i < state.results.len());
            applied = next;
            if state.highlight == next {
                return false;
            }
            state.highlight = next;
            true
        });
        applied
    }
}
