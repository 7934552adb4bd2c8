//! Cancellation tokens for request epochs
//!
//! One token is live at a time. Starting an epoch or superseding the current
//! one cancels the previous token, which drops every in-flight future
//! selected against it. Epoch ids only move forward: a start for an id older
//! than the newest one seen gets a token that is already cancelled.

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
struct ActiveEpoch {
    id: u64,
    token: CancellationToken,
}

#[derive(Debug, Default)]
struct Epochs {
    live: Option<ActiveEpoch>,
    newest: u64,
}

/// Tracks the single live epoch and its cancellation token
#[derive(Debug, Default)]
pub struct EpochTracker {
    current: Mutex<Epochs>,
}

impl EpochTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `id` the live epoch, cancelling the previous one
    ///
    /// A stale `id` leaves the live epoch alone and gets a cancelled token.
    pub fn start(&self, id: u64) -> CancellationToken {
        let token = CancellationToken::new();
        let mut epochs = self.current.lock();
        if id < epochs.newest {
            tracing::debug!(epoch = id, newest = epochs.newest, "stale epoch start ignored");
            token.cancel();
            return token;
        }

        epochs.newest = id;
        let previous = epochs.live.replace(ActiveEpoch {
            id,
            token: token.clone(),
        });
        drop(epochs);

        if let Some(previous) = previous.filter(|previous| previous.id != id) {
            tracing::debug!(epoch = previous.id, next = id, "cancelling superseded epoch");
            previous.token.cancel();
        }
        token
    }

    /// Cancel the live epoch, if any, and return its id
    pub fn supersede(&self) -> Option<u64> {
        let previous = self.current.lock().live.take()?;
        previous.token.cancel();
        Some(previous.id)
    }

    /// Forget `id` once its pipeline has returned
    pub fn finish(&self, id: u64) {
        let mut epochs = self.current.lock();
        if epochs.live.as_ref().is_some_and(|epoch| epoch.id == id) {
            epochs.live = None;
        }
    }

    #[must_use]
    pub fn active(&self) -> Option<u64> {
        self.current.lock().live.as_ref().map(|epoch| epoch.id)
    }
}
