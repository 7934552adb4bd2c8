//! Keystroke debouncing
//!
//! A background worker holds at most one pending deadline. Every `arm`
//! re-arms it; when the quiet period elapses the settle callback fires once
//! with the generation the timer was last armed with.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

#[derive(Debug)]
enum DebounceCommand {
    Arm(u64),
    Disarm,
    Shutdown,
}

/// Cloneable sender side of the debouncer
#[derive(Debug, Clone)]
pub struct DebounceHandle {
    tx: mpsc::UnboundedSender<DebounceCommand>,
}

impl DebounceHandle {
    /// Restart the quiet period for `generation`
    pub fn arm(&self, generation: u64) {
        self.send(DebounceCommand::Arm(generation));
    }

    /// Drop the pending deadline without firing
    pub fn disarm(&self) {
        self.send(DebounceCommand::Disarm);
    }

    /// Stop the worker
    pub fn shutdown(&self) {
        self.send(DebounceCommand::Shutdown);
    }

    fn send(&self, command: DebounceCommand) {
        if self.tx.send(command).is_err() {
            tracing::debug!("debounce worker already stopped");
        }
    }
}

/// Owner of the debounce worker task
pub struct Debouncer {
    handle: DebounceHandle,
    worker: JoinHandle<()>,
}

impl Debouncer {
    /// Spawn the worker; `on_settle` runs on the worker task
    pub fn spawn<F>(window: Duration, on_settle: F) -> Self
    where
        F: Fn(u64) + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(Self::worker_loop(window, rx, on_settle));
        Self {
            handle: DebounceHandle { tx },
            worker,
        }
    }

    #[must_use]
    pub fn handle(&self) -> DebounceHandle {
        self.handle.clone()
    }

    async fn worker_loop<F>(
        window: Duration,
        mut rx: mpsc::UnboundedReceiver<DebounceCommand>,
        on_settle: F,
    ) where
        F: Fn(u64) + Send + 'static,
    {
        let mut pending: Option<(u64, Instant)> = None;

        loop {
            let deadline = pending.map(|(_, at)| at);
            tokio::select! {
                command = rx.recv() => match command {
                    Some(DebounceCommand::Arm(generation)) => {
                        pending = Some((generation, Instant::now() + window));
                    }
                    Some(DebounceCommand::Disarm) => pending = None,
                    Some(DebounceCommand::Shutdown) | None => break,
                },
                () = wait_for(deadline) => {
                    if let Some((generation, _)) = pending.take() {
                        tracing::debug!(generation, "debounce settled");
                        on_settle(generation);
                    }
                }
            }
        }

        tracing::debug!("debounce worker stopped");
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
