//! Polling orchestrator for linkshelf.
//!
//! Runs one task immediately and then on a fixed interval. Starting again
//! cancels the previous timer first, so at most one timer is ever active.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

type PollFuture = Pin<Box<dyn Future<Output = ()> + Send>>;
type PollTask = Arc<dyn Fn() -> PollFuture + Send + Sync>;

struct ActiveTimer {
    token: CancellationToken,
    handle: JoinHandle<()>,
    interval: Duration,
}

/// Single cancellable polling timer.
///
/// Must be started from within a tokio runtime.
pub struct Poller {
    task: PollTask,
    active: Option<ActiveTimer>,
}

impl Poller {
    /// Creates a stopped poller that will run `task` on every tick.
    pub fn new<F, Fut>(task: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let task: PollTask = Arc::new(move || Box::pin(task()) as PollFuture);
        Self { task, active: None }
    }

    /// Starts polling: one run now, then one every `interval`.
    ///
    /// Any previous timer is cancelled before the new one is scheduled.
    pub fn start(&mut self, interval: Duration) {
        self.stop();

        let interval = interval.max(Duration::from_millis(1));
        let token = CancellationToken::new();
        let child = token.clone();
        let task = self.task.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = child.cancelled() => break,
                    _ = ticker.tick() => {
                        tracing::debug!("poll cycle");
                        tokio::select! {
                            _ = child.cancelled() => break,
                            _ = task() => {}
                        }
                    }
                }
            }
            tracing::debug!("polling loop exited");
        });

        tracing::info!(interval_ms = interval.as_millis() as u64, "polling started");
        self.active = Some(ActiveTimer {
            token,
            handle,
            interval,
        });
    }

    /// Cancels the active timer, if any.
    pub fn stop(&mut self) {
        if let Some(active) = self.active.take() {
            active.token.cancel();
            tracing::info!("polling stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| !a.token.is_cancelled() && !a.handle.is_finished())
    }

    /// Interval of the active timer.
    pub fn interval(&self) -> Option<Duration> {
        self.active.as_ref().map(|a| a.interval)
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            active.token.cancel();
        }
    }
}
