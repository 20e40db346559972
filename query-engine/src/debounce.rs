//! Cancellable delayed dispatch.
//!
//! Each `schedule` call supersedes the previous pending timer entirely;
//! only the timer that survives until expiry runs its action.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `action` to run after `delay`, cancelling any pending
    /// timer. Once a timer expires its action is handed off to its own
    /// task, so cancellation can only stop timers that have not fired;
    /// outcomes of already-fired actions are superseded downstream by the
    /// generation check, never aborted mid-flight.
    pub fn schedule<F>(&mut self, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(action);
        }));
    }

    /// Drops the pending timer, if any, without running it.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
