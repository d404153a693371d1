use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Restartable one-shot timer.
///
/// Each `restart` aborts the previous sleep, so `fire` runs at most once per
/// quiet period of `window`. Dropping the timer aborts a pending sleep.
#[derive(Debug, Default)]
pub struct DebounceTimer {
    pending: Option<JoinHandle<()>>,
}

impl DebounceTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restart<F>(&mut self, runtime: &Handle, window: Duration, fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.pending = Some(runtime.spawn(async move {
            tokio::time::sleep(window).await;
            fire();
        }));
    }

    /// Returns whether a sleep was still pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
