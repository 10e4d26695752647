use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Quiet period the search box waits for after the last keystroke.
pub const SEARCH_QUIESCENCE: Duration = Duration::from_millis(500);

/// Runs a callback once input has been quiet for a fixed delay.
///
/// Each [`Debouncer::call`] aborts the pending callback and schedules the new
/// one, so only the most recently scheduled callback ever runs. Must be used
/// from inside a tokio runtime.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn for_search() -> Self {
        Self::new(SEARCH_QUIESCENCE)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn call<F>(&self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let delay = self.delay;
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        }));
    }

    /// Drops the pending callback, if any. Returns whether one was waiting.
    pub fn cancel(&self) -> bool {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        match pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        let pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}
