use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Handle to the one repeating timer a player may own.
///
/// The first tick fires one full period after arming, so resuming never
/// pays off time that passed while paused. Dropping the handle cancels the
/// timer as well, but owners call [`TickSource::cancel`] explicitly.
pub(crate) struct TickSource {
    handle: JoinHandle<()>,
    generation: u64,
}

impl TickSource {
    /// Spawn a timer that calls `on_tick` every `period` until it returns
    /// `false` or the source is cancelled.
    pub(crate) fn arm<F>(period: Duration, generation: u64, mut on_tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if !on_tick() {
                    break;
                }
            }
        });
        Self { handle, generation }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn cancel(self) {
        self.handle.abort();
    }
}

impl Drop for TickSource {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
