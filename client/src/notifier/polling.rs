use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use super::{ChangeHandler, Notifier};

/// Fixed-period re-fetch trigger without backoff. Runs until dropped.
#[derive(Debug, Clone)]
pub struct PollingNotifier {
    period: Duration,
}

impl PollingNotifier {
    /// # Panics
    /// Panics if `period` is zero.
    pub fn new(period: Duration) -> Self {
        assert!(!period.is_zero(), "polling period must be non-zero");
        Self { period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Notifier for PollingNotifier {
    async fn run<H: ChangeHandler>(&self, handler: &H) {
        // First tick fires one full period after start; the caller does the
        // initial fetch itself.
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        // A slow fetch pushes the next tick back instead of bunching them.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!("Polling every {:?}", self.period);
        loop {
            ticker.tick().await;
            handler.on_tick().await;
        }
    }
}
