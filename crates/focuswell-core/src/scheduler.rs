//! One-second tick sources.
//!
//! A [`Ticker`] is armed while its engine runs and disarmed otherwise.
//! Disarming drops the underlying interval, so no tick can be observed
//! afterwards. Tickers are polled from a single task; they are never
//! shared across threads.

use std::future::pending;
use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::trace;

/// Tick period for both engines.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A cancellable repeating trigger.
#[derive(Debug)]
pub struct Ticker {
    name: &'static str,
    period: Duration,
    interval: Option<Interval>,
}

impl Ticker {
    pub fn new(name: &'static str) -> Self {
        Self::with_period(name, TICK_PERIOD)
    }

    pub fn with_period(name: &'static str, period: Duration) -> Self {
        Self {
            name,
            period,
            interval: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Start ticking one period from now. No-op when already armed.
    pub fn arm(&mut self) {
        if self.interval.is_some() {
            return;
        }
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        // A stalled loop must not replay a burst of seconds.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
        trace!(ticker = self.name, "armed");
    }

    /// Stop ticking. No-op when already disarmed.
    pub fn disarm(&mut self) {
        if self.interval.take().is_some() {
            trace!(ticker = self.name, "disarmed");
        }
    }

    /// Arm or disarm to match `running`.
    pub fn sync(&mut self, running: bool) {
        if running {
            self.arm();
        } else {
            self.disarm();
        }
    }

    /// Resolves on the next tick; never resolves while disarmed.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => pending::<()>().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, timeout};

    #[tokio::test(start_paused = true)]
    async fn armed_ticker_fires_each_period() {
        let mut ticker = Ticker::new("test");
        ticker.arm();
        let started = Instant::now();
        ticker.tick().await;
        ticker.tick().await;
        assert_eq!(started.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn disarmed_ticker_never_fires() {
        let mut ticker = Ticker::new("test");
        ticker.arm();
        ticker.disarm();
        ticker.disarm();
        assert!(!ticker.is_armed());
        let result = timeout(Duration::from_secs(10), ticker.tick()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn arm_is_idempotent() {
        let mut ticker = Ticker::new("test");
        ticker.arm();
        advance(Duration::from_millis(500)).await;
        ticker.arm();
        let started = Instant::now();
        ticker.tick().await;
        assert_eq!(started.elapsed(), Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn sync_follows_running_flag() {
        let mut ticker = Ticker::new("test");
        ticker.sync(true);
        assert!(ticker.is_armed());
        ticker.sync(false);
        assert!(!ticker.is_armed());
    }
}
