//! Step timing
//!
//! Playback loops suspend between steps through a `Ticker`. The session is
//! passed along so a ticker can observe it, but a wait that has begun always
//! runs its full interval: cancellation takes effect at the next step
//! boundary, never mid-wait.

use crate::playback::session::StopHandle;
use std::thread;
use std::time::Duration;

/// Suspension point between two pattern steps
pub trait Ticker: Send + Sync {
    fn wait(&self, interval: Duration, session: &StopHandle);
}

/// Ticker that sleeps the calling thread for the full interval
#[derive(Clone, Copy, Debug, Default)]
pub struct SleepTicker;

impl Ticker for SleepTicker {
    fn wait(&self, interval: Duration, _session: &StopHandle) {
        thread::sleep(interval);
    }
}

/// Ticker that returns immediately, for headless runs where only the order
/// of presentation calls matters
#[derive(Clone, Copy, Debug, Default)]
pub struct InstantTicker;

impl Ticker for InstantTicker {
    fn wait(&self, _interval: Duration, _session: &StopHandle) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_sleep_ticker_waits_full_interval_even_when_stopped() {
        let session = StopHandle::new();
        session.stop();

        let start = Instant::now();
        SleepTicker.wait(Duration::from_millis(40), &session);
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_millis(40));
    }

    #[test]
    fn test_instant_ticker_returns_immediately() {
        let start = Instant::now();
        InstantTicker.wait(Duration::from_secs(5), &StopHandle::new());
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
