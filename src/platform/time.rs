//! Fixed-period tick scheduling
//!
//! The host polls [`TickTimer::poll`] from its event loop. A tick fires at
//! most once per poll; if the host stalls, missed ticks are dropped and the
//! next deadline is re-anchored one period after the poll that fired.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct TickTimer {
    period: Duration,
    /// Next deadline; `None` while stopped
    next_due: Option<Instant>,
}

impl TickTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Schedule the first tick one period from `now`
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    /// Stop scheduling ticks
    pub fn pause(&mut self) {
        self.next_due = None;
    }

    /// Restart scheduling; no catch-up for time spent paused
    pub fn resume(&mut self, now: Instant) {
        self.start(now);
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true if a tick is due at `now`
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.period);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick (zero if overdue, `None` if stopped)
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(600);

    #[test]
    fn test_fires_once_per_period() {
        let t0 = Instant::now();
        let mut timer = TickTimer::new(PERIOD);
        timer.start(t0);

        assert!(!timer.poll(t0));
        assert!(!timer.poll(t0 + Duration::from_millis(599)));
        assert!(timer.poll(t0 + PERIOD));
        assert!(!timer.poll(t0 + PERIOD));
        assert!(timer.poll(t0 + PERIOD * 2));
    }

    #[test]
    fn test_no_catch_up_after_stall() {
        let t0 = Instant::now();
        let mut timer = TickTimer::new(PERIOD);
        timer.start(t0);

        // Host stalled for five periods: one tick, not five
        let late = t0 + PERIOD * 5;
        assert!(timer.poll(late));
        assert!(!timer.poll(late));
        assert!(!timer.poll(late + Duration::from_millis(599)));
        assert!(timer.poll(late + PERIOD));
    }

    #[test]
    fn test_pause_and_resume() {
        let t0 = Instant::now();
        let mut timer = TickTimer::new(PERIOD);
        timer.start(t0);
        timer.pause();
        assert!(!timer.is_running());
        assert!(!timer.poll(t0 + PERIOD * 10));
        assert_eq!(timer.time_until_due(t0), None);

        let resumed = t0 + PERIOD * 10;
        timer.resume(resumed);
        assert!(timer.is_running());
        assert!(!timer.poll(resumed));
        assert_eq!(timer.time_until_due(resumed), Some(PERIOD));
        assert!(timer.poll(resumed + PERIOD));
    }
}
