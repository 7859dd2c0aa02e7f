//! Debounce decision logic.
//!
//! A small utility for rate-limiting repeated triggers (e.g. form
//! submissions). Holds only the decision logic; callers supply the clock,
//! which keeps this testable without sleeping. Currently no fetch path uses
//! it.

use std::time::{Duration, Instant};

/// Tracks whether enough quiet time has passed since the last accepted
/// trigger.
#[derive(Debug, Clone)]
pub struct Debouncer {
    interval: Duration,
    last_accepted: Option<Instant>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet interval.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_accepted: None,
        }
    }

    /// Whether a trigger at `now` should fire. Accepting a trigger records
    /// it; rejected triggers do not extend the quiet window.
    pub fn should_fire(&mut self, now: Instant) -> bool {
        match self.last_accepted {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last_accepted = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_trigger_always_fires() {
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        assert!(debouncer.should_fire(Instant::now()));
    }

    #[test]
    fn triggers_inside_the_window_are_rejected() {
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        let start = Instant::now();
        assert!(debouncer.should_fire(start));
        assert!(!debouncer.should_fire(start + Duration::from_millis(50)));
        assert!(!debouncer.should_fire(start + Duration::from_millis(99)));
        assert!(debouncer.should_fire(start + Duration::from_millis(100)));
    }

    #[test]
    fn rejected_triggers_do_not_extend_the_window() {
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        let start = Instant::now();
        assert!(debouncer.should_fire(start));
        // A rejected trigger at t+90 must not push the next accept past t+100.
        assert!(!debouncer.should_fire(start + Duration::from_millis(90)));
        assert!(debouncer.should_fire(start + Duration::from_millis(101)));
    }
}
