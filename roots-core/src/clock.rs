//! Wall-clock source for the root spawn cooldown.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Monotonic time since some fixed starting point.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Real time, measured from construction.
#[derive(Debug)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// A clock that only moves when told to. Used by tests and headless runs.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_only_moves_on_advance() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);

        clock.advance(Duration::from_millis(1500));
        clock.advance(Duration::from_millis(600));
        assert_eq!(clock.now(), Duration::from_millis(2100));
    }

    #[test]
    fn monotonic_clock_never_goes_backwards() {
        let clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn clock_is_usable_through_a_reference() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_secs(3));
        let by_ref: &ManualClock = &clock;
        assert_eq!(Clock::now(&by_ref), Duration::from_secs(3));
    }
}
