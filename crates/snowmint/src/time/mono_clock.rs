use crate::time::{SystemClock, TimeSource, duration_millis};
use std::time::Instant;

/// A wall-clock aligned time source that never moves backwards.
///
/// The wall clock is sampled once at construction. Every later read adds the
/// time elapsed on a monotonic [`Instant`] to that anchor, so NTP or manual
/// clock adjustments made while the process runs are not observed. A generator
/// driven by this clock never reports
/// [`Error::ClockBackwards`](crate::Error::ClockBackwards), at the cost of
/// drifting from the wall clock over long uptimes.
///
/// # Example
///
/// ```
/// use snowmint::{MonotonicClock, TimeSource};
///
/// let clock = MonotonicClock::new();
/// let a = clock.current_millis();
/// let b = clock.current_millis();
/// assert!(b >= a);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    start: Instant,
    anchor_millis: u64,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Anchors a new clock to the current system time.
    pub fn new() -> Self {
        Self::with_anchor(SystemClock.current_millis())
    }

    /// Anchors a new clock to `anchor_millis` (milliseconds since the UNIX
    /// epoch). The first read returns roughly this value.
    pub fn with_anchor(anchor_millis: u64) -> Self {
        Self {
            start: Instant::now(),
            anchor_millis,
        }
    }
}

impl TimeSource for MonotonicClock {
    fn current_millis(&self) -> u64 {
        self.anchor_millis
            .saturating_add(duration_millis(self.start.elapsed()))
    }
}
