use crate::time::{TimeSource, duration_millis};
use std::time::SystemTime;

/// The system wall clock.
///
/// Every read is a fresh `SystemTime::now()`, so NTP steps and manual
/// adjustments are visible to the generator. A step backwards surfaces as
/// [`Error::ClockBackwards`](crate::Error::ClockBackwards).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        // A clock set before 1970 reads as 0, which any epoch check rejects.
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_or(0, duration_millis)
    }
}
