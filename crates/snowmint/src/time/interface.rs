use core::time::Duration;
use std::{rc::Rc, sync::Arc};

/// Custom epoch: Wednesday, January 1, 2025 00:00:00 UTC
pub const CUSTOM_EPOCH: Duration = Duration::from_millis(1_735_689_600_000);

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH: Duration = Duration::from_millis(1_288_834_974_657);

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
pub const DISCORD_EPOCH: Duration = Duration::from_millis(1_420_070_400_000);

/// Instagram epoch: Saturday, January 1, 2011 00:00:00 UTC
pub const INSTAGRAM_EPOCH: Duration = Duration::from_millis(1_293_840_000_000);

/// Standard UNIX epoch: Thursday, January 1, 1970 00:00:00 UTC
pub const UNIX_EPOCH: Duration = Duration::from_millis(0);

/// A source of wall-clock time in milliseconds since the UNIX epoch.
///
/// Generators subtract their configured epoch from this value themselves, so
/// implementations always report absolute time. Swapping the source lets tests
/// drive the generator through same-millisecond bursts and clock regressions
/// without sleeping.
///
/// # Example
///
/// ```
/// use snowmint::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// assert_eq!(FixedTime.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since 1970-01-01 UTC.
    fn current_millis(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Rc<T> {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

/// Converts an epoch [`Duration`] into whole milliseconds, saturating at
/// `u64::MAX`.
pub(crate) fn duration_millis(epoch: Duration) -> u64 {
    u64::try_from(epoch.as_millis()).unwrap_or(u64::MAX)
}
