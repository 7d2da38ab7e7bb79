use crate::SnowflakeId;

/// The outcome of one non-blocking generation step.
///
/// - [`Poll::Ready`] carries a newly minted ID.
/// - [`Poll::Pending`] means the sequence is exhausted for the current
///   millisecond; the caller should wait `yield_for` milliseconds (or simply
///   spin) before polling again.
///
/// This lets callers choose their own wait strategy instead of the tight spin
/// used by [`SnowflakeGenerator::generate`].
///
/// # Example
///
/// ```
/// use snowmint::{GeneratorConfig, Poll, SnowflakeGenerator, TWITTER_EPOCH};
///
/// let mut generator = SnowflakeGenerator::new(GeneratorConfig::new(TWITTER_EPOCH, 1)).unwrap();
/// let id = loop {
///     match generator.try_poll_id().unwrap() {
///         Poll::Ready { id } => break id,
///         Poll::Pending { .. } => std::thread::yield_now(),
///     }
/// };
/// assert!(id.to_raw() > 0);
/// ```
///
/// [`SnowflakeGenerator::generate`]: crate::SnowflakeGenerator::generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// A unique ID was generated.
    Ready { id: SnowflakeId },
    /// No ID is available until the clock advances.
    Pending {
        /// Milliseconds to wait before polling again.
        yield_for: u64,
    },
}
