use crate::BitAllocation;
use core::time::Duration;

/// Construction parameters for a [`SnowflakeGenerator`].
///
/// Nothing is validated here; [`SnowflakeGenerator::new`] checks the epoch,
/// the bit allocation and the worker/process ranges, in that order.
///
/// ```
/// use snowmint::{BitAllocation, GeneratorConfig, TWITTER_EPOCH};
///
/// let config = GeneratorConfig::new(TWITTER_EPOCH, 7)
///     .with_process_id(2)
///     .with_bits(BitAllocation::new(5, 5, 12));
/// assert_eq!(config.worker_id, 7);
/// ```
///
/// [`SnowflakeGenerator`]: crate::SnowflakeGenerator
/// [`SnowflakeGenerator::new`]: crate::SnowflakeGenerator::new
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeneratorConfig {
    /// Origin of the timestamp field, as a [`Duration`] since 1970-01-01 UTC.
    /// Must not be in the future.
    pub epoch: Duration,
    /// Must fit in `bits.worker_bits`.
    pub worker_id: u64,
    /// Must fit in `bits.process_bits`. Defaults to 0.
    pub process_id: u64,
    /// Defaults to [`BitAllocation::TWITTER`].
    pub bits: BitAllocation,
}

impl GeneratorConfig {
    pub const fn new(epoch: Duration, worker_id: u64) -> Self {
        Self {
            epoch,
            worker_id,
            process_id: 0,
            bits: BitAllocation::TWITTER,
        }
    }

    #[must_use]
    pub const fn with_process_id(mut self, process_id: u64) -> Self {
        self.process_id = process_id;
        self
    }

    #[must_use]
    pub const fn with_bits(mut self, bits: BitAllocation) -> Self {
        self.bits = bits;
        self
    }
}
