/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `snowmint` can emit.
///
/// Every failure is reported synchronously to the caller of the operation that
/// detected it. Nothing is retried internally.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Invalid construction parameters, or invalid arguments to
    /// [`compose`](crate::SnowflakeGenerator::compose).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The clock reported a time earlier than the last timestamp used to mint
    /// an ID. The generator state is left untouched; the caller decides
    /// whether to wait and retry.
    #[error(
        "clock moved backwards by {drift_ms}ms (last timestamp {last}ms, now {now}ms since epoch)"
    )]
    ClockBackwards {
        /// Last epoch-relative timestamp used by the generator.
        last: u64,
        /// Epoch-relative time reported by the clock. Saturates at zero when
        /// the clock reports a time before the epoch.
        now: u64,
        /// How far the clock moved backwards, in milliseconds.
        drift_ms: u64,
    },

    /// The 41-bit timestamp field is full. This is terminal: every later call
    /// on the same generator will fail the same way.
    #[error("timestamp {timestamp}ms since epoch exceeds the maximum of {max}ms")]
    TimestampExhausted {
        /// Epoch-relative timestamp that did not fit.
        timestamp: u64,
        /// Largest representable epoch-relative timestamp.
        max: u64,
    },

    /// Malformed input to [`decompose`](crate::SnowflakeGenerator::decompose)
    /// or to one of the [`SnowflakeId`](crate::SnowflakeId) parsers.
    #[error(transparent)]
    InvalidId(#[from] InvalidIdError),

    /// A thread panicked while holding the lock of a
    /// [`LockSnowflakeGenerator`](crate::LockSnowflakeGenerator).
    ///
    /// Never produced when the `parking-lot` feature is enabled, since its
    /// mutexes do not poison.
    #[error("generator lock poisoned")]
    LockPoisoned,
}

/// A violated configuration or argument constraint.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("epoch {epoch_ms}ms is in the future (current time is {now_ms}ms)")]
    EpochInFuture { epoch_ms: u64, now_ms: u64 },

    #[error("bit allocation is empty: at least one of worker, process or sequence bits must be > 0")]
    EmptyBitAllocation,

    #[error(
        "total bits ({total}) exceeds maximum of {max} (worker: {worker_bits}, process: {process_bits}, sequence: {sequence_bits})"
    )]
    BitBudgetExceeded {
        total: u32,
        max: u32,
        worker_bits: u8,
        process_bits: u8,
        sequence_bits: u8,
    },

    #[error("worker id {worker_id} is out of range [0, {max}]")]
    WorkerIdOutOfRange { worker_id: u64, max: u64 },

    #[error("process id {process_id} is out of range [0, {max}]")]
    ProcessIdOutOfRange { process_id: u64, max: u64 },

    #[error("sequence {sequence} is out of range [0, {max}]")]
    SequenceOutOfRange { sequence: u64, max: u64 },

    #[error("timestamp {timestamp}ms is before the epoch {epoch_ms}ms")]
    TimestampBeforeEpoch { timestamp: u64, epoch_ms: u64 },

    #[error("timestamp {timestamp}ms since epoch is out of range [0, {max}]")]
    TimestampOutOfRange { timestamp: u64, max: u64 },
}

/// Why a value could not be accepted as a Snowflake ID.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum InvalidIdError {
    #[error("invalid snowflake id {0}: must not be negative")]
    Negative(i64),

    #[error("invalid snowflake id {input:?}: expected an unsigned decimal integer")]
    Malformed { input: String },

    /// The top bit is reserved and always zero in a minted ID. A value with
    /// it set is negative when read as a signed 64-bit integer.
    #[error("invalid snowflake id {0}: reserved sign bit is set")]
    ReservedBitSet(u64),
}

#[cfg(not(feature = "parking-lot"))]
use std::sync::{MutexGuard, PoisonError};

// Convert all poisoned lock errors to a simplified `LockPoisoned`
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
