use core::cmp::Ordering;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    ConfigError, Error, GeneratorConfig, InvalidIdError, Layout, Poll, Result,
    SnowflakeComponents, SnowflakeId, SystemClock, TimeSource, time::duration_millis,
};

/// A single-owner Snowflake ID generator.
///
/// Holds a frozen [`Layout`], the configured worker and process IDs, and the
/// only mutable state in the crate: the last timestamp used and the current
/// sequence. Generation takes `&mut self`, so sharing one instance across
/// threads requires external serialization, for example
/// [`LockSnowflakeGenerator`]. Independent instances with distinct
/// `(worker_id, process_id)` pairs need no coordination at all.
///
/// ## See Also
/// - [`LockSnowflakeGenerator`]
///
/// [`LockSnowflakeGenerator`]: crate::LockSnowflakeGenerator
#[derive(Debug)]
pub struct SnowflakeGenerator<T = SystemClock>
where
    T: TimeSource,
{
    layout: Layout,
    epoch: u64,
    worker_id: u64,
    process_id: u64,
    last_timestamp: Option<u64>,
    sequence: u64,
    clock: T,
}

impl SnowflakeGenerator<SystemClock> {
    /// Creates a generator driven by the system wall clock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the epoch is in the future, the bit
    /// allocation is empty or exceeds 22 bits, or the worker/process ID does
    /// not fit its field.
    ///
    /// # Example
    /// ```
    /// use snowmint::{GeneratorConfig, SnowflakeGenerator, TWITTER_EPOCH};
    ///
    /// let mut generator = SnowflakeGenerator::new(GeneratorConfig::new(TWITTER_EPOCH, 1)).unwrap();
    /// let first = generator.generate().unwrap();
    /// let second = generator.generate().unwrap();
    /// assert!(second > first);
    /// ```
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<T> SnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator that reads time from `clock`.
    ///
    /// The clock is read once here to reject an epoch in the future.
    ///
    /// # Errors
    ///
    /// See [`SnowflakeGenerator::new`].
    pub fn with_clock(config: GeneratorConfig, clock: T) -> Result<Self> {
        let epoch = duration_millis(config.epoch);
        let now = clock.current_millis();
        if epoch > now {
            return Err(ConfigError::EpochInFuture {
                epoch_ms: epoch,
                now_ms: now,
            }
            .into());
        }

        let layout = Layout::new(config.bits)?;
        layout.check_worker_id(config.worker_id)?;
        layout.check_process_id(config.process_id)?;

        Ok(Self {
            layout,
            epoch,
            worker_id: config.worker_id,
            process_id: config.process_id,
            last_timestamp: None,
            sequence: 0,
            clock,
        })
    }

    /// Generates a new ID, spinning on the clock if the sequence for the
    /// current millisecond is exhausted.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockBackwards`] if the clock reports a time before the last
    ///   timestamp used. No state changes; a later call with a recovered clock
    ///   continues where this generator left off.
    /// - [`Error::TimestampExhausted`] once the epoch-relative time no longer
    ///   fits in 41 bits.
    pub fn generate(&mut self) -> Result<SnowflakeId> {
        self.generate_with(|_| core::hint::spin_loop())
    }

    /// Generates a new ID, calling `f` with the suggested wait (in
    /// milliseconds) each time the sequence is exhausted.
    ///
    /// ```
    /// use snowmint::{GeneratorConfig, SnowflakeGenerator, TWITTER_EPOCH};
    ///
    /// let mut generator = SnowflakeGenerator::new(GeneratorConfig::new(TWITTER_EPOCH, 1)).unwrap();
    /// let id = generator.generate_with(|_| std::thread::yield_now()).unwrap();
    /// # let _ = id;
    /// ```
    ///
    /// # Errors
    ///
    /// See [`Self::generate`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self, f)))]
    pub fn generate_with(&mut self, mut f: impl FnMut(u64)) -> Result<SnowflakeId> {
        loop {
            match self.try_poll_id()? {
                Poll::Ready { id } => break Ok(id),
                Poll::Pending { yield_for } => f(yield_for),
            }
        }
    }

    /// Attempts one generation step without waiting.
    ///
    /// # Returns
    /// - `Ok(Poll::Ready { id })`: a new ID is available
    /// - `Ok(Poll::Pending { yield_for })`: the sequence is exhausted for this
    ///   millisecond; poll again once the clock has advanced
    ///
    /// # Errors
    ///
    /// See [`Self::generate`].
    pub fn try_poll_id(&mut self) -> Result<Poll> {
        let now = self.clock.current_millis();
        let Some(ts) = now.checked_sub(self.epoch) else {
            return Err(self.cold_clock_behind(now));
        };

        let Some(last) = self.last_timestamp else {
            return self.rollover_to_timestamp(ts);
        };

        match ts.cmp(&last) {
            Ordering::Equal => {
                if self.sequence < self.layout.max_sequence() {
                    self.sequence += 1;
                    self.ready(ts)
                } else {
                    Ok(Poll::Pending { yield_for: 1 })
                }
            }
            Ordering::Greater => self.rollover_to_timestamp(ts),
            Ordering::Less => Err(self.cold_clock_behind(now)),
        }
    }

    /// Packs explicit components into an ID without touching generator
    /// state. `timestamp` is absolute, in milliseconds since the UNIX epoch.
    ///
    /// ```
    /// use snowmint::{GeneratorConfig, SnowflakeGenerator, TWITTER_EPOCH};
    ///
    /// let generator = SnowflakeGenerator::new(GeneratorConfig::new(TWITTER_EPOCH, 1)).unwrap();
    /// let ts = TWITTER_EPOCH.as_millis() as u64 + 1_000;
    /// let id = generator.compose(ts, 5, 0, 3).unwrap();
    /// assert_eq!(id.to_raw(), (1_000 << 22) | (5 << 12) | 3);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first offending argument: a
    /// timestamp before the epoch, a worker ID, process ID or sequence outside
    /// its field, or a timestamp more than 2^41 - 1 ms after the epoch.
    pub fn compose(
        &self,
        timestamp: u64,
        worker_id: u64,
        process_id: u64,
        sequence: u64,
    ) -> Result<SnowflakeId> {
        let Some(relative) = timestamp.checked_sub(self.epoch) else {
            return Err(ConfigError::TimestampBeforeEpoch {
                timestamp,
                epoch_ms: self.epoch,
            }
            .into());
        };
        self.layout.check_worker_id(worker_id)?;
        self.layout.check_process_id(process_id)?;
        self.layout.check_sequence(sequence)?;
        self.layout.check_timestamp(relative)?;

        Ok(SnowflakeId::from_raw(self.layout.pack(
            relative, worker_id, process_id, sequence,
        )))
    }

    /// Splits an ID back into its components. Exactly inverts
    /// [`Self::compose`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidId`] if the reserved sign bit is set, which no
    /// generator ever produces.
    pub fn decompose(&self, id: SnowflakeId) -> Result<SnowflakeComponents> {
        if id.has_reserved_bit() {
            return Err(InvalidIdError::ReservedBitSet(id.to_raw()).into());
        }
        let (timestamp, worker_id, process_id, sequence) = self.layout.unpack(id.to_raw());
        Ok(SnowflakeComponents {
            timestamp: timestamp + self.epoch,
            worker_id,
            process_id,
            sequence,
        })
    }

    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The configured epoch, in milliseconds since the UNIX epoch.
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    pub const fn worker_id(&self) -> u64 {
        self.worker_id
    }

    pub const fn process_id(&self) -> u64 {
        self.process_id
    }

    /// The epoch-relative timestamp of the last generation step, or `None`
    /// before the first one.
    pub const fn last_timestamp(&self) -> Option<u64> {
        self.last_timestamp
    }

    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    pub const fn clock(&self) -> &T {
        &self.clock
    }

    fn rollover_to_timestamp(&mut self, ts: u64) -> Result<Poll> {
        self.last_timestamp = Some(ts);
        self.sequence = 0;
        self.ready(ts)
    }

    /// Packs the current state. State has already moved to `ts`, so an
    /// exhausted timestamp stays exhausted on every later call.
    fn ready(&self, ts: u64) -> Result<Poll> {
        if ts > Layout::MAX_TIMESTAMP {
            return Err(self.cold_timestamp_exhausted(ts));
        }
        let raw = self
            .layout
            .pack(ts, self.worker_id, self.process_id, self.sequence);
        Ok(Poll::Ready {
            id: SnowflakeId::from_raw(raw),
        })
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(&self, now: u64) -> Error {
        let last = self.last_timestamp.unwrap_or(0);
        let drift_ms = (self.epoch + last).saturating_sub(now);
        #[cfg(feature = "tracing")]
        tracing::warn!(drift_ms, last, now, "clock moved backwards");
        Error::ClockBackwards {
            last,
            now: now.saturating_sub(self.epoch),
            drift_ms,
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_timestamp_exhausted(&self, ts: u64) -> Error {
        #[cfg(feature = "tracing")]
        tracing::error!(
            timestamp = ts,
            epoch = self.epoch,
            "timestamp field exhausted"
        );
        Error::TimestampExhausted {
            timestamp: ts,
            max: Layout::MAX_TIMESTAMP,
        }
    }
}
