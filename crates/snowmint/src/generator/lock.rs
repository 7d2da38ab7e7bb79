use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    GeneratorConfig, Poll, Result, SnowflakeComponents, SnowflakeGenerator, SnowflakeId,
    SystemClock, TimeSource,
    generator::{Mutex, MutexGuard},
};

/// A lock-based wrapper for sharing one [`SnowflakeGenerator`] across threads.
///
/// Clones share the same generator and therefore the same worker/process
/// identity, so IDs stay unique and increase in the order the lock is
/// acquired. The lock is released while waiting out an exhausted sequence.
///
/// Uses [`std::sync::Mutex`] by default, or `parking_lot::Mutex` with the
/// `parking-lot` feature.
///
/// ## Recommended When
/// - Several threads must mint IDs under a single worker ID
///
/// Prefer one [`SnowflakeGenerator`] per thread, each with its own worker
/// ID, when the ID space allows it.
///
/// # Example
/// ```
/// use snowmint::{GeneratorConfig, LockSnowflakeGenerator, TWITTER_EPOCH};
///
/// let generator = LockSnowflakeGenerator::new(GeneratorConfig::new(TWITTER_EPOCH, 1)).unwrap();
/// let shared = generator.clone();
/// let handle = std::thread::spawn(move || shared.generate().unwrap());
/// let a = generator.generate().unwrap();
/// let b = handle.join().unwrap();
/// assert_ne!(a, b);
/// ```
#[derive(Debug)]
pub struct LockSnowflakeGenerator<T = SystemClock>
where
    T: TimeSource,
{
    inner: Arc<Mutex<SnowflakeGenerator<T>>>,
}

impl<T> Clone for LockSnowflakeGenerator<T>
where
    T: TimeSource,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl LockSnowflakeGenerator<SystemClock> {
    /// Creates a shared generator driven by the system wall clock.
    ///
    /// # Errors
    ///
    /// See [`SnowflakeGenerator::new`].
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        SnowflakeGenerator::new(config).map(Self::from_generator)
    }
}

impl<T> LockSnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a shared generator that reads time from `clock`.
    ///
    /// # Errors
    ///
    /// See [`SnowflakeGenerator::new`].
    pub fn with_clock(config: GeneratorConfig, clock: T) -> Result<Self> {
        SnowflakeGenerator::with_clock(config, clock).map(Self::from_generator)
    }

    pub fn from_generator(generator: SnowflakeGenerator<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(generator)),
        }
    }

    /// Generates a new ID. See [`SnowflakeGenerator::generate`].
    ///
    /// # Errors
    ///
    /// Everything [`SnowflakeGenerator::generate`] returns, plus
    /// [`Error::LockPoisoned`](crate::Error::LockPoisoned) if another thread
    /// panicked while holding the lock.
    pub fn generate(&self) -> Result<SnowflakeId> {
        self.generate_with(|_| core::hint::spin_loop())
    }

    /// Generates a new ID, calling `f` outside the lock each time the
    /// sequence is exhausted.
    ///
    /// # Errors
    ///
    /// See [`Self::generate`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self, f)))]
    pub fn generate_with(&self, mut f: impl FnMut(u64)) -> Result<SnowflakeId> {
        loop {
            match self.try_poll_id()? {
                Poll::Ready { id } => break Ok(id),
                Poll::Pending { yield_for } => f(yield_for),
            }
        }
    }

    /// One generation step under the lock. See
    /// [`SnowflakeGenerator::try_poll_id`].
    ///
    /// # Errors
    ///
    /// See [`Self::generate`].
    pub fn try_poll_id(&self) -> Result<Poll> {
        self.lock()?.try_poll_id()
    }

    /// See [`SnowflakeGenerator::compose`].
    ///
    /// # Errors
    ///
    /// See [`SnowflakeGenerator::compose`].
    pub fn compose(
        &self,
        timestamp: u64,
        worker_id: u64,
        process_id: u64,
        sequence: u64,
    ) -> Result<SnowflakeId> {
        self.lock()?
            .compose(timestamp, worker_id, process_id, sequence)
    }

    /// See [`SnowflakeGenerator::decompose`].
    ///
    /// # Errors
    ///
    /// See [`SnowflakeGenerator::decompose`].
    pub fn decompose(&self, id: SnowflakeId) -> Result<SnowflakeComponents> {
        self.lock()?.decompose(id)
    }

    #[cfg(not(feature = "parking-lot"))]
    fn lock(&self) -> Result<MutexGuard<'_, SnowflakeGenerator<T>>> {
        Ok(self.inner.lock()?)
    }

    #[cfg(feature = "parking-lot")]
    #[allow(clippy::unnecessary_wraps)]
    fn lock(&self) -> Result<MutexGuard<'_, SnowflakeGenerator<T>>> {
        Ok(self.inner.lock())
    }
}
