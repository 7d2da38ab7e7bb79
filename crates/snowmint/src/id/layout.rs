use crate::ConfigError;

/// Width of the timestamp field in every layout.
pub const TIMESTAMP_BITS: u32 = 41;

/// Bits shared by the worker, process and sequence fields: 64 bits minus the
/// reserved sign bit minus [`TIMESTAMP_BITS`].
pub const MAX_ALLOCATED_BITS: u32 = 64 - 1 - TIMESTAMP_BITS;

/// How the 22 non-reserved, non-timestamp bits are split between the worker,
/// process and sequence fields.
///
/// The default is the Twitter split: 10 worker bits, no process bits and 12
/// sequence bits.
///
/// ```text
///  Bit Index:  63           63 62            22 21             12 11             0
///              +--------------+----------------+-----------------+---------------+
///  Field:      | reserved (1) | timestamp (41) | process|worker  | sequence      |
///              +--------------+----------------+-----------------+---------------+
///              |<----------- MSB ---------- 64 bits ----------- LSB ------------>|
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BitAllocation {
    pub worker_bits: u8,
    pub process_bits: u8,
    pub sequence_bits: u8,
}

impl Default for BitAllocation {
    fn default() -> Self {
        Self::TWITTER
    }
}

impl BitAllocation {
    /// 10 worker bits, 0 process bits, 12 sequence bits.
    pub const TWITTER: Self = Self::new(10, 0, 12);

    pub const fn new(worker_bits: u8, process_bits: u8, sequence_bits: u8) -> Self {
        Self {
            worker_bits,
            process_bits,
            sequence_bits,
        }
    }

    /// Sum of the three widths.
    pub const fn total(&self) -> u32 {
        self.worker_bits as u32 + self.process_bits as u32 + self.sequence_bits as u32
    }
}

/// The validated bit layout of a generator: its [`BitAllocation`] plus the
/// shifts and masks derived from it.
///
/// Built once when a generator is constructed and never mutated afterwards,
/// so it can be read concurrently by [`compose`] and [`decompose`].
///
/// [`compose`]: crate::SnowflakeGenerator::compose
/// [`decompose`]: crate::SnowflakeGenerator::decompose
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Layout {
    bits: BitAllocation,
    max_worker: u64,
    max_process: u64,
    max_sequence: u64,
    worker_shift: u32,
    process_shift: u32,
    timestamp_shift: u32,
}

impl Layout {
    /// Largest epoch-relative timestamp the 41-bit field can hold, roughly
    /// 69.7 years of milliseconds.
    pub const MAX_TIMESTAMP: u64 = (1 << TIMESTAMP_BITS) - 1;

    /// Validates `bits` and derives the field shifts and masks.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyBitAllocation`] if every width is zero
    /// - [`ConfigError::BitBudgetExceeded`] if the widths add up to more than
    ///   [`MAX_ALLOCATED_BITS`]
    pub fn new(bits: BitAllocation) -> Result<Self, ConfigError> {
        let total = bits.total();
        if total == 0 {
            return Err(ConfigError::EmptyBitAllocation);
        }
        if total > MAX_ALLOCATED_BITS {
            return Err(ConfigError::BitBudgetExceeded {
                total,
                max: MAX_ALLOCATED_BITS,
                worker_bits: bits.worker_bits,
                process_bits: bits.process_bits,
                sequence_bits: bits.sequence_bits,
            });
        }

        let worker_shift = u32::from(bits.sequence_bits);
        let process_shift = worker_shift + u32::from(bits.worker_bits);
        Ok(Self {
            bits,
            max_worker: mask(bits.worker_bits),
            max_process: mask(bits.process_bits),
            max_sequence: mask(bits.sequence_bits),
            worker_shift,
            process_shift,
            timestamp_shift: total,
        })
    }

    pub const fn bits(&self) -> BitAllocation {
        self.bits
    }

    pub const fn max_worker(&self) -> u64 {
        self.max_worker
    }

    pub const fn max_process(&self) -> u64 {
        self.max_process
    }

    pub const fn max_sequence(&self) -> u64 {
        self.max_sequence
    }

    pub const fn max_timestamp(&self) -> u64 {
        Self::MAX_TIMESTAMP
    }

    pub const fn worker_shift(&self) -> u32 {
        self.worker_shift
    }

    pub const fn process_shift(&self) -> u32 {
        self.process_shift
    }

    pub const fn timestamp_shift(&self) -> u32 {
        self.timestamp_shift
    }

    pub fn check_worker_id(&self, worker_id: u64) -> Result<(), ConfigError> {
        if worker_id > self.max_worker {
            return Err(ConfigError::WorkerIdOutOfRange {
                worker_id,
                max: self.max_worker,
            });
        }
        Ok(())
    }

    pub fn check_process_id(&self, process_id: u64) -> Result<(), ConfigError> {
        if process_id > self.max_process {
            return Err(ConfigError::ProcessIdOutOfRange {
                process_id,
                max: self.max_process,
            });
        }
        Ok(())
    }

    pub fn check_sequence(&self, sequence: u64) -> Result<(), ConfigError> {
        if sequence > self.max_sequence {
            return Err(ConfigError::SequenceOutOfRange {
                sequence,
                max: self.max_sequence,
            });
        }
        Ok(())
    }

    /// Checks an epoch-relative timestamp against [`Self::MAX_TIMESTAMP`].
    pub fn check_timestamp(&self, timestamp: u64) -> Result<(), ConfigError> {
        if timestamp > Self::MAX_TIMESTAMP {
            return Err(ConfigError::TimestampOutOfRange {
                timestamp,
                max: Self::MAX_TIMESTAMP,
            });
        }
        Ok(())
    }

    /// Packs already validated fields into a raw ID. `timestamp` is
    /// epoch-relative.
    pub const fn pack(&self, timestamp: u64, worker_id: u64, process_id: u64, sequence: u64) -> u64 {
        debug_assert!(timestamp <= Self::MAX_TIMESTAMP, "timestamp overflow");
        debug_assert!(worker_id <= self.max_worker, "worker_id overflow");
        debug_assert!(process_id <= self.max_process, "process_id overflow");
        debug_assert!(sequence <= self.max_sequence, "sequence overflow");
        (timestamp << self.timestamp_shift)
            | (process_id << self.process_shift)
            | (worker_id << self.worker_shift)
            | sequence
    }

    /// Splits a raw ID into `(timestamp, worker_id, process_id, sequence)`,
    /// with the timestamp still epoch-relative.
    pub const fn unpack(&self, raw: u64) -> (u64, u64, u64, u64) {
        (
            raw >> self.timestamp_shift,
            (raw >> self.worker_shift) & self.max_worker,
            (raw >> self.process_shift) & self.max_process,
            raw & self.max_sequence,
        )
    }
}

/// All-ones mask for a field `bits` wide. Widths never exceed
/// [`MAX_ALLOCATED_BITS`], so the shift cannot overflow.
const fn mask(bits: u8) -> u64 {
    (1 << bits) - 1
}
