use core::fmt;

/// The four fields recovered from a Snowflake ID by
/// [`decompose`](crate::SnowflakeGenerator::decompose).
///
/// `timestamp` is absolute: milliseconds since the UNIX epoch, with the
/// generator's epoch already added back.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SnowflakeComponents {
    pub timestamp: u64,
    pub worker_id: u64,
    pub process_id: u64,
    pub sequence: u64,
}

impl fmt::Display for SnowflakeComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "timestamp={} worker_id={} process_id={} sequence={}",
            self.timestamp, self.worker_id, self.process_id, self.sequence
        )
    }
}
