use crate::InvalidIdError;
use core::{fmt, str::FromStr};

/// A 64-bit Snowflake ID.
///
/// A plain value: produced by [`generate`] or [`compose`], consumed by
/// [`decompose`], never mutated. Ordering is numeric, which for IDs from one
/// generator is chronological first and by sequence second.
///
/// The numeric value can exceed what some runtimes represent exactly (for
/// example, JavaScript numbers lose precision past 2^53). [`Display`],
/// [`FromStr`] and [`Self::to_padded_string`] provide the decimal string form
/// for those consumers.
///
/// ```
/// use snowmint::SnowflakeId;
///
/// let id: SnowflakeId = "1541815603606036480".parse().unwrap();
/// assert_eq!(id.to_raw(), 1_541_815_603_606_036_480);
/// assert_eq!(id.to_string(), "1541815603606036480");
/// ```
///
/// [`generate`]: crate::SnowflakeGenerator::generate
/// [`compose`]: crate::SnowflakeGenerator::compose
/// [`decompose`]: crate::SnowflakeGenerator::decompose
/// [`Display`]: core::fmt::Display
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowflakeId(u64);

impl SnowflakeId {
    /// Mask of the reserved sign bit.
    pub const RESERVED_BIT: u64 = 1 << 63;

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn to_raw(self) -> u64 {
        self.0
    }

    /// Returns true if the reserved top bit is set. A generator never mints
    /// such an ID.
    pub const fn has_reserved_bit(self) -> bool {
        self.0 & Self::RESERVED_BIT != 0
    }

    /// Returns the ID as a zero-padded 20-digit string. Padded strings sort
    /// lexicographically in the same order as the IDs.
    pub fn to_padded_string(&self) -> String {
        format!("{:020}", self.0)
    }
}

impl From<u64> for SnowflakeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<SnowflakeId> for u64 {
    fn from(id: SnowflakeId) -> Self {
        id.0
    }
}

impl TryFrom<i64> for SnowflakeId {
    type Error = InvalidIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(Self)
            .map_err(|_| InvalidIdError::Negative(value))
    }
}

impl FromStr for SnowflakeId {
    type Err = InvalidIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with('-') {
            return match s.parse::<i64>() {
                Ok(n) if n < 0 => Err(InvalidIdError::Negative(n)),
                _ => Err(InvalidIdError::Malformed {
                    input: s.to_owned(),
                }),
            };
        }
        // `u64::from_str` tolerates a leading '+'; a decimal ID never has one.
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidIdError::Malformed {
                input: s.to_owned(),
            });
        }
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| InvalidIdError::Malformed {
                input: s.to_owned(),
            })
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SnowflakeId").field(&self.0).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal() {
        let id: SnowflakeId = "42".parse().unwrap();
        assert_eq!(id, SnowflakeId::from_raw(42));

        let max: SnowflakeId = "18446744073709551615".parse().unwrap();
        assert_eq!(max.to_raw(), u64::MAX);
        assert!(max.has_reserved_bit());
    }

    #[test]
    fn rejects_negative_text() {
        assert_eq!(
            "-7".parse::<SnowflakeId>(),
            Err(InvalidIdError::Negative(-7))
        );
    }

    #[test]
    fn rejects_malformed_text() {
        for input in ["", "abc", "12a", "+12", " 12", "1.5", "-", "-0", "18446744073709551616"] {
            assert_eq!(
                input.parse::<SnowflakeId>(),
                Err(InvalidIdError::Malformed {
                    input: input.to_owned()
                }),
                "input: {input:?}"
            );
        }
    }

    #[test]
    fn rejects_negative_integers() {
        assert_eq!(
            SnowflakeId::try_from(-1_i64),
            Err(InvalidIdError::Negative(-1))
        );
        assert_eq!(SnowflakeId::try_from(5_i64), Ok(SnowflakeId::from_raw(5)));
    }

    #[test]
    fn padded_string_sorts_like_ids() {
        let small = SnowflakeId::from_raw(9);
        let large = SnowflakeId::from_raw(10);
        assert_eq!(small.to_padded_string(), "00000000000000000009");
        assert!(small.to_padded_string() < large.to_padded_string());
        assert!(small < large);
    }

    #[test]
    fn display_and_debug() {
        let id = SnowflakeId::from(1234_u64);
        assert_eq!(id.to_string(), "1234");
        assert_eq!(format!("{id:?}"), "SnowflakeId(1234)");
        assert_eq!(u64::from(id), 1234);
    }
}
