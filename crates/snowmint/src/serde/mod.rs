use serde::{Deserializer, Serializer};

/// Serde helpers that render a [`SnowflakeId`] as a decimal string.
///
/// Use with `#[serde(with = "snowmint::as_decimal_string")]` when the
/// consumer cannot hold a 64-bit integer exactly (JSON read by JavaScript,
/// for instance). Without the attribute, [`SnowflakeId`] serializes as its
/// native integer.
///
/// [`SnowflakeId`]: crate::SnowflakeId
pub mod as_decimal_string {
    use super::{Deserializer, Serializer};
    use crate::SnowflakeId;
    use core::{fmt, marker::PhantomData};

    /// Serialize a snowflake ID as a decimal string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &SnowflakeId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(id)
    }

    /// Deserialize a snowflake ID from a decimal string.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The string is negative or not an unsigned decimal integer
    pub fn deserialize<'de, D>(d: D) -> Result<SnowflakeId, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DecimalVisitor(PhantomData<SnowflakeId>);

        impl serde::de::Visitor<'_> for DecimalVisitor {
            type Value = SnowflakeId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a decimal snowflake id string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                v.parse().map_err(serde::de::Error::custom)
            }
        }

        d.deserialize_str(DecimalVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SnowflakeComponents, SnowflakeId};
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
    struct Row {
        #[serde(with = "as_decimal_string")]
        id: SnowflakeId,
    }

    #[test]
    fn decimal_string_roundtrip() {
        let row = Row {
            id: SnowflakeId::from_raw(9_007_199_254_740_993),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json, json!({ "id": "9007199254740993" }));

        let back: Row = serde_json::from_value(json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn decimal_string_rejects_negative_and_garbage() {
        let err = serde_json::from_value::<Row>(json!({ "id": "-5" })).unwrap_err();
        assert!(err.to_string().contains("must not be negative"), "{err}");

        let err = serde_json::from_value::<Row>(json!({ "id": "snow" })).unwrap_err();
        assert!(err.to_string().contains("unsigned decimal"), "{err}");

        assert!(serde_json::from_value::<Row>(json!({ "id": 5 })).is_err());
    }

    #[test]
    fn native_id_is_transparent_integer() {
        let id = SnowflakeId::from_raw(42);
        assert_eq!(serde_json::to_value(id).unwrap(), json!(42));
        assert!(serde_json::from_value::<SnowflakeId>(json!(-1)).is_err());
    }

    #[test]
    fn components_serialize_by_field() {
        let parts = SnowflakeComponents {
            timestamp: 1_735_689_600_123,
            worker_id: 3,
            process_id: 1,
            sequence: 7,
        };
        let json = serde_json::to_value(parts).unwrap();
        assert_eq!(
            json,
            json!({
                "timestamp": 1_735_689_600_123_u64,
                "worker_id": 3,
                "process_id": 1,
                "sequence": 7,
            })
        );
        assert_eq!(
            serde_json::from_value::<SnowflakeComponents>(json).unwrap(),
            parts
        );
    }
}
