//! Opaque record identifiers for catalog entities.
//!
//! The hosted catalog backend decides its own key type: serial integers
//! for some deployments, UUID strings for others. `RecordId` accepts both
//! wire forms and treats them as one opaque key space.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// An opaque record key, numeric or string-valued.
///
/// String forms that are canonical base-10 integers normalize to the
/// numeric variant so a key survives the round trip through an HTML form
/// (`42` renders as `"42"` and parses back to the same key). Non-canonical
/// numeric strings such as `"042"` stay distinct string keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Serial / bigint key.
    Int(i64),
    /// UUID or other textual key.
    Str(String),
}

impl RecordId {
    fn canonicalize(value: String) -> Self {
        match value.parse::<i64>() {
            Ok(n) if n.to_string() == value => Self::Int(n),
            _ => Self::Str(value),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::canonicalize(id.to_owned())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self::canonicalize(id)
    }
}

impl FromStr for RecordId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Str(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Self::Int(n),
            Raw::Str(s) => Self::canonicalize(s),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_string_normalizes() {
        assert_eq!(RecordId::from("42"), RecordId::Int(42));
        assert_eq!("42".parse::<RecordId>().unwrap(), RecordId::Int(42));
    }

    #[test]
    fn test_non_canonical_string_stays_string() {
        assert_eq!(RecordId::from("042"), RecordId::Str("042".to_string()));
        assert_ne!(RecordId::from("042"), RecordId::Int(42));
    }

    #[test]
    fn test_uuid_string_stays_string() {
        let id = RecordId::from("9b2d7c1e-42a5-4b7e-9c3f-0d6f1a2b3c4d");
        assert!(matches!(id, RecordId::Str(_)));
    }

    #[test]
    fn test_display_round_trip() {
        for raw in ["17", "9b2d7c1e-42a5-4b7e-9c3f-0d6f1a2b3c4d"] {
            let id = RecordId::from(raw);
            assert_eq!(id.to_string().parse::<RecordId>().unwrap(), id);
        }
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let n: RecordId = serde_json::from_str("7").unwrap();
        assert_eq!(n, RecordId::Int(7));

        let s: RecordId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(s, RecordId::Int(7));

        let u: RecordId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(u, RecordId::Str("abc".to_string()));
    }

    #[test]
    fn test_serialize_preserves_variant() {
        assert_eq!(serde_json::to_string(&RecordId::Int(7)).unwrap(), "7");
        assert_eq!(
            serde_json::to_string(&RecordId::Str("abc".to_string())).unwrap(),
            "\"abc\""
        );
    }
}
