//! Price handling using decimal arithmetic.
//!
//! Prices are plain `rust_decimal::Decimal` amounts in the backend's
//! currency unit. The catalog backend is loose about the wire form: a
//! `numeric` column may arrive as a JSON number or as a string depending
//! on the deployment, so deserialization accepts both.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// Deserialize an optional price from a JSON number, string, or null.
///
/// Use with `#[serde(deserialize_with = "price::deserialize_option")]` on
/// nullable price fields.
///
/// # Errors
///
/// Returns a deserialization error if the value is a string that does not
/// parse as a decimal number.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(Decimal),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(d)) => Ok(Some(d)),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Format a decimal amount with two decimal places for display.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "deserialize_option")]
        price: Option<Decimal>,
    }

    #[test]
    fn test_deserialize_from_number() {
        let row: Row = serde_json::from_str(r#"{"price": 19.99}"#).unwrap();
        assert_eq!(row.price, Some(Decimal::new(1999, 2)));
    }

    #[test]
    fn test_deserialize_from_string() {
        let row: Row = serde_json::from_str(r#"{"price": "19.99"}"#).unwrap();
        assert_eq!(row.price, Some(Decimal::new(1999, 2)));
    }

    #[test]
    fn test_deserialize_null() {
        let row: Row = serde_json::from_str(r#"{"price": null}"#).unwrap();
        assert_eq!(row.price, None);
    }

    #[test]
    fn test_deserialize_missing() {
        let row: Row = serde_json::from_str("{}").unwrap();
        assert_eq!(row.price, None);
    }

    #[test]
    fn test_deserialize_bad_string_fails() {
        let result: Result<Row, _> = serde_json::from_str(r#"{"price": "a lot"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::new(10, 0)), "10.00");
        assert_eq!(format_amount(Decimal::new(1999, 2)), "19.99");
        assert_eq!(format_amount(Decimal::new(12344, 3)), "12.34");
    }
}
