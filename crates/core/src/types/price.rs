//! Type-safe price representation using decimal arithmetic.
//!
//! The backend models prices as JSON numbers, so a [`Price`] travels as a
//! number on the wire while staying a [`Decimal`] in memory. Display always
//! uses dollars with two decimals (`$9.99`).

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An order price in dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Parse a form value into a price.
    ///
    /// Only numeric parsing is performed; negative values are accepted and
    /// left for the backend to reject. Returns `None` when the input is not
    /// a number.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .ok()
            .map(Self)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "${rounded:.2}")
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from_cents(999).to_string(), "$9.99");
        assert_eq!(Price::new(Decimal::from(5)).to_string(), "$5.00");
        assert_eq!(Price::parse("1.005").unwrap().to_string(), "$1.01");
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!(Price::parse("abc"), None);
        assert_eq!(Price::parse(""), None);
        assert_eq!(Price::parse(" 9.99 "), Some(Price::from_cents(999)));
    }

    #[test]
    fn test_deserializes_from_json_number() {
        let price: Price = serde_json::from_str("9.99").unwrap();
        assert_eq!(price.to_string(), "$9.99");
    }

    #[test]
    fn test_serializes_as_json_number() {
        let json = serde_json::to_value(Price::from_cents(999)).unwrap();
        assert!(json.is_number());
        assert!((json.as_f64().unwrap() - 9.99).abs() < f64::EPSILON);
    }
}
