//! Price type for handling monetary values with exact decimal arithmetic.
//!
//! This module provides the `Price` type which wraps `Decimal` and handles
//! the lenient parsing rules for price edits, the fixed tax derivation, and
//! the two-decimal formatting used by displays and exports.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The flat tax applied to every price, i.e. 10%. Not configurable.
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Represents a product price.
///
/// This type wraps `Decimal` and is always non-negative. Prices are created
/// at zero and edited through [`Price::parse_lenient`], which coerces
/// anything that does not parse as a non-negative number to zero rather
/// than rejecting the edit.
///
/// # Examples
///
/// Lenient parsing:
/// ```
/// # use purchase_tracker::model::Price;
/// assert_eq!(Price::parse_lenient("45").to_string(), "45.00");
/// assert_eq!(Price::parse_lenient("abc").to_string(), "0.00");
/// ```
///
/// Tax derivation:
/// ```
/// # use purchase_tracker::model::{format_money, Price};
/// let price = Price::parse_lenient("10");
/// assert_eq!(format_money(price.with_tax()), "11.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Creates a new Price from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Parses user input into a price. Anything that does not parse as a
    /// number, and anything negative, becomes zero. Clearing a price field
    /// goes through here, so an empty string is a normal input, not an
    /// error.
    pub fn parse_lenient(raw: &str) -> Self {
        let value = Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO);
        if value.is_sign_negative() {
            return Self(Decimal::ZERO);
        }
        Self(value)
    }

    /// The price with the flat tax applied, unrounded.
    pub fn with_tax(&self) -> Decimal {
        self.0 * (Decimal::ONE + TAX_RATE)
    }

    /// Returns true if the price is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

/// Formats a monetary value with exactly two fractional digits, half-up
/// rounding, no thousands separators and no currency symbol.
pub fn format_money(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_money(self.0))
    }
}

impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialize as a plain decimal string at full precision.
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PriceVisitor)
    }
}

/// Accepts both strings and bare JSON numbers. Snapshots written by earlier
/// versions of the tracker stored prices as numbers.
struct PriceVisitor;

impl Visitor<'_> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a decimal string or number")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let value = Decimal::from_str(v.trim()).map_err(de::Error::custom)?;
        Ok(Price::new(value))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Price::new(Decimal::from(v)))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Price::new(Decimal::from(v)))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Decimal::try_from(v).map(Price::new).map_err(de::Error::custom)
    }
}
