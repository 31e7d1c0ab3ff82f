//! Exact decimal money.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors produced when constructing a [`Money`] value.
#[derive(Debug, Error)]
pub enum MoneyError {
    /// The input string is not a valid decimal amount.
    #[error("invalid money amount '{input}': {source}")]
    Parse {
        input: String,
        source: rust_decimal::Error,
    },
}

/// A currency amount with exact decimal arithmetic.
///
/// Amounts travel on the wire as decimal strings (`"12.34"`), never as binary
/// floats, so the scale of the written form is significant: equality includes
/// scale, and `"12.34"` and `"12.340"` are distinct values. `Display` is the
/// canonical rendering and round-trips through [`FromStr`].
#[derive(Debug, Clone, Copy)]
pub struct Money(Decimal);

impl Money {
    /// Returns a zero amount.
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Builds an amount from minor units and a scale
    /// (`from_minor_units(1234, 2)` is `"12.34"`).
    pub fn from_minor_units(units: i64, scale: u32) -> Self {
        Self(Decimal::new(units, scale))
    }

    /// Multiplies by an integer quantity, preserving the scale of the unit
    /// amount (`"12.34" * 10 == "123.40"`).
    pub fn multiply(&self, quantity: u32) -> Money {
        Money(self.0 * Decimal::from(quantity))
    }

    /// Adds another amount. The result carries the larger of the two scales.
    pub fn add(&self, other: Money) -> Money {
        Money(self.0 + other.0)
    }

    /// Returns the canonical decimal-string rendering.
    pub fn as_canonical_string(&self) -> String {
        self.0.to_string()
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s).map(Money).map_err(|source| MoneyError::Parse {
            input: s.to_string(),
            source,
        })
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        // Scale-sensitive: two amounts are equal only if their canonical
        // renderings match.
        self.0.mantissa() == other.0.mantissa() && self.0.scale() == other.0.scale()
    }
}

impl Eq for Money {}

impl std::hash::Hash for Money {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.mantissa().hash(state);
        self.0.scale().hash(state);
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}
