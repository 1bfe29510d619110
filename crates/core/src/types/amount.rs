//! Monetary amounts using decimal arithmetic.
//!
//! Amounts arrive as JSON numbers and leave as JSON floats, but everything in
//! between (comparison, debiting) is done on [`Decimal`] so `0.1 + 0.2` style
//! drift never reaches a stored balance.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

/// Errors that can occur when reading an [`Amount`] from JSON.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The value is not a JSON number.
    #[error("expected a number, got {0}")]
    NotANumber(String),
    /// The number does not fit in a decimal.
    #[error("number out of range: {0}")]
    OutOfRange(String),
}

/// A currency amount.
///
/// Serializes as a JSON float (`100` becomes `100.0`), and its `Display`
/// output follows the same convention so messages read `70.0` rather than
/// `70`.
///
/// ```
/// use mock_shop_core::Amount;
/// use serde_json::json;
///
/// let balance = Amount::from_json(&json!(100)).unwrap();
/// let price = Amount::from_json(&json!(30.5)).unwrap();
/// let left = balance.checked_sub(price).unwrap();
/// assert_eq!(left.to_string(), "69.5");
/// assert_eq!(serde_json::to_string(&balance).unwrap(), "100.0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wrap a decimal.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Read an amount from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::NotANumber`] for strings, booleans, null,
    /// arrays and objects, and [`AmountError::OutOfRange`] for numbers a
    /// `Decimal` cannot hold.
    pub fn from_json(value: &Value) -> Result<Self, AmountError> {
        match value {
            Value::Number(number) => Self::from_number(number),
            other => Err(AmountError::NotANumber(other.to_string())),
        }
    }

    fn from_number(number: &Number) -> Result<Self, AmountError> {
        let text = number.to_string();
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map(Self)
            .map_err(|_| AmountError::OutOfRange(text))
    }

    /// Get the underlying decimal.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Subtract, returning `None` on overflow.
    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Lossy conversion for the wire.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.to_f64();
        if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
            write!(f, "{value:.1}")
        } else {
            write!(f, "{value}")
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}
