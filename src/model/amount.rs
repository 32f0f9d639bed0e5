//! Amount type for signed money values.
//!
//! This module provides the `Amount` type which wraps `f64` and handles parsing user input that
//! may include a currency sign and commas as thousands separators.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, Neg};
use std::str::FromStr;

/// Currency signs that are accepted, and ignored, when parsing.
const CURRENCY_SIGNS: &[char] = &['$', '₽', '€', '£'];

/// Represents a signed amount of money. Positive amounts are income, negative amounts are
/// expenses.
///
/// The value is an ordinary `f64`. It is written to the snapshot as a JSON number.
///
/// # Examples
///
/// ```
/// # use daybudget::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("-$1,250.5").unwrap();
/// assert_eq!(amount.value(), -1250.5);
/// assert_eq!(amount.to_string(), "-1,250.50");
/// ```
///
/// Text that is not a finite number is rejected:
///
/// ```
/// # use daybudget::model::Amount;
/// # use std::str::FromStr;
/// assert!(Amount::from_str("twelve").is_err());
/// assert!(Amount::from_str("NaN").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    pub const ZERO: Amount = Amount(0.0);

    /// Wraps `value` without any checks.
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the underlying value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns true if the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    /// Returns true if the amount is strictly less than zero.
    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// The same amount with its sign forced positive.
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }
}

/// An error that can occur when parsing text into an `Amount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// Nothing was entered.
    Empty,
    /// The text is not a number.
    NotANumber(String),
    /// The text parsed, but to NaN or infinity.
    NotFinite(String),
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AmountError::Empty => write!(f, "no amount was entered"),
            AmountError::NotANumber(s) => write!(f, "'{s}' is not a number"),
            AmountError::NotFinite(s) => write!(f, "'{s}' is not a finite amount"),
        }
    }
}

impl std::error::Error for AmountError {}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        // Drop currency signs and thousands separators, e.g. "-$1,000.00" -> "-1000.00"
        let cleaned: String = trimmed
            .chars()
            .filter(|c| !CURRENCY_SIGNS.contains(c) && *c != ',')
            .collect();

        let value = f64::from_str(cleaned.trim())
            .map_err(|_| AmountError::NotANumber(trimmed.to_string()))?;
        if !value.is_finite() {
            return Err(AmountError::NotFinite(trimmed.to_string()));
        }
        Ok(Amount(value))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_nan() {
            return write!(f, "NaN");
        }
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{sign}{}", format_num::format_num!(",.2", self.0.abs()))
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Self::Output {
        Amount(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}
