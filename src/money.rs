//! Exact currency amounts for direct-entry files.
//!
//! Uses `rust_decimal` internally so monetary values never pass through
//! floating point; the file format stores every amount as integer cents.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A non-negative currency amount in dollars.
///
/// Values enter through [`Money::parse`], which rejects anything that cannot
/// be converted to cents, so [`Money::cents`] is infallible on every
/// constructed value.
///
/// # Examples
///
/// ```
/// use aba_generator::Money;
///
/// let amount = Money::parse("250.87").unwrap();
/// assert_eq!(amount.cents(), 25087);
/// assert_eq!(amount.to_string(), "250.87");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Money(Decimal);

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// Parses a non-negative decimal dollar amount.
    ///
    /// Returns `None` when the value is not a decimal number, is negative,
    /// or is too large to represent as cents.
    pub fn parse(value: &str) -> Option<Self> {
        let amount = Decimal::from_str(value.trim()).ok()?;
        if amount < Decimal::ZERO {
            return None;
        }
        amount.checked_mul(Decimal::ONE_HUNDRED)?;
        Some(Money(amount))
    }

    /// The amount as integer cents, rounding `dollars * 100` to the nearest
    /// whole cent with ties away from zero.
    pub fn cents(&self) -> u128 {
        let cents = self
            .0
            .saturating_mul(Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        // A rounded non-negative Decimal has a 96-bit integer mantissa.
        cents.to_u128().expect("non-negative cents fit in u128")
    }

    /// The accounting net of two amounts, `|self - other|`.
    pub fn abs_diff(self, other: Money) -> Money {
        Money((self.0 - other.0).abs())
    }

    /// Returns `true` if this amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:.2}", self.0))
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Money::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid currency amount {s:?}")))
    }
}
