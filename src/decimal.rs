//! Fixed-point decimal type with 2 decimal places precision.
//!
//! Uses `rust_decimal` internally with scale enforcement so balances,
//! overdraft limits and interest rates match the `NUMERIC(10, 2)` columns
//! they are stored in.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

/// A decimal type that maintains exactly 2 decimal places of precision.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use bank_accounts::Decimal2;
///
/// let amount = Decimal2::from_str("10.5").unwrap();
/// assert_eq!(amount.to_string(), "10.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Decimal2(Decimal);

impl Decimal2 {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Decimal2(Decimal::ZERO);

    /// Creates a new `Decimal2` from a `Decimal`, rounding half away from zero
    /// to 2 decimal places.
    pub fn new(value: Decimal) -> Self {
        let mut normalized =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        normalized.rescale(Self::SCALE);
        Decimal2(normalized)
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if this value is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns `true` if this value is strictly less than zero.
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns `self + rhs`, or `None` if the sum does not fit.
    pub fn checked_add(self, rhs: Decimal2) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Decimal2::new)
    }

    /// Returns `self - rhs`, or `None` if the difference does not fit.
    pub fn checked_sub(self, rhs: Decimal2) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Decimal2::new)
    }

    /// Returns `self * percent / 100` rounded to 2 places, or `None` on overflow.
    pub fn checked_percent_of(self, percent: Decimal2) -> Option<Self> {
        self.0
            .checked_mul(percent.0)?
            .checked_div(Decimal::ONE_HUNDRED)
            .map(Decimal2::new)
    }

    /// Lossy conversion for external consumption (snapshots, records).
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }
}

impl FromStr for Decimal2 {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())?;
        Ok(Decimal2::new(decimal))
    }
}

impl fmt::Display for Decimal2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Neg for Decimal2 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Decimal2(-self.0)
    }
}
