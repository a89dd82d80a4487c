//! Full-precision monetary amounts.
//!
//! Uses `rust_decimal` internally so that shares like `1000 / 3` are carried
//! with 28 significant digits instead of drifting the way binary floats do.
//! Rounding only happens when an amount is displayed.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// A monetary amount carried at full decimal precision.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use settle_up::Amount;
///
/// let amount = Amount::from_str("1000").unwrap().checked_split(3).unwrap();
/// assert_eq!(amount.to_string(), "333.3333");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Decimal places shown when an amount is rendered.
    pub const DISPLAY_SCALE: u32 = 4;

    /// Smallest residue tolerance, used for ordinary amounts (1e-12).
    pub const EPSILON: Self = Amount(Decimal::from_parts(1, 0, 0, false, 12));

    /// Residue tolerance as a fraction of the largest amount in play (1e-20).
    ///
    /// `Decimal` keeps 28 significant digits, so rounding error grows with
    /// magnitude and a fixed tolerance stops covering it past ~1e16.
    const RELATIVE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 20);

    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Wraps a `Decimal` without changing its scale.
    pub fn new(value: Decimal) -> Self {
        Amount(value)
    }

    /// Returns `true` if this value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if this value is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Residue tolerance for a computation whose amounts reach `magnitude`.
    ///
    /// The larger of [`Amount::EPSILON`] and `magnitude * 1e-20`.
    pub fn tolerance_for(magnitude: Amount) -> Amount {
        let relative = magnitude
            .0
            .abs()
            .checked_mul(Self::RELATIVE_TOLERANCE)
            .map(Amount)
            .unwrap_or(Self::EPSILON);
        relative.max(Self::EPSILON)
    }

    /// Returns `true` if the magnitude is within `tolerance`.
    pub fn is_within(&self, tolerance: Amount) -> bool {
        self.0.abs() <= tolerance.0
    }

    /// Snaps rounding residues within `tolerance` to exactly zero, leaving
    /// other values untouched.
    pub fn clamp_residue(self, tolerance: Amount) -> Self {
        if self.is_within(tolerance) {
            Self::ZERO
        } else {
            self
        }
    }

    /// Absolute value.
    pub fn abs(self) -> Self {
        Amount(self.0.abs())
    }

    /// Addition that reports overflow instead of panicking.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Subtraction that reports overflow instead of panicking.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Amount)
    }

    /// Divides evenly between `parts` shares. Returns `None` when `parts` is zero.
    pub fn checked_split(self, parts: usize) -> Option<Self> {
        let divisor = Decimal::from(u64::try_from(parts).ok()?);
        self.0.checked_div(divisor).map(Amount)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount(Decimal::from(value))
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        // Spreadsheets export large values in scientific notation.
        let decimal = Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed))?;
        Ok(Amount(decimal))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self.0.round_dp(Self::DISPLAY_SCALE).normalize();
        write!(f, "{}", shown)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0 - rhs.0)
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, x| acc + x)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}
