//! Exact monetary amount used for sale values and per-seller totals.
//!
//! Amounts keep the full precision they were parsed with so that totals are
//! exact sums. `Display` rounds to two decimal places; `exact()` shows the
//! value at its own scale.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A monetary amount backed by `rust_decimal::Decimal`.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use sales_batch::Amount;
///
/// let amount = Amount::from_str("  150000.5 ").unwrap();
/// assert_eq!(amount.to_string(), "150000.50");
/// assert_eq!(format!("{:>11}", amount), "  150000.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Number of decimal places shown when formatting.
    pub const DISPLAY_SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Builds an amount from a whole number of currency units.
    pub fn from_units(units: i64) -> Self {
        Amount(Decimal::from(units))
    }

    /// Returns the underlying decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Value rounded half away from zero to the display scale.
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(Self::DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Formats the value without rounding, with at least two decimal places.
    pub fn exact(&self) -> ExactAmount {
        let mut value = self.0;
        if value.scale() < Self::DISPLAY_SCALE {
            value.rescale(Self::DISPLAY_SCALE);
        }
        ExactAmount(value)
    }
}

/// Unrounded rendering of an `Amount`, see [`Amount::exact`].
#[derive(Debug, Clone, Copy)]
pub struct ExactAmount(Decimal);

impl fmt::Display for ExactAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0.to_string())
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so callers can right-align into fixed-width columns
        f.pad(&format!("{:.2}", self.rounded()))
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

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Stored at full precision; rounding happens only on display
        serializer.serialize_str(&self.0.to_string())
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
