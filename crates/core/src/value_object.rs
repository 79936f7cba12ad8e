//! Value objects: equality by value, not identity.

use core::iter::Sum;
use core::ops::{Add, Sub};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values; two
/// `Money` amounts of 150.00 are the same amount regardless of where they came
/// from. Contrast with entities, which carry an identity.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// A monetary amount in minor units (cents).
///
/// Prices are stored per unit; stock valuation multiplies them by quantities and
/// sums across the whole catalog, so the amount is held in an `i128` to keep
/// that arithmetic exact. Rounding only ever happens at display time.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i128);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    /// Amount from minor units (e.g. `12050` == 120.50).
    pub const fn from_minor(minor: i128) -> Self {
        Self(minor)
    }

    /// Amount from whole currency units (e.g. `120` == 120.00).
    pub const fn from_major(major: i64) -> Self {
        Self(major as i128 * 100)
    }

    pub const fn minor_units(self) -> i128 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Unit price × quantity.
    pub fn times(self, quantity: i64) -> Self {
        Self(self.0.saturating_mul(quantity as i128))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// Plain decimal rendering with two fraction digits (`1234.50`, `-0.05`).
impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

/// Parses `"120"`, `"120.5"`, `"120.50"` and `"-3.25"`; at most two fraction digits.
impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let (negative, digits) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let (whole, fraction) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(DomainError::validation(format!("invalid amount: {s:?}")));
        }
        if fraction.len() > 2 {
            return Err(DomainError::validation(format!(
                "amount has more than two decimal places: {s:?}"
            )));
        }

        let whole: i128 = whole
            .parse()
            .map_err(|_| DomainError::validation(format!("amount out of range: {s:?}")))?;
        let cents: i128 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i128>().unwrap_or(0) * 10,
            _ => fraction.parse::<i128>().unwrap_or(0),
        };

        let minor = whole
            .checked_mul(100)
            .and_then(|w| w.checked_add(cents))
            .ok_or_else(|| DomainError::validation(format!("amount out of range: {s:?}")))?;

        Ok(Money(if negative { -minor } else { minor }))
    }
}
