//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so sums are exact. Rounding only
//! ever happens when a value is formatted for display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use thiserror::Error;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest magnitude `parse` accepts: one trillion units
    pub const MAX_PARSED: Money = Money(100_000_000_000_000);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use finance_tracker::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Parse a money amount from a string
    ///
    /// Accepts "10.50", "-10.50", "$10.50", "10", "10.5" and "1,250.00".
    /// More than two fractional digits is rejected rather than truncated.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let input = s;
        let s = s.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };

        let s = s.strip_prefix('$').unwrap_or(s);
        let s: String = s.chars().filter(|c| *c != ',').collect();

        let invalid = || MoneyParseError::InvalidFormat(input.to_string());

        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (s.as_str(), ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        if fraction.len() > 2 {
            return Err(MoneyParseError::TooPrecise(input.to_string()));
        }

        let dollars: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let total = dollars
            .checked_mul(100)
            .and_then(|d| d.checked_add(cents))
            .filter(|total| *total <= Self::MAX_PARSED.0)
            .ok_or_else(|| MoneyParseError::OutOfRange(input.to_string()))?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!(
                "-{}{}.{:02}",
                symbol,
                self.dollars().abs(),
                self.cents_part()
            )
        } else {
            format!("{}{}.{:02}", symbol, self.dollars(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("Invalid money format: {0}")]
    InvalidFormat(String),
    #[error("Too many decimal places (max 2): {0}")]
    TooPrecise(String),
    #[error("Amount out of range: {0}")]
    OutOfRange(String),
}
