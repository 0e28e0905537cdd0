//! Money value object.
//!
//! All amounts are integer cents to avoid floating-point rounding drift in
//! discount and total arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents money in cents to avoid floating-point arithmetic errors
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(u64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from cents
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Creates a `Money` value from whole currency units with overflow checking
    #[must_use]
    pub const fn checked_from_units(units: u64) -> Option<Self> {
        match units.checked_mul(100) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Returns the amount in cents
    #[must_use]
    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// Checks if the amount is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two money amounts with overflow checking
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(result) => Some(Self(result)),
            None => None,
        }
    }

    /// Adds two money amounts, saturating at `u64::MAX` cents
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Subtracts two money amounts (returns None if result would be negative)
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        if self.0 >= other.0 {
            Some(Self(self.0 - other.0))
        } else {
            None
        }
    }

    /// Subtracts two money amounts, floored at zero
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Returns the smaller of two amounts
    #[must_use]
    pub const fn min(self, other: Self) -> Self {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }

    /// Computes a percentage of this amount, truncating fractional cents.
    ///
    /// The intermediate product is computed in `u128`, so this cannot overflow
    /// for any `u64` amount and percent up to 100.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
    pub const fn percentage(self, percent: u8) -> Self {
        // Clamped so product / 100 always fits in u64
        let percent = if percent > 100 { 100 } else { percent };
        let product = self.0 as u128 * percent as u128;
        Self((product / 100) as u64)
    }

    /// Computes a percentage discount bounded by an absolute cap:
    /// `min(amount * percent / 100, cap)`.
    #[must_use]
    pub const fn discount_with_cap(self, percent: u8, cap: Self) -> Self {
        self.percentage(percent).min(cap)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn percentage_truncates_fractional_cents() {
        // 33% of 0.10 is 3.3 cents, truncated to 3
        assert_eq!(Money::from_cents(10).percentage(33), Money::from_cents(3));
    }

    #[test]
    fn discount_is_bounded_by_cap() {
        // 50% of 1000.00 is 500.00, capped at 100.00
        let subtotal = Money::from_cents(100_000);
        let cap = Money::from_cents(10_000);
        assert_eq!(subtotal.discount_with_cap(50, cap), cap);
    }

    #[test]
    fn discount_below_cap_is_unchanged() {
        let subtotal = Money::from_cents(10_000);
        let cap = Money::from_cents(10_000);
        assert_eq!(
            subtotal.discount_with_cap(10, cap),
            Money::from_cents(1_000)
        );
    }

    #[test]
    fn saturating_sub_floors_at_zero() {
        let a = Money::from_cents(100);
        let b = Money::from_cents(200);
        assert_eq!(a.saturating_sub(b), Money::ZERO);
    }

    #[test]
    fn percentage_of_max_does_not_overflow() {
        let max = Money::from_cents(u64::MAX);
        assert_eq!(max.percentage(100), max);
    }

    #[test]
    fn display_pads_cents() {
        assert_eq!(Money::from_cents(105).to_string(), "1.05");
        assert_eq!(Money::from_cents(90_000).to_string(), "900.00");
    }
}
