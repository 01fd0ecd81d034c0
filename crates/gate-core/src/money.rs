//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In an order validator that would mean:                                 │
//! │    sum(subtotals) == declared_total sometimes fails for EQUAL totals,   │
//! │    and approval becomes nondeterministic.                               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every amount is an i64 count of cents. Equality is exact, the        │
//! │    reconciliation tolerance is exactly one cent, and the same payload   │
//! │    always produces the same verdict.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Floats exist only at the two boundaries of the system:
//! - decoding payload decimals (`Money::from_decimal`, round-half-even)
//! - emitting response numbers (`Money::to_decimal`)
//!
//! ## Usage
//! ```rust
//! use gate_core::money::Money;
//!
//! let unit_price = Money::from_decimal(1500.0);
//! let subtotal = unit_price.multiply_quantity(2);
//! assert_eq!(subtotal.cents(), 300_000); // $3000.00
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction must be closed — credit shortage and
///   total discrepancies are differences that can go either way
/// - **Single-field tuple struct**: zero-cost abstraction over i64
/// - **Full serde support**: serialized as plain cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use gate_core::money::Money;
    ///
    /// let amount = Money::from_cents(1099); // $10.99
    /// assert_eq!(amount.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a decimal amount (e.g. a JSON number),
    /// rounding to the nearest cent with round-half-even.
    ///
    /// This is the ONLY place a float enters monetary arithmetic. Exact
    /// halves round to the even cent so repeated conversions carry no
    /// systematic bias:
    ///
    /// ```rust
    /// use gate_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(0.125).cents(), 12); // half → even
    /// assert_eq!(Money::from_decimal(0.135).cents(), 14); // half → even
    /// assert_eq!(Money::from_decimal(1500.0).cents(), 150_000);
    /// ```
    pub fn from_decimal(value: f64) -> Self {
        let scaled = value * 100.0;
        let below = scaled.floor();
        let frac = scaled - below;

        // Binary floats land a hair off an exact .5; treat anything within
        // 1e-9 of a half as a tie and break it toward the even cent.
        let cents = if (frac - 0.5).abs() < 1e-9 {
            let below = below as i64;
            if below % 2 == 0 {
                below
            } else {
                below + 1
            }
        } else {
            scaled.round() as i64
        };

        Money(cents)
    }

    /// Returns the value as a decimal number for response emission.
    ///
    /// Cents are exactly representable in f64 far beyond any realistic
    /// order amount, so this conversion is lossless in practice.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99, sign dropped).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies by a quantity (line subtotal calculation).
    ///
    /// ```rust
    /// use gate_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2999); // $29.99
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 8997);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Checks whether two amounts agree within `tolerance` (absolute).
    ///
    /// Used for declared-vs-computed total reconciliation, where business
    /// inputs are allowed to disagree by up to one cent.
    ///
    /// ```rust
    /// use gate_core::money::Money;
    ///
    /// let declared = Money::from_cents(150_000);
    /// let computed = Money::from_cents(149_999);
    /// assert!(declared.reconciles_with(computed, Money::from_cents(1)));
    /// assert!(!declared.reconciles_with(Money::from_cents(149_997), Money::from_cents(1)));
    /// ```
    #[inline]
    pub const fn reconciles_with(&self, other: Money, tolerance: Money) -> bool {
        (self.0 - other.0).abs() <= tolerance.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// Used in rejection messages; hosts format their own presentation.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over line subtotals.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_decimal_exact() {
        assert_eq!(Money::from_decimal(1500.0).cents(), 150_000);
        assert_eq!(Money::from_decimal(0.0).cents(), 0);
        assert_eq!(Money::from_decimal(1499.98).cents(), 149_998);
        assert_eq!(Money::from_decimal(10.99).cents(), 1099);
    }

    #[test]
    fn test_from_decimal_rounds_half_to_even() {
        // .5 of a cent rounds toward the even cent in both directions
        assert_eq!(Money::from_decimal(0.125).cents(), 12);
        assert_eq!(Money::from_decimal(0.135).cents(), 14);
        assert_eq!(Money::from_decimal(0.145).cents(), 14);
        assert_eq!(Money::from_decimal(-0.125).cents(), -12);
    }

    #[test]
    fn test_from_decimal_rounds_nearest() {
        assert_eq!(Money::from_decimal(0.126).cents(), 13);
        assert_eq!(Money::from_decimal(0.124).cents(), 12);
        assert_eq!(Money::from_decimal(-0.126).cents(), -13);
    }

    #[test]
    fn test_to_decimal() {
        assert!((Money::from_cents(150_000).to_decimal() - 1500.0).abs() < f64::EPSILON);
        assert!((Money::from_cents(1).to_decimal() - 0.01).abs() < f64::EPSILON);
        assert!(Money::zero().to_decimal() == 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((b - a).cents(), -500);
        let tripled: Money = a * 3;
        assert_eq!(tripled.cents(), 3000);
    }

    #[test]
    fn test_sum_of_subtotals() {
        let subtotals = [
            Money::from_cents(120_000),
            Money::from_cents(2500),
            Money::from_cents(4500),
        ];
        let total: Money = subtotals.iter().copied().sum();
        assert_eq!(total.cents(), 127_000);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(2999);
        assert_eq!(unit_price.multiply_quantity(3).cents(), 8997);
        assert_eq!(unit_price.multiply_quantity(0).cents(), 0);
    }

    #[test]
    fn test_reconciles_with() {
        let tolerance = Money::from_cents(1);
        let declared = Money::from_cents(150_000);

        assert!(declared.reconciles_with(Money::from_cents(150_000), tolerance));
        assert!(declared.reconciles_with(Money::from_cents(149_999), tolerance));
        assert!(declared.reconciles_with(Money::from_cents(150_001), tolerance));
        assert!(!declared.reconciles_with(Money::from_cents(149_998), tolerance));
        assert!(!declared.reconciles_with(Money::from_cents(150_002), tolerance));
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_cents(100);
        assert!(positive.is_positive());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().cents(), 100);
    }
}
