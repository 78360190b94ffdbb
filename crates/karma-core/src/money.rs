//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A register that sums `price * quantity` in floats drifts a little     │
//! │  more with every line it rings up.                                     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every monetary value is an i64 count of minor units.                │
//! │    Sums are exact no matter how many times they are recomputed.        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use karma_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // $10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;                     // $21.98
//! let total = price + Money::from_cents(500);  // $15.99
//!
//! // Decimal strings only at presentation boundaries
//! let typed = Money::parse("25.50").unwrap();
//! assert_eq!(typed.cents(), 2550);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::error::{CheckoutError, CheckoutResult};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative intermediate values for diagnostics
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Every monetary value in the checkout flow goes through this type:
/// unit prices, line totals, subtotals, discounts, tendered amounts,
/// change and remaining balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use karma_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use karma_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Parses a decimal string (`"25.50"`, `"7"`, `"0.05"`) into Money.
    ///
    /// This is the only place external decimal input enters the ledger.
    /// Rejected inputs:
    /// - negative amounts (`"-1.00"`)
    /// - more than two decimal places (`"1.005"`)
    /// - anything non-numeric (`"12,50"`, `""`, `"NaN"`)
    ///
    /// ## Example
    /// ```rust
    /// use karma_core::money::Money;
    ///
    /// assert_eq!(Money::parse("25.50").unwrap().cents(), 2550);
    /// assert_eq!(Money::parse("7").unwrap().cents(), 700);
    /// assert_eq!(Money::parse("0.5").unwrap().cents(), 50);
    /// assert!(Money::parse("-1.00").is_err());
    /// assert!(Money::parse("1.005").is_err());
    /// ```
    pub fn parse(input: &str) -> CheckoutResult<Self> {
        let input = input.trim();

        let invalid = |reason: &str| CheckoutError::InvalidAmount {
            reason: format!("'{}' {}", input, reason),
        };

        if input.is_empty() {
            return Err(invalid("is empty"));
        }
        if input.starts_with('-') {
            return Err(invalid("is negative"));
        }

        let (major_str, minor_str) = match input.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (input, ""),
        };

        if minor_str.len() > 2 {
            return Err(invalid("has more than two decimal places"));
        }

        let major: i64 = match major_str {
            // ".50" style input
            "" => 0,
            _ => major_str
                .parse()
                .map_err(|_| invalid("is not a valid amount"))?,
        };

        // ".5" means 50 cents, ".05" means 5 cents
        let minor: i64 = match minor_str {
            "" => 0,
            _ => {
                let parsed: i64 = minor_str
                    .parse()
                    .map_err(|_| invalid("is not a valid amount"))?;
                if minor_str.len() == 1 {
                    parsed * 10
                } else {
                    parsed
                }
            }
        };

        major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .map(Money)
            .ok_or_else(|| invalid("is out of range"))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn major_part(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
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

    /// Subtracts, clamping the result at zero.
    ///
    /// Totals, change and remaining balances are never negative;
    /// use plain `-` when a signed difference is wanted for diagnostics.
    ///
    /// ## Example
    /// ```rust
    /// use karma_core::money::Money;
    ///
    /// let total = Money::from_cents(2550);
    /// let discount = Money::from_cents(3000);
    /// assert_eq!(total.saturating_sub(discount), Money::zero());
    /// ```
    #[inline]
    pub const fn saturating_sub(&self, other: Self) -> Self {
        let diff = self.0 - other.0;
        if diff < 0 {
            Money(0)
        } else {
            Money(diff)
        }
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use karma_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 897); // $8.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Takes a percentage of this amount, expressed in basis points.
    ///
    /// ## Rounding Rule: Truncation
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  percent_of TRUNCATES toward zero to the nearest minor unit.        │
    /// │                                                                     │
    /// │    $10.01 × 10%  = 100.1 cents → 100 cents                         │
    /// │    $25.50 × 10%  = 255 cents exactly                               │
    /// │                                                                     │
    /// │  A percentage share computed this way can never exceed its exact   │
    /// │  value, so a discount can never exceed the subtotal it came from.  │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Arguments
    /// * `bps` - basis points: 1000 = 10%, 10000 = 100%
    ///
    /// ## Example
    /// ```rust
    /// use karma_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(2550); // $25.50
    /// assert_eq!(subtotal.percent_of(1000).cents(), 255); // 10% = $2.55
    ///
    /// let odd = Money::from_cents(1001); // $10.01
    /// assert_eq!(odd.percent_of(1000).cents(), 100); // truncated
    /// ```
    pub fn percent_of(&self, bps: u32) -> Money {
        // i128 keeps the intermediate product clear of i64 overflow
        let share = (self.0 as i128 * bps as i128) / 10_000;
        Money::from_cents(share as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for receipts and debugging. Use frontend formatting for actual
/// UI display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.major_part().abs(),
            self.minor_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Sum of an iterator of Money values (cart subtotals, leg totals).
impl std::iter::Sum for Money {
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
        assert_eq!(money.major_part(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(10, 99);
        assert_eq!(money.cents(), 1099);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.cents(), -550);
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
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);
    }

    #[test]
    fn test_saturating_sub_clamps_at_zero() {
        let a = Money::from_cents(500);
        let b = Money::from_cents(800);

        assert_eq!(a.saturating_sub(b), Money::zero());
        assert_eq!(b.saturating_sub(a).cents(), 300);
        // Signed subtraction stays available for diagnostics
        assert_eq!((a - b).cents(), -300);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(299);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total.cents(), 897);
    }

    #[test]
    fn test_percent_of_exact() {
        // $25.50 × 10% = $2.55 exactly
        let subtotal = Money::from_cents(2550);
        assert_eq!(subtotal.percent_of(1000).cents(), 255);
    }

    #[test]
    fn test_percent_of_truncates() {
        // $10.01 × 10% = 100.1 cents → 100 cents (documented truncation)
        let subtotal = Money::from_cents(1001);
        assert_eq!(subtotal.percent_of(1000).cents(), 100);

        // $0.99 × 33.33% = 32.9967 cents → 32 cents
        let small = Money::from_cents(99);
        assert_eq!(small.percent_of(3333).cents(), 32);
    }

    #[test]
    fn test_percent_of_full_and_zero() {
        let subtotal = Money::from_cents(2550);
        assert_eq!(subtotal.percent_of(10_000), subtotal);
        assert_eq!(subtotal.percent_of(0), Money::zero());
    }

    #[test]
    fn test_percent_of_never_exceeds_base() {
        for cents in [1, 7, 99, 101, 2550, 999_999] {
            let base = Money::from_cents(cents);
            for bps in [1, 333, 1000, 5000, 9999, 10_000] {
                assert!(base.percent_of(bps) <= base, "{} bps of {}", bps, base);
            }
        }
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!(Money::parse("25.50").unwrap().cents(), 2550);
        assert_eq!(Money::parse("7").unwrap().cents(), 700);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse("0.5").unwrap().cents(), 50);
        assert_eq!(Money::parse(".50").unwrap().cents(), 50);
        assert_eq!(Money::parse(" 10.00 ").unwrap().cents(), 1000);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("-1.00").is_err());
        assert!(Money::parse("1.005").is_err());
        assert!(Money::parse("12,50").is_err());
        assert!(Money::parse("NaN").is_err());
        assert!(Money::parse("1.2.3").is_err());
    }

    #[test]
    fn test_sum_iterator() {
        let total: Money = [100, 250, 399]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 749);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_cents(100);
        assert!(!positive.is_zero());
        assert!(positive.is_positive());
        assert!(!positive.is_negative());

        let negative = Money::from_cents(-100);
        assert!(!negative.is_zero());
        assert!(!negative.is_positive());
        assert!(negative.is_negative());
    }
}
