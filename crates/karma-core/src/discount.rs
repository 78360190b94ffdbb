//! # Discount Module
//!
//! Percentage and fixed-amount discounts applied to a checkout subtotal.
//!
//! ## Rules
//! - At most one discount is active per checkout session; applying a new
//!   one replaces the previous, clearing resets the amount to zero.
//! - A discount can never push the total below zero: percentage shares
//!   truncate to the minor unit, fixed amounts clamp to the subtotal.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::validation::{validate_discount_bps, validate_discount_code};

// =============================================================================
// Discount
// =============================================================================

/// What a discount takes off the subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// Percentage of the subtotal, in basis points (1000 = 10%).
    Percentage { bps: u32 },
    /// Flat amount, clamped to the subtotal.
    FixedAmount { amount: Money },
}

/// A discount as applied by the cashier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Discount {
    /// The code the cashier entered (e.g. "VERANO2025").
    pub code: String,
    pub kind: DiscountKind,
}

impl Discount {
    /// Creates a percentage discount.
    ///
    /// ## Example
    /// ```rust
    /// use karma_core::discount::Discount;
    ///
    /// let ten_off = Discount::percentage("BIENVENIDA", 1000).unwrap();
    /// assert!(Discount::percentage("TOO-MUCH", 10_001).is_err());
    /// ```
    pub fn percentage(code: &str, bps: u32) -> ValidationResult<Self> {
        validate_discount_code(code)?;
        validate_discount_bps(bps)?;
        Ok(Discount {
            code: code.trim().to_string(),
            kind: DiscountKind::Percentage { bps },
        })
    }

    /// Creates a fixed-amount discount.
    pub fn fixed(code: &str, amount: Money) -> ValidationResult<Self> {
        validate_discount_code(code)?;
        if amount.is_negative() {
            return Err(ValidationError::MustBePositive {
                field: "discount amount".to_string(),
            });
        }
        Ok(Discount {
            code: code.trim().to_string(),
            kind: DiscountKind::FixedAmount { amount },
        })
    }

    /// Computes the amount this discount takes off the given subtotal.
    ///
    /// The result is always within `[0, subtotal]`:
    /// - percentage shares truncate toward zero to the minor unit
    /// - fixed amounts return `min(amount, subtotal)`
    ///
    /// ## Example
    /// ```rust
    /// use karma_core::discount::Discount;
    /// use karma_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(2550); // $25.50
    ///
    /// let pct = Discount::percentage("TEN", 1000).unwrap();
    /// assert_eq!(pct.amount_off(subtotal), Money::from_cents(255)); // $2.55
    ///
    /// let fixed = Discount::fixed("BIG", Money::from_cents(3000)).unwrap();
    /// assert_eq!(fixed.amount_off(subtotal), subtotal); // clamped
    /// ```
    pub fn amount_off(&self, subtotal: Money) -> Money {
        match &self.kind {
            DiscountKind::Percentage { bps } => subtotal.percent_of(*bps),
            DiscountKind::FixedAmount { amount } => (*amount).min(subtotal),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_discount() {
        // $25.50 at 10% = $2.55
        let discount = Discount::percentage("BIENVENIDA", 1000).unwrap();
        let amount = discount.amount_off(Money::from_cents(2550));
        assert_eq!(amount, Money::from_cents(255));
    }

    #[test]
    fn test_fixed_discount_clamps_to_subtotal() {
        // $30.00 off a $25.50 subtotal clamps to $25.50
        let discount = Discount::fixed("FIJO3000", Money::from_cents(3000)).unwrap();
        let amount = discount.amount_off(Money::from_cents(2550));
        assert_eq!(amount, Money::from_cents(2550));
    }

    #[test]
    fn test_fixed_discount_below_subtotal() {
        let discount = Discount::fixed("FIJO500", Money::from_cents(500)).unwrap();
        let amount = discount.amount_off(Money::from_cents(2550));
        assert_eq!(amount, Money::from_cents(500));
    }

    #[test]
    fn test_discount_never_exceeds_subtotal() {
        let subtotals = [0, 1, 99, 2550, 100_000];
        let discounts = [
            Discount::percentage("TINY", 1).unwrap(),
            Discount::percentage("FULL", 10_000).unwrap(),
            Discount::fixed("F0", Money::zero()).unwrap(),
            Discount::fixed("F-HUGE", Money::from_cents(1_000_000)).unwrap(),
        ];

        for cents in subtotals {
            let subtotal = Money::from_cents(cents);
            for discount in &discounts {
                let off = discount.amount_off(subtotal);
                assert!(!off.is_negative());
                assert!(off <= subtotal, "{:?} on {}", discount.kind, subtotal);
            }
        }
    }

    #[test]
    fn test_invalid_discounts_rejected() {
        assert!(Discount::percentage("OVER", 10_001).is_err());
        assert!(Discount::percentage("", 1000).is_err());
        assert!(Discount::fixed("NEG", Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_zero_subtotal() {
        let discount = Discount::percentage("TEN", 1000).unwrap();
        assert_eq!(discount.amount_off(Money::zero()), Money::zero());
    }
}
