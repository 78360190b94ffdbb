//! # Payment Module
//!
//! Tender details, mixed-payment legs and the payment reconciler.
//!
//! ## Method State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Payment Reconciliation                               │
//! │                                                                         │
//! │  Method          Completeness gate           Satisfied when            │
//! │  ──────          ─────────────────           ──────────────            │
//! │  Cash            tendered >= $0              tendered >= total         │
//! │  Card            auth reference present      always (full payment)     │
//! │  BankTransfer    reference present           always (full payment)     │
//! │  MobilePayment   reference present           always (full payment)     │
//! │  Credit          client name + id present    never (settles later)     │
//! │  Mixed           every leg complete          Σ leg amounts >= total    │
//! │                                                                         │
//! │  Switching the selected method REPLACES the whole tender value, so     │
//! │  a lingering card reference can never leak into a credit sale.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mixed Payments
//! A mixed tender owns an ordered list of legs (insertion order is kept
//! for the receipt). Legs are added while a balance remains, removed as
//! long as at least one leg stays, and each leg passes its own method's
//! completeness check at finalize time. Over-payment is allowed and
//! reported, not rejected; what to do with the overage is the caller's
//! business decision.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CheckoutError, CheckoutResult};
use crate::money::Money;
use crate::types::{MobileApp, PaymentMethodKind};
use crate::validation::{validate_card_last4, validate_client_info, validate_reference};

// =============================================================================
// Tender Detail
// =============================================================================

/// Detail fields for a single (non-mixed) payment method.
///
/// Each variant carries only its own fields. There is no shared mutable
/// "details" bag: the type system guarantees stale fields from one method
/// cannot survive a switch to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TenderDetail {
    /// Physical cash; `tendered` is what the customer handed over.
    Cash { tendered: Money },

    /// Card on an external terminal. The amount is implicitly the total
    /// due; partial card payments go through a mixed tender instead.
    Card {
        last4: Option<String>,
        reference: String,
    },

    /// Bank transfer to the store's account.
    BankTransfer { reference: String },

    /// Mobile payment application.
    MobilePayment { app: MobileApp, reference: String },

    /// Deferred payment against the client's account.
    Credit {
        client_name: String,
        client_id: String,
        due_in_days: u32,
    },
}

impl TenderDetail {
    /// The discriminant for this detail.
    pub fn kind(&self) -> PaymentMethodKind {
        match self {
            TenderDetail::Cash { .. } => PaymentMethodKind::Cash,
            TenderDetail::Card { .. } => PaymentMethodKind::Card,
            TenderDetail::BankTransfer { .. } => PaymentMethodKind::BankTransfer,
            TenderDetail::MobilePayment { .. } => PaymentMethodKind::MobilePayment,
            TenderDetail::Credit { .. } => PaymentMethodKind::Credit,
        }
    }

    /// Checks method-specific completeness ahead of finalize.
    ///
    /// ## Rules
    /// - Cash: tendered amount must not be negative
    /// - Card / BankTransfer / MobilePayment: non-empty authorization
    ///   reference (card digits, when given, must be exactly 4 digits)
    /// - Credit: non-empty client name and document id
    pub fn check_complete(&self) -> CheckoutResult<()> {
        match self {
            TenderDetail::Cash { tendered } => {
                if tendered.is_negative() {
                    return Err(CheckoutError::InvalidAmount {
                        reason: format!("cash tendered {} is negative", tendered),
                    });
                }
                Ok(())
            }
            TenderDetail::Card { last4, reference } => {
                if reference.trim().is_empty() {
                    return Err(CheckoutError::MissingReference {
                        kind: PaymentMethodKind::Card,
                    });
                }
                validate_reference(reference)?;
                if let Some(digits) = last4 {
                    validate_card_last4(digits)?;
                }
                Ok(())
            }
            TenderDetail::BankTransfer { reference } => {
                if reference.trim().is_empty() {
                    return Err(CheckoutError::MissingReference {
                        kind: PaymentMethodKind::BankTransfer,
                    });
                }
                validate_reference(reference)?;
                Ok(())
            }
            TenderDetail::MobilePayment { reference, .. } => {
                if reference.trim().is_empty() {
                    return Err(CheckoutError::MissingReference {
                        kind: PaymentMethodKind::MobilePayment,
                    });
                }
                validate_reference(reference)?;
                Ok(())
            }
            TenderDetail::Credit {
                client_name,
                client_id,
                ..
            } => {
                if client_name.trim().is_empty() || client_id.trim().is_empty() {
                    return Err(CheckoutError::MissingClientInfo);
                }
                validate_client_info(client_name, client_id)?;
                Ok(())
            }
        }
    }

    /// The authorization reference, for methods that carry one.
    pub fn reference(&self) -> Option<&str> {
        match self {
            TenderDetail::Card { reference, .. }
            | TenderDetail::BankTransfer { reference }
            | TenderDetail::MobilePayment { reference, .. } => Some(reference.as_str()),
            _ => None,
        }
    }
}

// =============================================================================
// Payment Leg
// =============================================================================

/// One component of a mixed payment.
///
/// A leg can never itself be mixed: `TenderDetail` has no such variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentLeg {
    pub detail: TenderDetail,
    /// How much of the total this leg covers.
    pub amount: Money,
}

impl PaymentLeg {
    pub fn new(detail: TenderDetail, amount: Money) -> Self {
        PaymentLeg { detail, amount }
    }

    /// Convenience constructor for the most common leg.
    pub fn cash(amount: Money) -> Self {
        PaymentLeg {
            detail: TenderDetail::Cash { tendered: amount },
            amount,
        }
    }

    /// Validates this leg: a non-negative amount and a complete detail.
    pub fn check_complete(&self) -> CheckoutResult<()> {
        if self.amount.is_negative() {
            return Err(CheckoutError::InvalidAmount {
                reason: format!("leg amount {} is negative", self.amount),
            });
        }
        self.detail.check_complete()
    }
}

// =============================================================================
// Mixed Tender
// =============================================================================

/// An ordered list of payment legs covering one total.
///
/// ## Invariants
/// - At least one leg at all times while in mixed mode (switching away
///   from mixed is a separate transition on the checkout)
/// - Insertion order is preserved for receipt display
/// - `tendered`/`remaining` are derived on every call, never cached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MixedTender {
    legs: Vec<PaymentLeg>,
}

impl MixedTender {
    /// Creates a mixed tender with its first leg.
    pub fn new(first_leg: PaymentLeg) -> Self {
        MixedTender {
            legs: vec![first_leg],
        }
    }

    /// The legs in insertion order.
    pub fn legs(&self) -> &[PaymentLeg] {
        &self.legs
    }

    /// Sum of every leg amount.
    pub fn tendered(&self) -> Money {
        self.legs.iter().map(|leg| leg.amount).sum()
    }

    /// What is still owed against `total`, clamped at zero.
    pub fn remaining(&self, total: Money) -> Money {
        total.saturating_sub(self.tendered())
    }

    /// Whether the legs cover the total.
    pub fn is_satisfied(&self, total: Money) -> bool {
        self.tendered() >= total
    }

    /// Adds a leg while a balance remains.
    ///
    /// Refused once the total is already covered; the cashier removes or
    /// shrinks another leg first and tries again.
    pub fn add_leg(&mut self, leg: PaymentLeg, total: Money) -> CheckoutResult<()> {
        if self.remaining(total).is_zero() {
            return Err(CheckoutError::NothingOutstanding);
        }
        if leg.amount.is_negative() {
            return Err(CheckoutError::InvalidAmount {
                reason: format!("leg amount {} is negative", leg.amount),
            });
        }
        self.legs.push(leg);
        Ok(())
    }

    /// Removes the leg at `index`, keeping at least one leg.
    pub fn remove_leg(&mut self, index: usize) -> CheckoutResult<PaymentLeg> {
        if self.legs.len() <= 1 {
            return Err(CheckoutError::LastLegKept);
        }
        if index >= self.legs.len() {
            return Err(CheckoutError::LegNotFound { index });
        }
        Ok(self.legs.remove(index))
    }

    /// Updates the amount of the leg at `index`.
    pub fn set_leg_amount(&mut self, index: usize, amount: Money) -> CheckoutResult<()> {
        if amount.is_negative() {
            return Err(CheckoutError::InvalidAmount {
                reason: format!("leg amount {} is negative", amount),
            });
        }
        match self.legs.get_mut(index) {
            Some(leg) => {
                // A cash leg's tendered field follows its amount
                if let TenderDetail::Cash { tendered } = &mut leg.detail {
                    *tendered = amount;
                }
                leg.amount = amount;
                Ok(())
            }
            None => Err(CheckoutError::LegNotFound { index }),
        }
    }

    /// Replaces the detail of the leg at `index` (method change resets
    /// every method-specific field in one move).
    pub fn set_leg_detail(&mut self, index: usize, detail: TenderDetail) -> CheckoutResult<()> {
        match self.legs.get_mut(index) {
            Some(leg) => {
                leg.detail = detail;
                Ok(())
            }
            None => Err(CheckoutError::LegNotFound { index }),
        }
    }

    /// Validates every leg for finalize.
    pub fn check_complete(&self) -> CheckoutResult<()> {
        for leg in &self.legs {
            leg.check_complete()?;
        }
        Ok(())
    }
}

// =============================================================================
// Tender
// =============================================================================

/// The payment selected for a checkout: one method, or a mix of legs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Tender {
    Single(TenderDetail),
    Mixed(MixedTender),
}

impl Tender {
    /// The discriminant for this tender.
    pub fn kind(&self) -> PaymentMethodKind {
        match self {
            Tender::Single(detail) => detail.kind(),
            Tender::Mixed(_) => PaymentMethodKind::Mixed,
        }
    }

    /// Method-specific completeness for finalize.
    pub fn check_complete(&self) -> CheckoutResult<()> {
        match self {
            Tender::Single(detail) => detail.check_complete(),
            Tender::Mixed(mixed) => mixed.check_complete(),
        }
    }

    /// Reconciles this tender against the total due.
    ///
    /// Pure function of `(self, total)`; calling it twice on unchanged
    /// state yields identical results.
    pub fn reconcile(&self, total: Money) -> Reconciliation {
        match self {
            Tender::Single(TenderDetail::Cash { tendered }) => {
                let tendered = *tendered;
                Reconciliation {
                    tendered,
                    change: tendered.saturating_sub(total),
                    remaining: total.saturating_sub(tendered),
                    satisfied: tendered >= total,
                    overpaid: false,
                }
            }
            // Card, transfer and mobile settle the full amount in one step
            Tender::Single(TenderDetail::Card { .. })
            | Tender::Single(TenderDetail::BankTransfer { .. })
            | Tender::Single(TenderDetail::MobilePayment { .. }) => Reconciliation {
                tendered: total,
                change: Money::zero(),
                remaining: Money::zero(),
                satisfied: true,
                overpaid: false,
            },
            // Credit settles later: nothing tendered now, never satisfied
            Tender::Single(TenderDetail::Credit { .. }) => Reconciliation {
                tendered: Money::zero(),
                change: Money::zero(),
                remaining: total,
                satisfied: false,
                overpaid: false,
            },
            Tender::Mixed(mixed) => {
                let tendered = mixed.tendered();
                Reconciliation {
                    tendered,
                    // Change-style handling for a mixed overage is the
                    // caller's policy; it is reported, not computed away
                    change: Money::zero(),
                    remaining: total.saturating_sub(tendered),
                    satisfied: tendered >= total,
                    overpaid: tendered > total,
                }
            }
        }
    }
}

// =============================================================================
// Reconciliation
// =============================================================================

/// The outcome of validating a tender against the total due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Reconciliation {
    /// What the customer has put forward.
    pub tendered: Money,
    /// Cash to hand back (cash tenders only).
    pub change: Money,
    /// Still owed, clamped at zero.
    pub remaining: Money,
    /// Whether the amount due is covered right now. Permanently false
    /// for credit: a credit sale finalizes as pending, not as paid.
    pub satisfied: bool,
    /// Mixed legs exceed the total; allowed, surfaced as a warning.
    pub overpaid: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn card(reference: &str) -> TenderDetail {
        TenderDetail::Card {
            last4: None,
            reference: reference.to_string(),
        }
    }

    #[test]
    fn test_cash_change_identity() {
        // total $22.95, tendered $25.00 -> change $2.05
        let total = Money::from_cents(2295);
        let tender = Tender::Single(TenderDetail::Cash {
            tendered: Money::from_cents(2500),
        });

        let recon = tender.reconcile(total);
        assert!(recon.satisfied);
        assert_eq!(recon.change, Money::from_cents(205));
        assert_eq!(recon.remaining, Money::zero());
        // tendered = total + change, exactly
        assert_eq!(recon.tendered, total + recon.change);
    }

    #[test]
    fn test_cash_insufficient() {
        let total = Money::from_cents(2295);
        let tender = Tender::Single(TenderDetail::Cash {
            tendered: Money::from_cents(2000),
        });

        let recon = tender.reconcile(total);
        assert!(!recon.satisfied);
        assert_eq!(recon.change, Money::zero());
        assert_eq!(recon.remaining, Money::from_cents(295));
    }

    #[test]
    fn test_cash_negative_tendered_rejected() {
        let detail = TenderDetail::Cash {
            tendered: Money::from_cents(-100),
        };
        assert!(matches!(
            detail.check_complete(),
            Err(CheckoutError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_card_requires_reference() {
        let missing = card("");
        assert!(matches!(
            missing.check_complete(),
            Err(CheckoutError::MissingReference {
                kind: PaymentMethodKind::Card
            })
        ));

        assert!(card("AUTH-1234").check_complete().is_ok());
    }

    #[test]
    fn test_card_last4_format() {
        let bad = TenderDetail::Card {
            last4: Some("12".to_string()),
            reference: "AUTH-1".to_string(),
        };
        assert!(bad.check_complete().is_err());

        let good = TenderDetail::Card {
            last4: Some("4242".to_string()),
            reference: "AUTH-1".to_string(),
        };
        assert!(good.check_complete().is_ok());
    }

    #[test]
    fn test_card_settles_in_full() {
        let total = Money::from_cents(2295);
        let recon = Tender::Single(card("AUTH-1")).reconcile(total);
        assert!(recon.satisfied);
        assert_eq!(recon.tendered, total);
        assert_eq!(recon.change, Money::zero());
        assert_eq!(recon.remaining, Money::zero());
    }

    #[test]
    fn test_credit_never_satisfied() {
        let detail = TenderDetail::Credit {
            client_name: "Ana Gómez".to_string(),
            client_id: "CURP-123".to_string(),
            due_in_days: 30,
        };
        assert!(detail.check_complete().is_ok());

        let recon = Tender::Single(detail).reconcile(Money::from_cents(5000));
        assert!(!recon.satisfied);
        assert_eq!(recon.tendered, Money::zero());
        assert_eq!(recon.remaining, Money::from_cents(5000));
    }

    #[test]
    fn test_credit_requires_client_info() {
        let detail = TenderDetail::Credit {
            client_name: "".to_string(),
            client_id: "".to_string(),
            due_in_days: 30,
        };
        assert!(matches!(
            detail.check_complete(),
            Err(CheckoutError::MissingClientInfo)
        ));
    }

    #[test]
    fn test_mixed_partial_payment() {
        // total $100.00, legs $40.00 cash + $40.00 card -> $20.00 remaining
        let total = Money::from_cents(10_000);
        let mut mixed = MixedTender::new(PaymentLeg::cash(Money::from_cents(4000)));
        mixed
            .add_leg(
                PaymentLeg::new(card("AX12"), Money::from_cents(4000)),
                total,
            )
            .unwrap();

        assert_eq!(mixed.tendered(), Money::from_cents(8000));
        assert_eq!(mixed.remaining(total), Money::from_cents(2000));
        assert!(!mixed.is_satisfied(total));

        let recon = Tender::Mixed(mixed).reconcile(total);
        assert!(!recon.satisfied);
        assert!(!recon.overpaid);
        assert_eq!(recon.remaining, Money::from_cents(2000));
    }

    #[test]
    fn test_mixed_conservation() {
        // tendered is exactly the sum of the legs, in insertion order
        let total = Money::from_cents(10_000);
        let mut mixed = MixedTender::new(PaymentLeg::cash(Money::from_cents(1234)));
        mixed
            .add_leg(
                PaymentLeg::new(card("A1"), Money::from_cents(4321)),
                total,
            )
            .unwrap();
        mixed
            .add_leg(PaymentLeg::cash(Money::from_cents(999)), total)
            .unwrap();

        let sum: Money = mixed.legs().iter().map(|l| l.amount).sum();
        assert_eq!(mixed.tendered(), sum);
        assert_eq!(sum, Money::from_cents(6554));
    }

    #[test]
    fn test_mixed_add_leg_refused_when_covered() {
        let total = Money::from_cents(5000);
        let mut mixed = MixedTender::new(PaymentLeg::cash(Money::from_cents(5000)));

        let err = mixed
            .add_leg(PaymentLeg::cash(Money::from_cents(100)), total)
            .unwrap_err();
        assert!(matches!(err, CheckoutError::NothingOutstanding));
    }

    #[test]
    fn test_mixed_keeps_last_leg() {
        let mut mixed = MixedTender::new(PaymentLeg::cash(Money::from_cents(100)));
        assert!(matches!(
            mixed.remove_leg(0),
            Err(CheckoutError::LastLegKept)
        ));
    }

    #[test]
    fn test_mixed_remove_and_rebalance() {
        let total = Money::from_cents(10_000);
        let mut mixed = MixedTender::new(PaymentLeg::cash(Money::from_cents(4000)));
        mixed
            .add_leg(
                PaymentLeg::new(card("A1"), Money::from_cents(6000)),
                total,
            )
            .unwrap();
        assert!(mixed.is_satisfied(total));

        mixed.remove_leg(1).unwrap();
        assert_eq!(mixed.remaining(total), Money::from_cents(6000));

        mixed.set_leg_amount(0, Money::from_cents(10_000)).unwrap();
        assert!(mixed.is_satisfied(total));
    }

    #[test]
    fn test_mixed_overpayment_is_flagged_not_blocked() {
        let total = Money::from_cents(5000);
        let mut mixed = MixedTender::new(PaymentLeg::cash(Money::from_cents(3000)));
        mixed
            .add_leg(
                PaymentLeg::new(card("A1"), Money::from_cents(4000)),
                total,
            )
            .unwrap();

        let recon = Tender::Mixed(mixed).reconcile(total);
        assert!(recon.satisfied);
        assert!(recon.overpaid);
        assert_eq!(recon.tendered, Money::from_cents(7000));
        assert_eq!(recon.remaining, Money::zero());
    }

    #[test]
    fn test_mixed_leg_completeness_checked() {
        let total = Money::from_cents(10_000);
        let mut mixed = MixedTender::new(PaymentLeg::cash(Money::from_cents(4000)));
        // A card leg still requires its reference
        mixed
            .add_leg(PaymentLeg::new(card(""), Money::from_cents(6000)), total)
            .unwrap();

        assert!(matches!(
            mixed.check_complete(),
            Err(CheckoutError::MissingReference {
                kind: PaymentMethodKind::Card
            })
        ));
    }

    #[test]
    fn test_set_leg_amount_tracks_cash_tendered() {
        let mut mixed = MixedTender::new(PaymentLeg::cash(Money::from_cents(1000)));
        mixed.set_leg_amount(0, Money::from_cents(2500)).unwrap();

        match &mixed.legs()[0].detail {
            TenderDetail::Cash { tendered } => assert_eq!(*tendered, Money::from_cents(2500)),
            other => panic!("unexpected detail: {:?}", other),
        }
    }

    #[test]
    fn test_leg_out_of_bounds() {
        let mut mixed = MixedTender::new(PaymentLeg::cash(Money::from_cents(1000)));
        assert!(matches!(
            mixed.set_leg_amount(3, Money::from_cents(1)),
            Err(CheckoutError::LegNotFound { index: 3 })
        ));
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let total = Money::from_cents(2295);
        let tender = Tender::Single(TenderDetail::Cash {
            tendered: Money::from_cents(2500),
        });

        assert_eq!(tender.reconcile(total), tender.reconcile(total));
    }

    #[test]
    fn test_tender_kind() {
        assert_eq!(
            Tender::Single(card("A")).kind(),
            PaymentMethodKind::Card
        );
        let mixed = Tender::Mixed(MixedTender::new(PaymentLeg::cash(Money::zero())));
        assert_eq!(mixed.kind(), PaymentMethodKind::Mixed);
    }
}
