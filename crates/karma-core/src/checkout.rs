//! # Checkout Module
//!
//! The aggregate state of one checkout attempt and the finalize gate.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Lifecycle                                 │
//! │                                                                         │
//! │  cart lines ──► subtotal ──► (discount) ──► total                      │
//! │                                               │                         │
//! │                              tender ◄─── user input loop               │
//! │                                               │                         │
//! │                              attempt_finalize(issued_at)               │
//! │                              1. cart non-empty?                        │
//! │                              2. method complete?                       │
//! │                              3. payment sufficient? (credit exempt)    │
//! │                                               │                         │
//! │                                               ▼                         │
//! │                                        OrderSummary                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Hidden State
//! `totals()` recomputes everything from the current lines, discount and
//! tender on every call. There are no cached totals, no watchers and no
//! reactive graph; two calls on unchanged state return identical values.
//! The checkout is created fresh per attempt and simply dropped on
//! cancellation; nothing is persisted until the caller submits the
//! resulting [`OrderSummary`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{Cart, LineItem};
use crate::discount::Discount;
use crate::error::{CheckoutError, CheckoutResult};
use crate::money::Money;
use crate::payment::{PaymentLeg, Tender, TenderDetail};
use crate::summary::OrderSummary;
use crate::types::{PaymentMethodKind, Product, ReceiptKind};

// =============================================================================
// Checkout Totals
// =============================================================================

/// Everything the tender screen displays, derived in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CheckoutTotals {
    pub subtotal: Money,
    pub discount_amount: Money,
    /// `subtotal - discount_amount`, never negative.
    pub total: Money,
    pub tendered: Money,
    pub change: Money,
    pub remaining: Money,
    /// "Paid right now". Permanently false for credit sales, which
    /// finalize as pending instead.
    pub satisfied: bool,
    pub overpaid: bool,
}

// =============================================================================
// Checkout
// =============================================================================

/// The state of one in-progress checkout.
///
/// Owned by exactly one session; the caller serializes mutations. All
/// derived values are recomputed from these fields on demand.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Checkout {
    cart: Cart,
    discount: Option<Discount>,
    tender: Option<Tender>,
    receipt_kind: ReceiptKind,
}

impl Checkout {
    /// Creates an empty checkout.
    pub fn new() -> Self {
        Checkout::default()
    }

    /// Creates a checkout over an existing cart (e.g. pulled from the
    /// external cart service).
    pub fn with_cart(cart: Cart) -> Self {
        Checkout {
            cart,
            ..Checkout::default()
        }
    }

    // -------------------------------------------------------------------------
    // Cart operations
    // -------------------------------------------------------------------------

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn add_product(&mut self, product: &Product, quantity: i64) -> CheckoutResult<()> {
        self.cart.add_product(product, quantity)
    }

    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CheckoutResult<()> {
        self.cart.update_quantity(product_id, quantity)
    }

    pub fn remove_item(&mut self, product_id: &str) -> CheckoutResult<()> {
        self.cart.remove_item(product_id)
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    // -------------------------------------------------------------------------
    // Discount operations
    // -------------------------------------------------------------------------

    pub fn discount(&self) -> Option<&Discount> {
        self.discount.as_ref()
    }

    /// Applies a discount, replacing any previously active one.
    /// Discounts never stack.
    pub fn apply_discount(&mut self, discount: Discount) {
        self.discount = Some(discount);
    }

    /// Clears the active discount.
    pub fn clear_discount(&mut self) {
        self.discount = None;
    }

    // -------------------------------------------------------------------------
    // Tender operations
    // -------------------------------------------------------------------------

    pub fn tender(&self) -> Option<&Tender> {
        self.tender.as_ref()
    }

    /// Selects the payment method, replacing the previous tender wholesale.
    ///
    /// Because the tender is a tagged union, switching methods drops every
    /// method-specific field of the old one; only the totals carry over.
    pub fn select_tender(&mut self, tender: Tender) {
        self.tender = Some(tender);
    }

    /// Clears the selected payment method.
    pub fn clear_tender(&mut self) {
        self.tender = None;
    }

    pub fn receipt_kind(&self) -> ReceiptKind {
        self.receipt_kind
    }

    pub fn set_receipt_kind(&mut self, kind: ReceiptKind) {
        self.receipt_kind = kind;
    }

    // -------------------------------------------------------------------------
    // Mixed-payment leg operations
    // -------------------------------------------------------------------------

    /// Adds a leg to the selected mixed tender.
    pub fn add_leg(&mut self, leg: PaymentLeg) -> CheckoutResult<()> {
        let total = self.totals().total;
        match &mut self.tender {
            Some(Tender::Mixed(mixed)) => mixed.add_leg(leg, total),
            _ => Err(CheckoutError::TenderNotMixed),
        }
    }

    /// Removes a leg from the selected mixed tender.
    pub fn remove_leg(&mut self, index: usize) -> CheckoutResult<PaymentLeg> {
        match &mut self.tender {
            Some(Tender::Mixed(mixed)) => mixed.remove_leg(index),
            _ => Err(CheckoutError::TenderNotMixed),
        }
    }

    /// Updates the amount of a leg on the selected mixed tender.
    pub fn set_leg_amount(&mut self, index: usize, amount: Money) -> CheckoutResult<()> {
        match &mut self.tender {
            Some(Tender::Mixed(mixed)) => mixed.set_leg_amount(index, amount),
            _ => Err(CheckoutError::TenderNotMixed),
        }
    }

    /// Replaces the method detail of a leg on the selected mixed tender.
    pub fn set_leg_detail(&mut self, index: usize, detail: TenderDetail) -> CheckoutResult<()> {
        match &mut self.tender {
            Some(Tender::Mixed(mixed)) => mixed.set_leg_detail(index, detail),
            _ => Err(CheckoutError::TenderNotMixed),
        }
    }

    // -------------------------------------------------------------------------
    // Derived state
    // -------------------------------------------------------------------------

    /// Recomputes every displayed figure from current state.
    pub fn totals(&self) -> CheckoutTotals {
        let subtotal = self.cart.subtotal();
        let discount_amount = self
            .discount
            .as_ref()
            .map(|d| d.amount_off(subtotal))
            .unwrap_or_default();
        let total = subtotal.saturating_sub(discount_amount);

        match &self.tender {
            Some(tender) => {
                let recon = tender.reconcile(total);
                CheckoutTotals {
                    subtotal,
                    discount_amount,
                    total,
                    tendered: recon.tendered,
                    change: recon.change,
                    remaining: recon.remaining,
                    satisfied: recon.satisfied,
                    overpaid: recon.overpaid,
                }
            }
            None => CheckoutTotals {
                subtotal,
                discount_amount,
                total,
                tendered: Money::zero(),
                change: Money::zero(),
                remaining: total,
                satisfied: false,
                overpaid: false,
            },
        }
    }

    // -------------------------------------------------------------------------
    // Finalize
    // -------------------------------------------------------------------------

    /// Validates the checkout and produces the order summary.
    ///
    /// ## Validation Order
    /// 1. Cart non-empty
    /// 2. A tender is selected and method-complete
    /// 3. Payment sufficiency (credit sales are exempt; they finalize
    ///    with status `PendingCredit` and a due date instead)
    ///
    /// Returns the first failing condition. The checkout itself is not
    /// modified: on error the cashier fixes the input and calls again;
    /// on success the caller submits the summary and only then discards
    /// this state.
    ///
    /// `issued_at` is stamped by the caller so that this function stays
    /// a pure function of its inputs.
    pub fn attempt_finalize(&self, issued_at: DateTime<Utc>) -> CheckoutResult<OrderSummary> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let tender = self.tender.as_ref().ok_or(CheckoutError::NoTenderSelected)?;
        tender.check_complete()?;

        let totals = self.totals();
        let is_credit = tender.kind() == PaymentMethodKind::Credit;
        if !is_credit && !totals.satisfied {
            return Err(CheckoutError::InsufficientPayment {
                total: totals.total,
                tendered: totals.tendered,
            });
        }

        let recon = tender.reconcile(totals.total);
        let lines: Vec<LineItem> = self.cart.lines().to_vec();

        Ok(OrderSummary::build(
            lines,
            totals.subtotal,
            self.discount.as_ref(),
            totals.discount_amount,
            totals.total,
            tender,
            recon,
            issued_at,
            self.receipt_kind,
        ))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
