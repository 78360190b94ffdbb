//! # Checkout Session
//!
//! One session per customer: pull the cart in, run the tender loop,
//! finalize, submit, clear.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Session Protocol                            │
//! │                                                                         │
//! │  begin() ──► GET /cart ──► ledger loaded                               │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  tender loop: discounts, method selection, mixed legs                  │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  finalize_and_submit()                                                 │
//! │     │                                                                   │
//! │     ├── attempt_finalize fails ──► state untouched, cashier retries    │
//! │     │                                                                   │
//! │     ├── POST /sales fails ──────► state untouched, caller may retry    │
//! │     │                             (never "paid but not recorded")      │
//! │     │                                                                   │
//! │     └── sale recorded ──► DELETE /cart ──► fresh ledger                │
//! │                             │                                           │
//! │                             └── clear fails ──► sale stands,           │
//! │                                 cart_cleared = false, caller           │
//! │                                 re-issues clear_remote_cart()          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering Guarantee
//! The session owns its `Checkout` exclusively; callers serialize
//! mutations. Nothing here retries on its own, and the external cart is
//! cleared strictly after the sale is recorded.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::RegisterConfig;
use crate::error::RegisterError;
use crate::receipt::Receipt;
use karma_api::Backend;
use karma_core::validation::validate_product_code;
use karma_core::{
    Cart, Checkout, CheckoutError, CheckoutTotals, Discount, Money, PaymentLeg, Product, ReceiptKind,
    Tender, TenderDetail,
};

// =============================================================================
// Completed Sale
// =============================================================================

/// The outcome of a successful `finalize_and_submit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedSale {
    /// Server-assigned sale id.
    pub sale_id: String,

    /// The printable receipt.
    pub receipt: Receipt,

    /// False when the sale was recorded but the remote cart could not be
    /// emptied; the caller re-issues [`CheckoutSession::clear_remote_cart`].
    pub cart_cleared: bool,
}

// =============================================================================
// Checkout Session
// =============================================================================

/// One in-progress checkout, bound to the external backend.
#[derive(Debug)]
pub struct CheckoutSession {
    backend: Backend,
    config: RegisterConfig,
    checkout: Checkout,
}

impl CheckoutSession {
    /// Starts a session by pulling the current cart from the backend.
    ///
    /// An empty cart loads fine; finalize still refuses it.
    pub async fn begin(backend: Backend, config: RegisterConfig) -> Result<Self, RegisterError> {
        let remote_lines = backend.cart().fetch().await?;
        debug!(lines = remote_lines.len(), "cart pulled");

        let lines = remote_lines.iter().map(|l| l.to_line_item()).collect();
        let cart = Cart::from_lines(lines)?;

        Ok(CheckoutSession {
            backend,
            config,
            checkout: Checkout::with_cart(cart),
        })
    }

    /// Read access to the underlying checkout.
    pub fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    /// The current figures for the tender screen.
    pub fn totals(&self) -> CheckoutTotals {
        self.checkout.totals()
    }

    // -------------------------------------------------------------------------
    // Cart mutations
    // -------------------------------------------------------------------------

    /// Scan-to-add: looks the code up in the catalog, records the line on
    /// the server cart, then mirrors it into the ledger.
    pub async fn add_code(&mut self, code: &str, quantity: i64) -> Result<Product, RegisterError> {
        validate_product_code(code).map_err(CheckoutError::from)?;

        let product = self.backend.catalog().find_by_code(code).await?;
        self.backend.cart().add_item(&product.id, quantity).await?;
        self.checkout.add_product(&product, quantity)?;

        info!(code = %code, product_id = %product.id, quantity = %quantity, "added to cart");
        Ok(product)
    }

    /// Changes a line's quantity in the ledger (0 removes the line).
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> Result<(), RegisterError> {
        Ok(self.checkout.update_quantity(product_id, quantity)?)
    }

    /// Removes a line from the ledger.
    pub fn remove_item(&mut self, product_id: &str) -> Result<(), RegisterError> {
        Ok(self.checkout.remove_item(product_id)?)
    }

    // -------------------------------------------------------------------------
    // Discount and tender
    // -------------------------------------------------------------------------

    pub fn apply_discount(&mut self, discount: Discount) {
        self.checkout.apply_discount(discount);
    }

    pub fn clear_discount(&mut self) {
        self.checkout.clear_discount();
    }

    pub fn select_tender(&mut self, tender: Tender) {
        self.checkout.select_tender(tender);
    }

    /// Selects a credit tender with the configured store term.
    pub fn select_credit(&mut self, client_name: &str, client_id: &str) {
        self.checkout.select_tender(Tender::Single(TenderDetail::Credit {
            client_name: client_name.to_string(),
            client_id: client_id.to_string(),
            due_in_days: self.config.credit_term_days,
        }));
    }

    pub fn clear_tender(&mut self) {
        self.checkout.clear_tender();
    }

    pub fn set_receipt_kind(&mut self, kind: ReceiptKind) {
        self.checkout.set_receipt_kind(kind);
    }

    pub fn add_leg(&mut self, leg: PaymentLeg) -> Result<(), RegisterError> {
        Ok(self.checkout.add_leg(leg)?)
    }

    pub fn remove_leg(&mut self, index: usize) -> Result<(), RegisterError> {
        self.checkout.remove_leg(index)?;
        Ok(())
    }

    pub fn set_leg_amount(&mut self, index: usize, amount: Money) -> Result<(), RegisterError> {
        Ok(self.checkout.set_leg_amount(index, amount)?)
    }

    pub fn set_leg_detail(&mut self, index: usize, detail: TenderDetail) -> Result<(), RegisterError> {
        Ok(self.checkout.set_leg_detail(index, detail)?)
    }

    // -------------------------------------------------------------------------
    // Finalize
    // -------------------------------------------------------------------------

    /// Finalizes the checkout, records the sale, clears the cart.
    ///
    /// The steps are strictly ordered; a failure at any step leaves the
    /// checkout exactly as it was:
    /// 1. the ledger validates and produces the order summary
    /// 2. the sale is submitted to the external service
    /// 3. only on a recorded sale: the remote cart is emptied and the
    ///    session resets for the next customer
    pub async fn finalize_and_submit(&mut self) -> Result<CompletedSale, RegisterError> {
        let order = self.checkout.attempt_finalize(Utc::now())?;
        debug!(order_id = %order.id, total = %order.total, "order finalized");

        let recorded = self.backend.sales().submit(&order).await?;

        // The sale now exists on the server; from here the session moves
        // on regardless of how the cart cleanup goes.
        let cart_cleared = match self.backend.cart().clear().await {
            Ok(()) => true,
            Err(err) => {
                warn!(sale_id = %recorded.id, error = %err, "sale recorded but cart clear failed");
                false
            }
        };

        let receipt = Receipt::build(&self.config, &order, &recorded.id);
        self.checkout = Checkout::new();

        info!(sale_id = %recorded.id, cart_cleared, "checkout completed");
        Ok(CompletedSale {
            sale_id: recorded.id,
            receipt,
            cart_cleared,
        })
    }

    /// Re-issues the remote cart clear after a `cart_cleared = false`
    /// completion.
    pub async fn clear_remote_cart(&self) -> Result<(), RegisterError> {
        Ok(self.backend.cart().clear().await?)
    }

    /// Abandons the checkout. Nothing was persisted, so dropping the
    /// state is the whole cancellation.
    pub fn cancel(self) {
        debug!("checkout cancelled");
    }
}
