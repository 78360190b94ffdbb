//! # karma-core: Pure Checkout Ledger for Karma POS
//!
//! This crate is the **heart** of Karma POS. It contains the whole
//! checkout computation as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Karma POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (browser)                           │   │
//! │  │    Product UI ──► Cart UI ──► Payment UI ──► Receipt UI        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  karma-register (sessions)                      │   │
//! │  │    begin checkout, apply discount, tender, finalize+submit     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ karma-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌────────┐ │   │
//! │  │   │  money  │ │  cart   │ │ discount │ │ payment │ │checkout│ │   │
//! │  │   │  Money  │ │LineItem │ │ Discount │ │ Tender  │ │Checkout│ │   │
//! │  │   │         │ │  Cart   │ │          │ │  legs   │ │summary │ │   │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └─────────┘ └────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            External cart/catalog/sales REST API                 │   │
//! │  │     persistence, pricing authority, inventory decrement         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Line items and the cart aggregator
//! - [`discount`] - Percentage and fixed-amount discounts
//! - [`payment`] - Tender details, mixed-payment legs, reconciliation
//! - [`checkout`] - The checkout aggregate and finalize gate
//! - [`summary`] - The immutable order summary handed to the sales API
//! - [`error`] - Ledger error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use karma_core::cart::{Cart, LineItem};
//! use karma_core::checkout::Checkout;
//! use karma_core::discount::Discount;
//! use karma_core::money::Money;
//! use karma_core::payment::{Tender, TenderDetail};
//!
//! let cart = Cart::from_lines(vec![LineItem {
//!     product_id: "p-1".to_string(),
//!     name: "Coffee".to_string(),
//!     unit_price: Money::from_cents(1000),
//!     quantity: 2,
//! }]).unwrap();
//!
//! let mut checkout = Checkout::with_cart(cart);
//! checkout.apply_discount(Discount::percentage("TEN", 1000).unwrap());
//! checkout.select_tender(Tender::Single(TenderDetail::Cash {
//!     tendered: Money::from_cents(2000),
//! }));
//!
//! let summary = checkout.attempt_finalize(Utc::now()).unwrap();
//! assert_eq!(summary.total, Money::from_cents(1800));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod discount;
pub mod error;
pub mod money;
pub mod payment;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use karma_core::Money` instead of
// `use karma_core::money::Money`

pub use cart::{Cart, LineItem};
pub use checkout::{Checkout, CheckoutTotals};
pub use discount::{Discount, DiscountKind};
pub use error::{CheckoutError, CheckoutResult, ValidationError};
pub use money::Money;
pub use payment::{MixedTender, PaymentLeg, Reconciliation, Tender, TenderDetail};
pub use summary::{AppliedDiscount, LegSummary, OrderSummary, PaymentSummary};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum items allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single item in cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Default credit term for credit sales, in days.
///
/// Store policy; the register configuration can override it per sale.
pub const DEFAULT_CREDIT_TERM_DAYS: u32 = 30;
