//! # Error Types
//!
//! Ledger-specific error types for karma-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  karma-core errors (this file)                                         │
//! │  ├── CheckoutError    - Checkout/reconciliation failures               │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  karma-api errors (separate crate)                                     │
//! │  └── ApiError         - External service call failures                 │
//! │                                                                         │
//! │  karma-register errors (separate crate)                                │
//! │  └── RegisterError    - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CheckoutError → RegisterError → Frontend      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (amounts, method, etc.)
//! 3. Errors are enum variants, never String
//! 4. Every variant is recoverable by the cashier: fix the input and retry
//!    within the same checkout session

use thiserror::Error;

use crate::money::Money;
use crate::types::PaymentMethodKind;

// =============================================================================
// Checkout Error
// =============================================================================

/// Checkout and payment reconciliation errors.
///
/// These errors represent business rule violations inside a checkout
/// session. They are surfaced as structured results and never crash
/// the session; the caller re-prompts and tries again.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Finalize was attempted with zero line items.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart has exceeded maximum allowed items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Cart operation referenced a product that is not in the cart.
    #[error("Product not in cart: {product_id}")]
    ItemNotInCart { product_id: String },

    /// A monetary value is negative or malformed.
    ///
    /// Rejected at the boundary, never silently clamped (discount
    /// clamping is the one documented exception and happens on valid
    /// amounts only).
    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    /// Finalize was attempted before any payment method was chosen.
    #[error("No payment method selected")]
    NoTenderSelected,

    /// A method that settles through an external rail has no
    /// authorization reference.
    ///
    /// ## When This Occurs
    /// - Card, bank transfer or mobile payment finalized with an empty
    ///   reference field
    /// - A mixed-payment leg of one of those methods missing its reference
    #[error("{kind} payment requires an authorization reference")]
    MissingReference { kind: PaymentMethodKind },

    /// A credit sale is missing the client's name or document id.
    #[error("Credit sales require the client's name and document id")]
    MissingClientInfo,

    /// Tendered amount is below the total due.
    ///
    /// ## When This Occurs
    /// - Cash tendered below the total at finalize time
    /// - Mixed-payment legs summing below the total at finalize time
    #[error("Insufficient payment: {tendered} tendered of {total} due")]
    InsufficientPayment { total: Money, tendered: Money },

    /// A leg cannot be added because the total is already covered.
    /// Remove or shrink another leg first.
    #[error("Payment is already covered; remove or shrink a leg first")]
    NothingOutstanding,

    /// A mixed payment keeps at least one leg while in mixed mode;
    /// switching away from mixed is a separate transition.
    #[error("A mixed payment must keep at least one leg")]
    LastLegKept,

    /// A leg index was out of bounds.
    #[error("No payment leg at index {index}")]
    LegNotFound { index: usize },

    /// A leg operation was attempted while the selected tender is not mixed.
    #[error("Selected payment method is not a mixed payment")]
    TenderNotMixed,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before checkout logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., card digits, discount code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CheckoutError.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
