//! # Register Error Type
//!
//! Unified error type for session operations.
//!
//! ## Error Handling Strategy
//! Everything the ledger reports (`CheckoutError`) is recoverable at the
//! register: the cashier fixes the input and retries within the same
//! session. Backend failures (`ApiError`) leave the session state
//! untouched so a retry sees exactly what the failed attempt saw.

use serde::Serialize;
use thiserror::Error;

use karma_api::ApiError;
use karma_core::CheckoutError;

/// Errors surfaced by a checkout session or the history view.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// The ledger refused the operation (validation, completeness,
    /// sufficiency). The checkout state is unchanged.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// The external service call failed. The checkout state is
    /// unchanged; the caller decides whether to retry.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl RegisterError {
    /// Machine-readable code for the frontend.
    pub fn code(&self) -> ErrorCode {
        match self {
            RegisterError::Checkout(CheckoutError::EmptyCart) => ErrorCode::EmptyCart,
            RegisterError::Checkout(CheckoutError::InsufficientPayment { .. }) => {
                ErrorCode::InsufficientPayment
            }
            RegisterError::Checkout(
                CheckoutError::MissingReference { .. } | CheckoutError::MissingClientInfo,
            ) => ErrorCode::IncompletePayment,
            RegisterError::Checkout(_) => ErrorCode::CheckoutError,
            RegisterError::Api(ApiError::NotFound { .. }) => ErrorCode::NotFound,
            RegisterError::Api(_) => ErrorCode::ServiceError,
        }
    }
}

/// Error codes for the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Finalize attempted on an empty cart
    EmptyCart,

    /// Tendered amount below the total due
    InsufficientPayment,

    /// Method-specific field missing (reference, client info)
    IncompletePayment,

    /// Any other ledger refusal
    CheckoutError,

    /// Resource not found (product code, sale id)
    NotFound,

    /// External service failure
    ServiceError,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use karma_core::Money;

    #[test]
    fn test_error_codes() {
        let err = RegisterError::from(CheckoutError::EmptyCart);
        assert_eq!(err.code(), ErrorCode::EmptyCart);

        let err = RegisterError::from(CheckoutError::InsufficientPayment {
            total: Money::from_cents(100),
            tendered: Money::zero(),
        });
        assert_eq!(err.code(), ErrorCode::InsufficientPayment);

        let err = RegisterError::from(ApiError::not_found("Product", "GHOST"));
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[test]
    fn test_messages_pass_through() {
        let err = RegisterError::from(CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Cart is empty");
    }
}
