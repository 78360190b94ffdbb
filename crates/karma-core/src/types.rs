//! # Domain Types
//!
//! Core domain types used throughout Karma POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │    Product      │   │PaymentMethodKind │   │  PaymentStatus  │      │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────  │      │
//! │  │  id             │   │  Cash            │   │  Paid           │      │
//! │  │  code (SKU)     │   │  Card            │   │  PendingCredit  │      │
//! │  │  name           │   │  BankTransfer    │   └─────────────────┘      │
//! │  │  unit_price     │   │  MobilePayment   │                            │
//! │  └─────────────────┘   │  Credit          │   ┌─────────────────┐      │
//! │                        │  Mixed           │   │   ReceiptKind   │      │
//! │                        └──────────────────┘   │  Ticket/Invoice │      │
//! │                                               └─────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The detail fields each payment method carries live in [`crate::payment`]
//! as a tagged union; the kinds here are the plain discriminants used for
//! display, serialization and error reporting.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Payment Method Kind
// =============================================================================

/// The payment methods accepted at the register.
///
/// `Mixed` combines two or more of the other methods; a mixed payment's
/// legs can be any kind except `Mixed` itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodKind {
    /// Physical cash handed over at the register.
    Cash,
    /// Credit/debit card on an external terminal.
    Card,
    /// Transfer to the store's bank account.
    BankTransfer,
    /// CoDi and similar mobile payment applications.
    MobilePayment,
    /// Deferred payment against the client's account.
    Credit,
    /// Two or more methods combined.
    Mixed,
}

/// Human-readable method names for receipts and error messages.
impl fmt::Display for PaymentMethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentMethodKind::Cash => "Cash",
            PaymentMethodKind::Card => "Card",
            PaymentMethodKind::BankTransfer => "Bank transfer",
            PaymentMethodKind::MobilePayment => "Mobile payment",
            PaymentMethodKind::Credit => "Credit",
            PaymentMethodKind::Mixed => "Mixed",
        };
        write!(f, "{}", name)
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// The settlement status stamped on a finalized order.
///
/// `PendingCredit` is a distinct accepted outcome, not a failed `Paid`:
/// a credit sale finalizes with nothing tendered and a due date instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Fully settled at the register.
    Paid,
    /// Credit sale awaiting settlement by the due date.
    PendingCredit,
}

// =============================================================================
// Receipt Kind
// =============================================================================

/// Which proof-of-purchase document the customer asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptKind {
    /// Plain register ticket.
    Ticket,
    /// Fiscal invoice.
    Invoice,
    /// Customer declined a document.
    NoReceipt,
}

impl Default for ReceiptKind {
    fn default() -> Self {
        ReceiptKind::Ticket
    }
}

// =============================================================================
// Mobile Payment Application
// =============================================================================

/// The application used for a mobile payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MobileApp {
    CoDi,
    MercadoPago,
    Clip,
    PayPal,
    Other,
}

impl Default for MobileApp {
    fn default() -> Self {
        MobileApp::Other
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product as served by the external catalog service.
///
/// The ledger never mutates products; it snapshots `name` and price into
/// a [`crate::cart::LineItem`] at add-to-cart time so the checkout keeps
/// displaying consistent data even if the catalog changes mid-session.
/// Inventory tracking and pricing authority stay with the external service.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier assigned by the catalog service.
    pub id: String,

    /// Product code / SKU - business identifier used for scan-to-add.
    pub code: String,

    /// Barcode (EAN-13, UPC-A, etc.), when the product carries one.
    pub barcode: Option<String>,

    /// Display name shown to the cashier and on the receipt.
    pub name: String,

    /// Optional description for product details.
    pub description: Option<String>,

    /// Price in cents (smallest currency unit).
    pub unit_price_cents: i64,

    /// Stock level reported by the catalog service (display only).
    pub stock: Option<i64>,

    /// Whether the product is currently sellable.
    pub is_active: bool,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
