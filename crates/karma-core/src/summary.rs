//! # Order Summary Module
//!
//! The immutable record produced by a successful finalize.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Checkout::attempt_finalize                                             │
//! │       │  (validates: cart, method completeness, sufficiency)           │
//! │       ▼                                                                 │
//! │  OrderSummary  ── handed to the caller ──►  external sales API         │
//! │                                                                         │
//! │  This module performs no I/O. Submitting the summary, retrying on      │
//! │  failure and clearing the cart on acknowledgment are the caller's      │
//! │  responsibility; the summary itself never changes after it is built.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::LineItem;
use crate::discount::Discount;
use crate::money::Money;
use crate::payment::{Reconciliation, Tender, TenderDetail};
use crate::types::{MobileApp, PaymentMethodKind, PaymentStatus, ReceiptKind};

// =============================================================================
// Applied Discount
// =============================================================================

/// The discount actually taken, frozen at finalize time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AppliedDiscount {
    pub code: String,
    pub amount: Money,
}

// =============================================================================
// Payment Summary
// =============================================================================

/// One leg on the receipt of a mixed payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LegSummary {
    pub method: PaymentMethodKind,
    pub amount: Money,
    pub reference: Option<String>,
}

/// How the order was paid, frozen for the receipt and the sales record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentSummary {
    Cash {
        tendered: Money,
        change: Money,
    },
    Card {
        last4: Option<String>,
        reference: String,
    },
    BankTransfer {
        reference: String,
    },
    MobilePayment {
        app: MobileApp,
        reference: String,
    },
    Credit {
        client_name: String,
        client_id: String,
        #[ts(as = "String")]
        due_date: NaiveDate,
    },
    Mixed {
        legs: Vec<LegSummary>,
        tendered: Money,
    },
}

impl PaymentSummary {
    pub fn method(&self) -> PaymentMethodKind {
        match self {
            PaymentSummary::Cash { .. } => PaymentMethodKind::Cash,
            PaymentSummary::Card { .. } => PaymentMethodKind::Card,
            PaymentSummary::BankTransfer { .. } => PaymentMethodKind::BankTransfer,
            PaymentSummary::MobilePayment { .. } => PaymentMethodKind::MobilePayment,
            PaymentSummary::Credit { .. } => PaymentMethodKind::Credit,
            PaymentSummary::Mixed { .. } => PaymentMethodKind::Mixed,
        }
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// Immutable snapshot of a finalized checkout, ready for submission to
/// the external sales-recording service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderSummary {
    /// Client-generated order id (UUID v4).
    pub id: String,

    /// Client-visible timestamp, stamped by the caller at finalize.
    #[ts(as = "String")]
    pub issued_at: DateTime<Utc>,

    /// Line items in cart order.
    pub lines: Vec<LineItem>,

    pub subtotal: Money,
    pub discount: Option<AppliedDiscount>,
    pub total: Money,

    pub payment: PaymentSummary,
    pub status: PaymentStatus,
    pub receipt_kind: ReceiptKind,
}

impl OrderSummary {
    /// Assembles the summary from validated checkout parts.
    ///
    /// Only [`crate::checkout::Checkout::attempt_finalize`] calls this,
    /// after every gate has passed.
    pub(crate) fn build(
        lines: Vec<LineItem>,
        subtotal: Money,
        discount: Option<&Discount>,
        discount_amount: Money,
        total: Money,
        tender: &Tender,
        reconciliation: Reconciliation,
        issued_at: DateTime<Utc>,
        receipt_kind: ReceiptKind,
    ) -> Self {
        let payment = match tender {
            Tender::Single(TenderDetail::Cash { tendered }) => PaymentSummary::Cash {
                tendered: *tendered,
                change: reconciliation.change,
            },
            Tender::Single(TenderDetail::Card { last4, reference }) => PaymentSummary::Card {
                last4: last4.clone(),
                reference: reference.clone(),
            },
            Tender::Single(TenderDetail::BankTransfer { reference }) => {
                PaymentSummary::BankTransfer {
                    reference: reference.clone(),
                }
            }
            Tender::Single(TenderDetail::MobilePayment { app, reference }) => {
                PaymentSummary::MobilePayment {
                    app: *app,
                    reference: reference.clone(),
                }
            }
            Tender::Single(TenderDetail::Credit {
                client_name,
                client_id,
                due_in_days,
            }) => PaymentSummary::Credit {
                client_name: client_name.clone(),
                client_id: client_id.clone(),
                due_date: due_date_from(issued_at, *due_in_days),
            },
            Tender::Mixed(mixed) => PaymentSummary::Mixed {
                legs: mixed
                    .legs()
                    .iter()
                    .map(|leg| LegSummary {
                        method: leg.detail.kind(),
                        amount: leg.amount,
                        reference: leg.detail.reference().map(String::from),
                    })
                    .collect(),
                tendered: reconciliation.tendered,
            },
        };

        let status = match tender.kind() {
            PaymentMethodKind::Credit => PaymentStatus::PendingCredit,
            _ => PaymentStatus::Paid,
        };

        OrderSummary {
            id: Uuid::new_v4().to_string(),
            issued_at,
            lines,
            subtotal,
            discount: discount.map(|d| AppliedDiscount {
                code: d.code.clone(),
                amount: discount_amount,
            }),
            total,
            payment,
            status,
            receipt_kind,
        }
    }
}

/// Due date for a credit sale: the calendar date `days` after issue.
fn due_date_from(issued_at: DateTime<Utc>, days: u32) -> NaiveDate {
    issued_at.date_naive() + Days::new(days as u64)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_due_date_default_term() {
        let issued = Utc.with_ymd_and_hms(2025, 3, 15, 12, 30, 0).unwrap();
        let due = due_date_from(issued, 30);
        assert_eq!(due, NaiveDate::from_ymd_opt(2025, 4, 14).unwrap());
    }

    #[test]
    fn test_due_date_crosses_year() {
        let issued = Utc.with_ymd_and_hms(2025, 12, 20, 8, 0, 0).unwrap();
        let due = due_date_from(issued, 30);
        assert_eq!(due, NaiveDate::from_ymd_opt(2026, 1, 19).unwrap());
    }

    #[test]
    fn test_payment_summary_method() {
        let summary = PaymentSummary::Mixed {
            legs: vec![],
            tendered: Money::zero(),
        };
        assert_eq!(summary.method(), PaymentMethodKind::Mixed);
    }
}
