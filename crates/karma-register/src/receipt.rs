//! # Receipt Assembly
//!
//! Builds the frontend-facing receipt payload from a recorded order and
//! the store configuration. Pure transform, no I/O.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::RegisterConfig;
use karma_core::{AppliedDiscount, Money, OrderSummary, PaymentStatus, PaymentSummary, ReceiptKind};

// =============================================================================
// Receipt Types
// =============================================================================

/// One product row on the receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

/// One payment row on the receipt. A single-method sale has exactly one
/// row; a mixed sale has one row per leg, in tender order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptPayment {
    pub method: String,
    pub amount: Money,
    pub reference: Option<String>,
}

/// The complete proof-of-purchase document handed to the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub store_name: String,
    pub store_address: Vec<String>,

    /// Server-assigned sale id.
    pub folio: String,
    pub issued_at: DateTime<Utc>,

    pub lines: Vec<ReceiptLine>,
    pub subtotal: Money,
    pub discount: Option<AppliedDiscount>,
    pub total: Money,

    pub payments: Vec<ReceiptPayment>,
    pub change: Money,
    pub status: PaymentStatus,
    /// Present on credit sales only.
    pub due_date: Option<NaiveDate>,
    pub kind: ReceiptKind,
}

impl Receipt {
    /// Assembles a receipt from a recorded order.
    pub fn build(config: &RegisterConfig, order: &OrderSummary, folio: &str) -> Self {
        let lines = order
            .lines
            .iter()
            .map(|line| ReceiptLine {
                name: line.name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                line_total: line.line_total(),
            })
            .collect();

        let (payments, change, due_date) = payment_rows(order);

        Receipt {
            store_name: config.store_name.clone(),
            store_address: config.store_address.clone(),
            folio: folio.to_string(),
            issued_at: order.issued_at,
            lines,
            subtotal: order.subtotal,
            discount: order.discount.clone(),
            total: order.total,
            payments,
            change,
            status: order.status,
            due_date,
            kind: order.receipt_kind,
        }
    }
}

/// Flattens the payment summary into display rows.
fn payment_rows(order: &OrderSummary) -> (Vec<ReceiptPayment>, Money, Option<NaiveDate>) {
    match &order.payment {
        PaymentSummary::Cash { change, .. } => (
            vec![ReceiptPayment {
                method: "Cash".to_string(),
                amount: order.total,
                reference: None,
            }],
            *change,
            None,
        ),
        PaymentSummary::Card { last4, reference } => {
            let method = match last4 {
                Some(digits) => format!("Card •••• {}", digits),
                None => "Card".to_string(),
            };
            (
                vec![ReceiptPayment {
                    method,
                    amount: order.total,
                    reference: Some(reference.clone()),
                }],
                Money::zero(),
                None,
            )
        }
        PaymentSummary::BankTransfer { reference } => (
            vec![ReceiptPayment {
                method: "Bank transfer".to_string(),
                amount: order.total,
                reference: Some(reference.clone()),
            }],
            Money::zero(),
            None,
        ),
        PaymentSummary::MobilePayment { reference, .. } => (
            vec![ReceiptPayment {
                method: "Mobile payment".to_string(),
                amount: order.total,
                reference: Some(reference.clone()),
            }],
            Money::zero(),
            None,
        ),
        PaymentSummary::Credit { due_date, .. } => (
            vec![ReceiptPayment {
                method: "Credit".to_string(),
                amount: order.total,
                reference: None,
            }],
            Money::zero(),
            Some(*due_date),
        ),
        PaymentSummary::Mixed { legs, .. } => (
            legs.iter()
                .map(|leg| ReceiptPayment {
                    method: leg.method.to_string(),
                    amount: leg.amount,
                    reference: leg.reference.clone(),
                })
                .collect(),
            Money::zero(),
            None,
        ),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use karma_core::{Checkout, Discount, PaymentLeg, Product, Tender, TenderDetail};

    fn product(id: &str, cents: i64) -> Product {
        Product {
            id: id.to_string(),
            code: format!("SKU-{}", id),
            barcode: None,
            name: format!("Product {}", id),
            description: None,
            unit_price_cents: cents,
            stock: None,
            is_active: true,
        }
    }

    fn issued() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 17, 45, 0).unwrap()
    }

    #[test]
    fn test_cash_receipt() {
        let mut checkout = Checkout::new();
        checkout.add_product(&product("1", 1000), 2).unwrap();
        checkout.apply_discount(Discount::percentage("TEN", 1000).unwrap());
        checkout.select_tender(Tender::Single(TenderDetail::Cash {
            tendered: Money::from_cents(2000),
        }));

        let order = checkout.attempt_finalize(issued()).unwrap();
        let receipt = Receipt::build(&RegisterConfig::default(), &order, "V-1001");

        assert_eq!(receipt.folio, "V-1001");
        assert_eq!(receipt.store_name, "KARMA");
        assert_eq!(receipt.subtotal, Money::from_cents(2000));
        assert_eq!(receipt.total, Money::from_cents(1800));
        assert_eq!(receipt.change, Money::from_cents(200));
        assert_eq!(receipt.payments.len(), 1);
        assert_eq!(receipt.payments[0].method, "Cash");
        assert!(receipt.due_date.is_none());
    }

    #[test]
    fn test_mixed_receipt_keeps_leg_order() {
        let mut checkout = Checkout::new();
        checkout.add_product(&product("1", 10_000), 1).unwrap();
        checkout.select_tender(Tender::Mixed(karma_core::MixedTender::new(
            PaymentLeg::cash(Money::from_cents(4000)),
        )));
        checkout
            .add_leg(PaymentLeg::new(
                TenderDetail::Card {
                    last4: None,
                    reference: "AX12".to_string(),
                },
                Money::from_cents(6000),
            ))
            .unwrap();

        let order = checkout.attempt_finalize(issued()).unwrap();
        let receipt = Receipt::build(&RegisterConfig::default(), &order, "V-1002");

        assert_eq!(receipt.payments.len(), 2);
        assert_eq!(receipt.payments[0].method, "Cash");
        assert_eq!(receipt.payments[0].amount, Money::from_cents(4000));
        assert_eq!(receipt.payments[1].method, "Card");
        assert_eq!(receipt.payments[1].reference.as_deref(), Some("AX12"));
    }

    #[test]
    fn test_credit_receipt_carries_due_date() {
        let mut checkout = Checkout::new();
        checkout.add_product(&product("1", 5000), 1).unwrap();
        checkout.select_tender(Tender::Single(TenderDetail::Credit {
            client_name: "Ana Gómez".to_string(),
            client_id: "CURP-123".to_string(),
            due_in_days: 30,
        }));

        let order = checkout.attempt_finalize(issued()).unwrap();
        let receipt = Receipt::build(&RegisterConfig::default(), &order, "V-1003");

        assert_eq!(receipt.status, PaymentStatus::PendingCredit);
        assert_eq!(
            receipt.due_date,
            NaiveDate::from_ymd_opt(2025, 7, 1)
        );
    }
}
