//! # Sales History
//!
//! Date-ranged listing of recorded sales with a per-method roll-up for
//! the history screen.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RegisterError;
use karma_api::{Backend, SaleDetail, SaleRecord, SalesQuery};
use karma_core::{Money, PaymentMethodKind, PaymentStatus};

// =============================================================================
// View Types
// =============================================================================

/// Totals for one payment method within the listed range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodTotal {
    pub method: PaymentMethodKind,
    pub count: usize,
    pub total: Money,
}

/// Roll-up shown above the history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub sale_count: usize,
    pub grand_total: Money,
    /// Per-method totals in first-seen order.
    pub by_method: Vec<MethodTotal>,
    /// Portion of the grand total still owed on credit.
    pub pending_credit_total: Money,
}

// =============================================================================
// Sales History
// =============================================================================

/// The sales history view over the external sales record.
#[derive(Debug, Clone)]
pub struct SalesHistory {
    backend: Backend,
}

impl SalesHistory {
    pub fn new(backend: Backend) -> Self {
        SalesHistory { backend }
    }

    /// Lists recorded sales, newest first.
    pub async fn list(&self, query: &SalesQuery) -> Result<Vec<SaleRecord>, RegisterError> {
        debug!(?query, "history list");
        Ok(self.backend.sales().list(query).await?)
    }

    /// Fetches one sale with lines and payment breakdown.
    pub async fn detail(&self, sale_id: &str) -> Result<SaleDetail, RegisterError> {
        Ok(self.backend.sales().get(sale_id).await?)
    }

    /// Lists and rolls the range up in one call.
    pub async fn summarize(&self, query: &SalesQuery) -> Result<HistorySummary, RegisterError> {
        let records = self.list(query).await?;
        Ok(summarize_records(&records))
    }
}

/// Folds history rows into the roll-up. Pure function, order-stable.
pub fn summarize_records(records: &[SaleRecord]) -> HistorySummary {
    let mut by_method: Vec<MethodTotal> = Vec::new();
    let mut grand_total = Money::zero();
    let mut pending_credit_total = Money::zero();

    for record in records {
        grand_total += record.total;
        if record.status == PaymentStatus::PendingCredit {
            pending_credit_total += record.total;
        }

        match by_method.iter_mut().find(|m| m.method == record.method) {
            Some(entry) => {
                entry.count += 1;
                entry.total += record.total;
            }
            None => by_method.push(MethodTotal {
                method: record.method,
                count: 1,
                total: record.total,
            }),
        }
    }

    HistorySummary {
        sale_count: records.len(),
        grand_total,
        by_method,
        pending_credit_total,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
