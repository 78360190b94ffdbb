//! # Sales Endpoints
//!
//! Submission of finalized orders and the sales history view.
//!
//! ## Submission Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /sales with an OrderSummary                                       │
//! │       │                                                                 │
//! │       ├── 2xx → RecordedSale { id, recordedAt }                        │
//! │       │         The service has persisted the sale and decremented     │
//! │       │         inventory. Only now may the caller clear the cart.     │
//! │       │                                                                 │
//! │       └── error → nothing happened on our side; the checkout state     │
//! │                   must stay untouched so the caller can retry.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This client performs exactly one attempt per call. Retrying is the
//! session layer's decision.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::client::HttpClient;
use crate::error::{ApiError, ApiResult};
use karma_core::{
    AppliedDiscount, LineItem, Money, OrderSummary, PaymentMethodKind, PaymentStatus,
    PaymentSummary,
};

// =============================================================================
// Wire Types
// =============================================================================

/// Acknowledgment returned by the sales service for a recorded sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedSale {
    /// Server-assigned sale id (folio).
    pub id: String,
    pub recorded_at: DateTime<Utc>,
}

/// Filters for the sales history listing.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use karma_api::SalesQuery;
///
/// let query = SalesQuery::default()
///     .from(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
///     .limit(50);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SalesQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<u32>,
}

impl SalesQuery {
    pub fn from(mut self, date: NaiveDate) -> Self {
        self.from = Some(date);
        self
    }

    pub fn to(mut self, date: NaiveDate) -> Self {
        self.to = Some(date);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(from) = self.from {
            params.push(("from", from.to_string()));
        }
        if let Some(to) = self.to {
            params.push(("to", to.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

/// One row in the sales history listing, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: String,
    pub issued_at: DateTime<Utc>,
    pub total: Money,
    pub method: PaymentMethodKind,
    pub status: PaymentStatus,
}

/// Full detail of one recorded sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetail {
    pub id: String,
    pub issued_at: DateTime<Utc>,
    pub lines: Vec<LineItem>,
    pub subtotal: Money,
    pub discount: Option<AppliedDiscount>,
    pub total: Money,
    pub payment: PaymentSummary,
    pub status: PaymentStatus,
}

// =============================================================================
// Client
// =============================================================================

/// Client for the sales endpoints.
#[derive(Debug, Clone)]
pub struct SalesClient {
    http: HttpClient,
}

impl SalesClient {
    pub(crate) fn new(http: HttpClient) -> Self {
        SalesClient { http }
    }

    /// Submits a finalized order for recording.
    pub async fn submit(&self, order: &OrderSummary) -> ApiResult<RecordedSale> {
        debug!(order_id = %order.id, total = %order.total, "submit sale");
        let recorded: RecordedSale = self.http.post_json("/sales", order).await?;
        info!(order_id = %order.id, sale_id = %recorded.id, "sale recorded");
        Ok(recorded)
    }

    /// Lists recorded sales, newest first.
    pub async fn list(&self, query: &SalesQuery) -> ApiResult<Vec<SaleRecord>> {
        debug!(?query, "list sales");
        self.http
            .get_json_query("/sales", &query.to_params())
            .await
    }

    /// Fetches one recorded sale with its lines and payment breakdown.
    pub async fn get(&self, sale_id: &str) -> ApiResult<SaleDetail> {
        debug!(sale_id = %sale_id, "get sale");
        self.http
            .get_json(&format!("/sales/{}", sale_id))
            .await
            .map_err(|err| match err {
                ApiError::Status { status: 404, .. } => ApiError::not_found("Sale", sale_id),
                other => other,
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
