//! # Cart Endpoints
//!
//! The cart lives on the server so that every register screen renders
//! the same lines. This client reads and mutates it; the checkout ledger
//! snapshots its contents at checkout time via [`CartLine::to_line_item`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::client::HttpClient;
use crate::error::{ApiError, ApiResult};
use karma_core::{LineItem, Product};

// =============================================================================
// Wire Types
// =============================================================================

/// One cart entry as served by the cart service: the stored quantity
/// joined with its product record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Server-assigned id of the cart entry.
    pub id: String,
    pub product: Product,
    pub quantity: i64,
}

impl CartLine {
    /// Snapshots this entry into a ledger line item, freezing the
    /// product name and price as displayed to the customer.
    pub fn to_line_item(&self) -> LineItem {
        LineItem {
            product_id: self.product.id.clone(),
            name: self.product.name.clone(),
            unit_price: self.product.unit_price(),
            quantity: self.quantity,
        }
    }
}

/// Request body for adding a product to the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddCartItem {
    product_id: String,
    quantity: i64,
}

// =============================================================================
// Client
// =============================================================================

/// Client for the cart endpoints.
#[derive(Debug, Clone)]
pub struct CartClient {
    http: HttpClient,
}

impl CartClient {
    pub(crate) fn new(http: HttpClient) -> Self {
        CartClient { http }
    }

    /// Fetches the current cart contents.
    pub async fn fetch(&self) -> ApiResult<Vec<CartLine>> {
        debug!("fetch cart");
        self.http.get_json("/cart").await
    }

    /// Adds a product to the cart (the service merges quantities when
    /// the product is already present).
    pub async fn add_item(&self, product_id: &str, quantity: i64) -> ApiResult<CartLine> {
        debug!(product_id = %product_id, quantity = %quantity, "add_item");
        let body = AddCartItem {
            product_id: product_id.to_string(),
            quantity,
        };
        self.http
            .post_json("/cart/items", &body)
            .await
            .map_err(|err| match err {
                ApiError::Status { status: 404, .. } => ApiError::not_found("Product", product_id),
                other => other,
            })
    }

    /// Removes one cart entry.
    pub async fn remove_line(&self, line_id: &str) -> ApiResult<()> {
        debug!(line_id = %line_id, "remove_line");
        self.http
            .delete(&format!("/cart/items/{}", line_id))
            .await
            .map_err(|err| match err {
                ApiError::Status { status: 404, .. } => ApiError::not_found("Cart line", line_id),
                other => other,
            })
    }

    /// Empties the cart. Called after a sale is recorded, never before.
    pub async fn clear(&self) -> ApiResult<()> {
        info!("clear cart");
        self.http.delete("/cart").await
    }
}
