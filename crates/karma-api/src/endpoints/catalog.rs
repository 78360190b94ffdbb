//! # Catalog Endpoints
//!
//! Product listing and lookup. The catalog service is the pricing
//! authority; this client never writes to it.

use tracing::debug;

use crate::client::HttpClient;
use crate::error::{ApiError, ApiResult};
use karma_core::Product;

/// Client for the catalog endpoints.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: HttpClient,
}

impl CatalogClient {
    pub(crate) fn new(http: HttpClient) -> Self {
        CatalogClient { http }
    }

    /// Lists the products available for sale.
    pub async fn list_products(&self) -> ApiResult<Vec<Product>> {
        debug!("list_products");
        self.http.get_json("/products").await
    }

    /// Fetches a single product by its catalog id.
    pub async fn get_product(&self, id: &str) -> ApiResult<Product> {
        debug!(id = %id, "get_product");
        self.http
            .get_json(&format!("/products/{}", id))
            .await
            .map_err(|err| match err {
                ApiError::Status { status: 404, .. } => ApiError::not_found("Product", id),
                other => other,
            })
    }

    /// Looks a product up by its code or barcode.
    ///
    /// This is the scan-to-add path: the register reads a code and asks
    /// the catalog which product it names.
    pub async fn find_by_code(&self, code: &str) -> ApiResult<Product> {
        debug!(code = %code, "find_by_code");
        self.http
            .get_json_query("/products/lookup", &[("code", code.to_string())])
            .await
            .map_err(|err| match err {
                ApiError::Status { status: 404, .. } => ApiError::not_found("Product", code),
                other => other,
            })
    }
}
