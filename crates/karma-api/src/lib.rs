//! # karma-api: External Service Client for Karma POS
//!
//! This crate provides typed access to the external backend that owns
//! the catalog, the server-held cart and the sales record.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Karma POS Data Flow                              │
//! │                                                                         │
//! │  karma-register (checkout session)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     karma-api (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌─────────────┐  │   │
//! │  │   │    Backend    │    │   Endpoints    │    │  Wire DTOs  │  │   │
//! │  │   │  (client.rs)  │    │ CatalogClient  │    │  CartLine   │  │   │
//! │  │   │               │    │ CartClient     │    │  SaleRecord │  │   │
//! │  │   │ reqwest pool  │◄───│ SalesClient    │    │  ...        │  │   │
//! │  │   └───────────────┘    └────────────────┘    └─────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  External REST service (persistence, pricing, inventory)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use karma_api::{Backend, BackendConfig};
//!
//! let backend = Backend::new(BackendConfig::new("http://127.0.0.1:5000"))?;
//!
//! let cart_lines = backend.cart().fetch().await?;
//! let product = backend.catalog().find_by_code("COKE-330").await?;
//! let recorded = backend.sales().submit(&order_summary).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod endpoints;
pub mod error;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::BackendConfig;
pub use error::{ApiError, ApiResult};

pub use endpoints::cart::{CartClient, CartLine};
pub use endpoints::catalog::CatalogClient;
pub use endpoints::sales::{RecordedSale, SaleDetail, SaleRecord, SalesClient, SalesQuery};

use client::HttpClient;

// =============================================================================
// Backend Root
// =============================================================================

/// Root handle for the external backend.
///
/// Builds one shared HTTP client and hands out cheap per-aggregate
/// clients over it.
#[derive(Debug, Clone)]
pub struct Backend {
    http: HttpClient,
}

impl Backend {
    /// Creates a backend handle from the given configuration.
    pub fn new(config: BackendConfig) -> ApiResult<Self> {
        let http = HttpClient::new(&config)?;
        Ok(Backend { http })
    }

    /// Catalog endpoints: product listing and lookup.
    pub fn catalog(&self) -> CatalogClient {
        CatalogClient::new(self.http.clone())
    }

    /// Cart endpoints: the server-held cart.
    pub fn cart(&self) -> CartClient {
        CartClient::new(self.http.clone())
    }

    /// Sales endpoints: submission and history.
    pub fn sales(&self) -> SalesClient {
        SalesClient::new(self.http.clone())
    }
}
