//! # Register Configuration
//!
//! Stores register configuration loaded at startup.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no lock is needed.

use serde::{Deserialize, Serialize};

use karma_core::DEFAULT_CREDIT_TERM_DAYS;

/// Register configuration.
///
/// ## Fields
/// Most fields have sensible defaults for development.
/// Production deployments should configure these properly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterConfig {
    /// Store name (displayed on receipts)
    pub store_name: String,

    /// Store address lines (for receipts)
    pub store_address: Vec<String>,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Credit term in days for credit sales.
    /// Store policy default: 30 days.
    pub credit_term_days: u32,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        RegisterConfig {
            store_name: "KARMA".to_string(),
            store_address: Vec::new(),
            currency_symbol: "$".to_string(),
            credit_term_days: DEFAULT_CREDIT_TERM_DAYS,
        }
    }
}
