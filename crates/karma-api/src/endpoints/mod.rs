//! # Endpoint Clients
//!
//! One client per external aggregate, mirroring the service's surface:
//!
//! - [`catalog`] - product listing and code/barcode lookup
//! - [`cart`] - the server-held cart the frontend renders
//! - [`sales`] - sale submission and history

pub mod cart;
pub mod catalog;
pub mod sales;
