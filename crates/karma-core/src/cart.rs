//! # Cart Module
//!
//! Line items and the cart aggregator.
//!
//! ## Invariants
//! - Items are unique by `product_id` (adding the same product again
//!   increases quantity)
//! - Quantity is always 1..=999 (setting 0 removes the item)
//! - Maximum unique items: 100
//! - `subtotal` is recomputed from the lines on every call; there is no
//!   cached total to fall out of sync

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CheckoutError, CheckoutResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::{validate_quantity, validate_unit_price};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart.
///
/// ## Price Freezing
/// `name` and `unit_price` are captured when the item enters the cart.
/// If the catalog price changes mid-session, this line keeps the price
/// the customer saw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Product ID (assigned by the external catalog service).
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    pub unit_price: Money,

    /// Quantity in cart.
    pub quantity: i64,
}

impl LineItem {
    /// Creates a line item from a catalog product and quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        LineItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price(),
            quantity,
        }
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: an ordered sequence of line items.
///
/// Lines keep insertion order for display; the subtotal is independent
/// of that order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from externally sourced lines (the cart service's
    /// current contents), validating each line on the way in.
    pub fn from_lines(lines: Vec<LineItem>) -> CheckoutResult<Self> {
        let mut cart = Cart::new();
        for line in lines {
            validate_unit_price(line.unit_price.cents())?;
            validate_quantity(line.quantity)?;
            if cart.items.len() >= MAX_CART_ITEMS {
                return Err(CheckoutError::CartTooLarge {
                    max: MAX_CART_ITEMS,
                });
            }
            // Duplicate product ids from the source collapse into one line
            match cart
                .items
                .iter_mut()
                .find(|i| i.product_id == line.product_id)
            {
                Some(existing) => existing.quantity += line.quantity,
                None => cart.items.push(line),
            }
        }
        Ok(cart)
    }

    /// Adds a product to the cart or increases quantity if already present.
    pub fn add_product(&mut self, product: &Product, quantity: i64) -> CheckoutResult<()> {
        validate_quantity(quantity)?;
        validate_unit_price(product.unit_price_cents)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            let new_qty = item.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CheckoutError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity = new_qty;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CheckoutError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(LineItem::from_product(product, quantity));
        Ok(())
    }

    /// Updates the quantity of an item in the cart.
    ///
    /// ## Behavior
    /// - If quantity is 0: removes the item
    /// - If product not found: `ItemNotInCart`
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CheckoutResult<()> {
        if quantity == 0 {
            return self.remove_item(product_id);
        }

        validate_quantity(quantity)?;

        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(())
            }
            None => Err(CheckoutError::ItemNotInCart {
                product_id: product_id.to_string(),
            }),
        }
    }

    /// Removes an item from the cart by product ID.
    pub fn remove_item(&mut self, product_id: &str) -> CheckoutResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() == initial_len {
            Err(CheckoutError::ItemNotInCart {
                product_id: product_id.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The lines in insertion order.
    pub fn lines(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns the number of unique items in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Calculates the subtotal: the exact sum of every line total.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(|i| i.line_total()).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
