//! Per-visitor shopping cart.
//!
//! A cart is an ordered list of line items, at most one per product id.
//! Totals are computed from the items on every call and never cached.
//!
//! Stock limits are enforced here rather than left to the UI: each item keeps
//! the product's stock count from when it was added (the catalog is immutable,
//! so that snapshot is exact) and no operation can push the quantity above it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// Errors from cart mutations. The cart is left unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The requested quantity exceeds the units in stock.
    #[error("only {available} of product {product_id} in stock (requested {requested})")]
    InsufficientStock {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },
    /// Adding zero units was requested.
    #[error("quantity must be at least 1")]
    ZeroQuantity,
}

/// One line of the cart.
///
/// Name, price and image are snapshots taken when the product was first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Id of the product this line holds.
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    /// Always at least 1.
    pub quantity: u32,
    /// Units in stock when the line was created.
    pub stock: u32,
}

impl CartItem {
    /// Price of this line (`price × quantity`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }

    fn check_stock(&self, requested: u64) -> Result<(), CartError> {
        if requested > u64::from(self.stock) {
            return Err(CartError::InsufficientStock {
                product_id: self.id.clone(),
                requested,
                available: self.stock,
            });
        }
        Ok(())
    }
}

impl From<&Product> for CartItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 0,
            stock: product.stock,
        }
    }
}

/// Ordered collection of cart items, unique by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Items in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line if the product is already in the cart,
    /// otherwise appends a new line with quantity 1. Returns the line's new
    /// quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InsufficientStock` if no further unit is in stock.
    pub fn add_item(&mut self, product: &Product) -> Result<u32, CartError> {
        self.add_quantity(product, 1)
    }

    /// Add `quantity` units of `product` (the product page's quantity stepper).
    ///
    /// # Errors
    ///
    /// Returns `CartError::ZeroQuantity` for a zero quantity and
    /// `CartError::InsufficientStock` if the resulting line would exceed stock.
    pub fn add_quantity(&mut self, product: &Product, quantity: u32) -> Result<u32, CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        if let Some(item) = self.items.iter_mut().find(|item| item.id == product.id) {
            let requested = u64::from(item.quantity) + u64::from(quantity);
            item.check_stock(requested)?;
            item.quantity += quantity;
            return Ok(item.quantity);
        }

        let mut item = CartItem::from(product);
        item.check_stock(u64::from(quantity))?;
        item.quantity = quantity;
        self.items.push(item);
        Ok(quantity)
    }

    /// Remove the line for `id`. Absent ids are a no-op.
    pub fn remove_item(&mut self, id: &ProductId) -> Option<CartItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Set the quantity of the line for `id`.
    ///
    /// A quantity of zero or less removes the line. Absent ids are a no-op.
    /// Returns the line's quantity afterwards, or `None` if there is no line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InsufficientStock` if `quantity` exceeds stock.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> Result<Option<u32>, CartError> {
        let Ok(requested) = u64::try_from(quantity) else {
            self.remove_item(id);
            return Ok(None);
        };
        if requested == 0 {
            self.remove_item(id);
            return Ok(None);
        }

        let Some(item) = self.items.iter_mut().find(|item| &item.id == id) else {
            return Ok(None);
        };
        item.check_stock(requested)?;
        // check_stock bounds requested by a u32 stock count
        item.quantity = u32::try_from(requested).unwrap_or(item.stock);
        Ok(Some(item.quantity))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of `price × quantity` across all lines.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }
}
