//! Immutable product catalog.
//!
//! The catalog is created once at startup (from the built-in seed or a JSON
//! file) and never mutated afterwards. Every query is a pure function over the
//! product list and preserves catalog order.

mod query;
mod seed;

use std::collections::{BTreeMap, BTreeSet, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CurrencyCode, Price, ProductId, STORE_CURRENCY};

pub use query::{ShopQuery, SortOrder};

/// Number of products shown in featured and related strips.
pub const DEFAULT_FEATURED_LIMIT: usize = 4;
/// Number of related products shown on a product page.
pub const DEFAULT_RELATED_LIMIT: usize = 4;
/// Highest rating a product can carry.
pub const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);
/// Products with more units than this are well stocked.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Inventory badge shown in the admin product table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    Low,
}

/// A purchasable product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Image URL.
    pub image: String,
    /// Category label, compared exactly (no case folding).
    pub category: String,
    /// Flagged for promotional display.
    #[serde(default)]
    pub featured: bool,
    /// Average rating, 0 to 5.
    pub rating: Decimal,
    /// Units available.
    pub stock: u32,
}

impl Product {
    /// Whether any units are available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }

    #[must_use]
    pub const fn stock_status(&self) -> StockStatus {
        if self.stock > LOW_STOCK_THRESHOLD {
            StockStatus::InStock
        } else {
            StockStatus::Low
        }
    }
}

/// Errors raised while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two products share an id.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
    /// A product has a price below zero.
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
    /// A product is priced in a currency the store does not sell in.
    #[error("product {id} is priced in {currency:?}, expected {expected:?}")]
    UnsupportedCurrency {
        id: ProductId,
        currency: CurrencyCode,
        expected: CurrencyCode,
    },
    /// A product rating is outside 0..=5.
    #[error("product {id} has rating {rating}, expected 0 to 5")]
    RatingOutOfRange { id: ProductId, rating: Decimal },
    /// The catalog document could not be parsed.
    #[error("invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The static set of purchasable products.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from a product list, validating every record.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate ids, negative prices, prices outside
    /// [`STORE_CURRENCY`], or ratings outside 0..=5.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            if product.price.is_negative() {
                return Err(CatalogError::NegativePrice(product.id.clone()));
            }
            if product.price.currency_code != STORE_CURRENCY {
                return Err(CatalogError::UnsupportedCurrency {
                    id: product.id.clone(),
                    currency: product.price.currency_code,
                    expected: STORE_CURRENCY,
                });
            }
            if product.rating < Decimal::ZERO || product.rating > MAX_RATING {
                return Err(CatalogError::RatingOutOfRange {
                    id: product.id.clone(),
                    rating: product.rating,
                });
            }
        }
        Ok(Self { products })
    }

    /// The built-in demo catalog.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            products: seed::products(),
        }
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON or fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// All products in `category`, in catalog order.
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// The first `limit` featured products, in catalog order.
    #[must_use]
    pub fn featured(&self, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.featured)
            .take(limit)
            .collect()
    }

    /// Up to `limit` other products from the same category, in catalog order.
    #[must_use]
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(limit)
            .collect()
    }

    /// Distinct category labels.
    #[must_use]
    pub fn categories(&self) -> BTreeSet<&str> {
        self.products.iter().map(|p| p.category.as_str()).collect()
    }

    /// Number of products per category label.
    #[must_use]
    pub fn category_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for product in &self.products {
            *counts.entry(product.category.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Products matching a shop listing query, filtered then sorted.
    #[must_use]
    pub fn search(&self, query: &ShopQuery) -> Vec<&Product> {
        query.apply(&self.products)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}
