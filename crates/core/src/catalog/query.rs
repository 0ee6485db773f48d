//! Shop listing query: search, category and price filters plus sort order.

use core::cmp::Ordering;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Product;

/// Sort order for the shop listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Featured products first, otherwise catalog order.
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    /// Highest rated first.
    Rating,
}

impl SortOrder {
    /// The query-string key for this order.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::Rating => "rating",
        }
    }

    /// Parse a query-string key, falling back to [`SortOrder::Featured`] for
    /// anything unrecognised.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Featured => b.featured.cmp(&a.featured),
            Self::PriceAsc => a.price.amount.cmp(&b.price.amount),
            Self::PriceDesc => b.price.amount.cmp(&a.price.amount),
            Self::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            Self::NameDesc => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
            Self::Rating => b.rating.cmp(&a.rating),
        }
    }
}

/// Error for an unknown sort key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order: {0}")]
pub struct UnknownSortOrder(String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(Self::Featured),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "name-asc" => Ok(Self::NameAsc),
            "name-desc" => Ok(Self::NameDesc),
            "rating" => Ok(Self::Rating),
            other => Err(UnknownSortOrder(other.to_owned())),
        }
    }
}

/// Filters and ordering for the shop listing.
///
/// Filters are applied in order (search, categories, price range) and the
/// result is stably sorted, so ties keep catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopQuery {
    /// Case-insensitive substring matched against name or description.
    pub search: Option<String>,
    /// Keep only these categories; empty keeps all.
    pub categories: Vec<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
    pub sort: SortOrder,
}

impl ShopQuery {
    /// Filter and sort `products`.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let needle = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut result: Vec<&Product> = products
            .iter()
            .filter(|p| {
                needle.as_deref().is_none_or(|needle| {
                    p.name.to_lowercase().contains(needle)
                        || p.description.to_lowercase().contains(needle)
                })
            })
            .filter(|p| self.categories.is_empty() || self.categories.contains(&p.category))
            .filter(|p| self.min_price.is_none_or(|min| p.price.amount >= min))
            .filter(|p| self.max_price.is_none_or(|max| p.price.amount <= max))
            .collect();

        result.sort_by(|a, b| self.sort.compare(a, b));
        result
    }
}
