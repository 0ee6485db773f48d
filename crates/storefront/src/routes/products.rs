//! Product route handlers: the shop listing, categories and product detail.

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use parcel_core::catalog::DEFAULT_RELATED_LIMIT;
use parcel_core::{Product, ProductId, ShopQuery, SortOrder};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    /// Price formatted for display, e.g. `$249.99`.
    pub price_display: String,
    pub in_stock: bool,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            product: product.clone(),
            price_display: product.price.display(),
            in_stock: product.in_stock(),
        }
    }
}

fn views<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<ProductView> {
    products.into_iter().map(ProductView::from).collect()
}

/// Shop listing query string.
///
/// `category` is a comma-separated list of labels.
#[derive(Debug, Default, Deserialize)]
pub struct ShopParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort: Option<String>,
}

impl ShopParams {
    /// Convert to a catalog query. Unknown sort keys fall back to featured.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for a price bound that is not a number.
    pub fn into_query(self) -> Result<ShopQuery> {
        Ok(ShopQuery {
            search: self.q.filter(|q| !q.trim().is_empty()),
            categories: self
                .category
                .iter()
                .flat_map(|c| c.split(','))
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(String::from)
                .collect(),
            min_price: parse_price_bound("min_price", self.min_price.as_deref())?,
            max_price: parse_price_bound("max_price", self.max_price.as_deref())?,
            sort: self
                .sort
                .as_deref()
                .map(SortOrder::parse_lenient)
                .unwrap_or_default(),
        })
    }
}

fn parse_price_bound(name: &str, value: Option<&str>) -> Result<Option<Decimal>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => Decimal::from_str(v)
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("Invalid {name}: {v}"))),
    }
}

/// Shop listing response.
#[derive(Debug, Serialize)]
pub struct ShopView {
    pub products: Vec<ProductView>,
    pub count: usize,
    pub sort: SortOrder,
    pub categories: Vec<String>,
}

/// Product listing with search, category and price filters.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ShopParams>,
) -> Result<Json<ShopView>> {
    let query = params.into_query()?;
    let catalog = state.catalog();
    let products = views(catalog.search(&query));

    tracing::debug!(count = products.len(), sort = query.sort.as_str(), "Shop listing");

    Ok(Json(ShopView {
        count: products.len(),
        products,
        sort: query.sort,
        categories: catalog.categories().into_iter().map(String::from).collect(),
    }))
}

/// All category labels, sorted.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(
        state
            .catalog()
            .categories()
            .into_iter()
            .map(String::from)
            .collect(),
    )
}

/// Products in one category.
#[instrument(skip(state))]
pub async fn category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<Vec<ProductView>> {
    Json(views(state.catalog().by_category(&category)))
}

/// Product detail response.
#[derive(Debug, Serialize)]
pub struct ProductDetailView {
    pub product: ProductView,
    pub related: Vec<ProductView>,
}

/// Display product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductDetailView>> {
    let catalog = state.catalog();
    let product = catalog
        .get_by_id(&ProductId::new(id))
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(Json(ProductDetailView {
        product: ProductView::from(product),
        related: views(catalog.related(product, DEFAULT_RELATED_LIMIT)),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shop_params_split_categories() {
        let query = ShopParams {
            category: Some("Electronics, Home,,".to_string()),
            ..ShopParams::default()
        }
        .into_query()
        .unwrap();

        assert_eq!(query.categories, vec!["Electronics", "Home"]);
        assert!(query.min_price.is_none());
        assert_eq!(query.sort, SortOrder::Featured);
    }

    #[test]
    fn test_shop_params_blank_search_is_no_filter() {
        let query = ShopParams {
            q: Some("   ".to_string()),
            ..ShopParams::default()
        }
        .into_query()
        .unwrap();
        assert!(query.search.is_none());
    }

    #[test]
    fn test_shop_params_unknown_sort_falls_back() {
        let query = ShopParams {
            sort: Some("cheapest".to_string()),
            ..ShopParams::default()
        }
        .into_query()
        .unwrap();
        assert_eq!(query.sort, SortOrder::Featured);
    }

    #[test]
    fn test_shop_params_reject_bad_price() {
        let result = ShopParams {
            max_price: Some("ten".to_string()),
            ..ShopParams::default()
        }
        .into_query();
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_product_view_formats_price() {
        let catalog = parcel_core::Catalog::seeded();
        let view = ProductView::from(catalog.products().first().unwrap());
        assert!(view.price_display.starts_with('$'));
        assert!(view.in_stock);
    }
}
