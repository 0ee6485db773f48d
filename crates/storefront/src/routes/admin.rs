//! Admin dashboard route handler.
//!
//! Requires a signed-in admin. The inventory table is built from the live
//! catalog; the sales figures are fixed demo data.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use parcel_core::{Price, Product, ProductId, StockStatus};

use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Headline figure with its month-over-month change.
#[derive(Debug, Clone, Serialize)]
pub struct Stat {
    pub label: &'static str,
    pub value: String,
    pub change_percent: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyRevenue {
    pub month: &'static str,
    pub revenue: Price,
}

/// Share of sales for one category, in percent.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryShare {
    pub category: &'static str,
    pub percent: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub stats: Vec<Stat>,
    pub revenue: Vec<MonthlyRevenue>,
    pub category_share: Vec<CategoryShare>,
}

impl Dashboard {
    fn demo() -> Self {
        let stat = |label, value: &str, change_percent| Stat {
            label,
            value: value.to_string(),
            change_percent,
        };

        Self {
            stats: vec![
                stat("Total Sales", "$12,890", 12),
                stat("Orders", "387", 8),
                stat("Customers", "2,458", 5),
            ],
            revenue: [
                ("Jan", 4000),
                ("Feb", 3000),
                ("Mar", 5000),
                ("Apr", 4500),
                ("May", 6000),
                ("Jun", 5500),
            ]
            .into_iter()
            .map(|(month, dollars)| MonthlyRevenue {
                month,
                revenue: Price::usd(Decimal::from(dollars)),
            })
            .collect(),
            category_share: [
                ("Electronics", 40),
                ("Fashion", 25),
                ("Home", 15),
                ("Fitness", 10),
                ("Food", 5),
                ("Lifestyle", 5),
            ]
            .into_iter()
            .map(|(category, percent)| CategoryShare { category, percent })
            .collect(),
        }
    }
}

/// Inventory table row.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryRow {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Price,
    pub stock: u32,
    pub status: StockStatus,
}

impl From<&Product> for InventoryRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            stock: product.stock,
            status: product.stock_status(),
        }
    }
}

/// Admin page query string.
#[derive(Debug, Default, Deserialize)]
pub struct AdminParams {
    /// Case-insensitive product name filter.
    pub q: Option<String>,
}

/// Admin page data.
#[derive(Debug, Serialize)]
pub struct AdminView {
    pub dashboard: Dashboard,
    pub inventory: Vec<InventoryRow>,
    pub category_counts: BTreeMap<String, usize>,
}

/// Products whose name contains `term`, ignoring case.
fn inventory(products: &[Product], term: Option<&str>) -> Vec<InventoryRow> {
    let term = term.map(str::to_lowercase).unwrap_or_default();
    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&term))
        .map(InventoryRow::from)
        .collect()
}

/// Display admin dashboard.
#[instrument(skip(state, admin), fields(user_id = %admin.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(params): Query<AdminParams>,
) -> Json<AdminView> {
    let catalog = state.catalog();

    Json(AdminView {
        dashboard: Dashboard::demo(),
        inventory: inventory(catalog.products(), params.q.as_deref()),
        category_counts: catalog
            .category_counts()
            .into_iter()
            .map(|(category, count)| (category.to_string(), count))
            .collect(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use parcel_core::Catalog;

    use super::*;

    #[test]
    fn test_inventory_search_ignores_case() {
        let catalog = Catalog::seeded();
        let all = inventory(catalog.products(), None);
        assert_eq!(all.len(), catalog.len());

        let name = catalog.products().first().unwrap().name.to_uppercase();
        let rows = inventory(catalog.products(), Some(&name));
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| r.name.to_uppercase().contains(&name)));
    }

    #[test]
    fn test_inventory_no_match() {
        let catalog = Catalog::seeded();
        assert!(inventory(catalog.products(), Some("zzz-no-such-product")).is_empty());
    }

    #[test]
    fn test_demo_dashboard() {
        let dashboard = Dashboard::demo();
        assert_eq!(dashboard.revenue.len(), 6);
        assert_eq!(dashboard.category_share.iter().map(|c| c.percent).sum::<u32>(), 100);
    }
}
