//! Home page route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use parcel_core::Product;
use parcel_core::catalog::DEFAULT_FEATURED_LIMIT;

use crate::middleware::OptionalAuth;
use crate::state::AppState;

/// A selling point shown under the featured products.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

/// Static selling points.
const FEATURES: [Feature; 4] = [
    Feature {
        title: "Free Shipping",
        description: "Enjoy free shipping on all orders over $50",
    },
    Feature {
        title: "Secure Payment",
        description: "Experience worry-free transactions with our secure payment options",
    },
    Feature {
        title: "Easy Returns",
        description: "Simple returns within 30 days of purchase",
    },
    Feature {
        title: "Flexible Payment",
        description: "Multiple payment options for your convenience",
    },
];

/// Home page data.
#[derive(Debug, Serialize)]
pub struct HomeView {
    /// Present when someone is signed in.
    pub greeting: Option<String>,
    pub featured: Vec<Product>,
    pub categories: Vec<String>,
    pub features: &'static [Feature],
}

/// Display home page.
#[instrument(skip(state, user))]
pub async fn home(State(state): State<AppState>, OptionalAuth(user): OptionalAuth) -> Json<HomeView> {
    let catalog = state.catalog();

    Json(HomeView {
        greeting: user.map(|u| format!("Welcome back, {}!", u.first_name())),
        featured: catalog
            .featured(DEFAULT_FEATURED_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
        categories: catalog.categories().into_iter().map(String::from).collect(),
        features: &FEATURES,
    })
}
