//! Account route handlers.
//!
//! These routes require authentication.

use axum::Json;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use parcel_core::{Price, SessionUser};

use crate::error::Result;
use crate::middleware::auth::RequireAuth;
use crate::services::cart::load_last_order;

/// Order history row.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub number: String,
    pub date: NaiveDate,
    pub status: &'static str,
    pub total: Price,
}

/// Account overview data.
#[derive(Debug, Serialize)]
pub struct AccountView {
    pub user: SessionUser,
    pub first_name: String,
    pub last_name: String,
    pub orders: Vec<OrderView>,
}

/// Fixed order history shown for every account.
fn demo_orders() -> Vec<OrderView> {
    [
        ("ORD-4389-2023", (2023, 7, 15), 12_599),
        ("ORD-3921-2023", (2023, 6, 2), 7_850),
    ]
    .into_iter()
    .filter_map(|(number, (y, m, d), cents)| {
        Some(OrderView {
            number: number.to_string(),
            date: NaiveDate::from_ymd_opt(y, m, d)?,
            status: "Delivered",
            total: Price::usd(Decimal::new(cents, 2)),
        })
    })
    .collect()
}

/// Display account overview page.
///
/// An order placed in this session is listed ahead of the demo history.
#[instrument(skip(session, user), fields(user_id = %user.id))]
pub async fn index(session: Session, RequireAuth(user): RequireAuth) -> Result<Json<AccountView>> {
    let mut orders = Vec::new();
    if let Some(order) = load_last_order(&session).await? {
        orders.push(OrderView {
            number: order.number.to_string(),
            date: order.placed_at.date_naive(),
            status: "Processing",
            total: order.summary.total,
        });
    }
    orders.extend(demo_orders());

    Ok(Json(AccountView {
        first_name: user.first_name().to_string(),
        last_name: user.last_name().to_string(),
        orders,
        user,
    }))
}
