//! Placed orders.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::CartItem;
use crate::checkout::{Checkout, OrderSummary, PaymentMethod, ShippingDetails, ShippingMethod};

/// Largest sequence number an order number can carry.
pub const MAX_ORDER_SEQUENCE: u16 = 9999;

/// Error parsing an [`OrderNumber`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid order number: {0}")]
pub struct InvalidOrderNumber(String);

/// Customer-facing order number, formatted `ORD-NNNN-YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderNumber {
    sequence: u16,
    year: i32,
}

impl OrderNumber {
    /// Build an order number. `sequence` is reduced modulo 10 000.
    #[must_use]
    pub const fn new(sequence: u16, year: i32) -> Self {
        Self {
            sequence: sequence % (MAX_ORDER_SEQUENCE + 1),
            year,
        }
    }

    /// The four-digit sequence part.
    #[must_use]
    pub const fn sequence(&self) -> u16 {
        self.sequence
    }

    /// The year part.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ORD-{:04}-{}", self.sequence, self.year)
    }
}

impl FromStr for OrderNumber {
    type Err = InvalidOrderNumber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidOrderNumber(s.to_owned());
        let rest = s.strip_prefix("ORD-").ok_or_else(invalid)?;
        let (sequence, year) = rest.split_once('-').ok_or_else(invalid)?;
        if sequence.len() != 4 || !sequence.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        Ok(Self {
            sequence: sequence.parse().map_err(|_| invalid())?,
            year: year.parse().map_err(|_| invalid())?,
        })
    }
}

impl TryFrom<String> for OrderNumber {
    type Error = InvalidOrderNumber;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OrderNumber> for String {
    fn from(number: OrderNumber) -> Self {
        number.to_string()
    }
}

/// An order that has been paid for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub number: OrderNumber,
    pub placed_at: DateTime<Utc>,
    pub estimated_delivery: NaiveDate,
    pub items: Vec<CartItem>,
    pub summary: OrderSummary,
    pub shipping_method: ShippingMethod,
    pub payment_method: PaymentMethod,
    pub shipping: ShippingDetails,
    /// Reference returned by the payment gateway.
    pub payment_reference: String,
}

impl Order {
    /// Record a paid checkout as an order.
    ///
    /// The order number's year and the delivery estimate derive from `placed_at`.
    #[must_use]
    pub fn from_checkout(
        checkout: Checkout,
        sequence: u16,
        placed_at: DateTime<Utc>,
        payment_reference: String,
    ) -> Self {
        let estimated_delivery = (placed_at
            + Duration::days(checkout.shipping_method.delivery_days()))
        .date_naive();

        Self {
            number: OrderNumber::new(sequence, placed_at.year()),
            placed_at,
            estimated_delivery,
            items: checkout.items,
            summary: checkout.summary,
            shipping_method: checkout.shipping_method,
            payment_method: checkout.payment_method,
            shipping: checkout.details,
            payment_reference,
        }
    }

    /// Total units across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}
