//! Checkout: shipping and payment options, coupons, form validation and the
//! order summary shown on the cart and checkout pages.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{Cart, CartItem};
use crate::types::{Email, EmailError, Price};
use crate::user::SessionUser;

/// Subtotal at or above which the cart page estimates free shipping.
pub const FREE_SHIPPING_THRESHOLD: Price = Price::usd(Decimal::from_parts(50, 0, 0, false, 0));
/// Shipping estimate shown on the cart page below the free shipping threshold.
pub const FLAT_SHIPPING_ESTIMATE: Price = Price::usd(Decimal::from_parts(5, 0, 0, false, 0));
/// Country prefilled on the checkout form.
pub const DEFAULT_COUNTRY: &str = "United States";

const DISCOUNT_CODE: &str = "DISCOUNT20";
const DISCOUNT_PERCENT: u32 = 20;

/// Delivery speed chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShippingMethod {
    #[default]
    Standard,
    Express,
    NextDay,
}

impl ShippingMethod {
    /// Shipping charge for this method.
    #[must_use]
    pub fn rate(self) -> Price {
        match self {
            Self::Standard => Price::from_cents(0),
            Self::Express => Price::from_cents(1500),
            Self::NextDay => Price::from_cents(2500),
        }
    }

    /// Days from placement until the estimated delivery date.
    #[must_use]
    pub const fn delivery_days(self) -> i64 {
        match self {
            Self::Standard => 5,
            Self::Express => 3,
            Self::NextDay => 1,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard Shipping",
            Self::Express => "Express Shipping",
            Self::NextDay => "Next Day Delivery",
        }
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    Paypal,
    BankTransfer,
}

/// Shipping estimate for the cart page: free from $50, otherwise a flat $5.
#[must_use]
pub fn estimate_shipping(subtotal: Price) -> Price {
    if subtotal >= FREE_SHIPPING_THRESHOLD {
        Price::zero(subtotal.currency_code)
    } else {
        FLAT_SHIPPING_ESTIMATE
    }
}

/// Errors from redeeming a coupon code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CouponError {
    #[error("Please enter a coupon code")]
    Empty,
    #[error("Invalid coupon code")]
    Invalid,
}

/// A redeemed coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    /// Canonical (upper-case) code.
    pub code: String,
    pub percent_off: u32,
}

impl Coupon {
    /// Redeem a coupon code. Codes are matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::Empty` for a blank code and `CouponError::Invalid`
    /// for an unknown one.
    pub fn redeem(code: &str) -> Result<Self, CouponError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(CouponError::Empty);
        }
        if !code.eq_ignore_ascii_case(DISCOUNT_CODE) {
            return Err(CouponError::Invalid);
        }
        Ok(Self {
            code: DISCOUNT_CODE.to_owned(),
            percent_off: DISCOUNT_PERCENT,
        })
    }

    /// Discount this coupon takes off `subtotal`.
    #[must_use]
    pub fn discount(&self, subtotal: Price) -> Price {
        subtotal.percentage(self.percent_off)
    }
}

/// Money breakdown for a cart or checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub subtotal: Price,
    pub discount: Price,
    pub shipping: Price,
    /// `subtotal - discount + shipping`.
    pub total: Price,
}

impl OrderSummary {
    fn build(subtotal: Price, coupon: Option<&Coupon>, shipping: Price) -> Self {
        let discount = coupon.map_or_else(
            || Price::zero(subtotal.currency_code),
            |coupon| coupon.discount(subtotal),
        );
        Self {
            subtotal,
            discount,
            shipping,
            total: subtotal - discount + shipping,
        }
    }

    /// Summary for the cart page, using the shipping estimate.
    #[must_use]
    pub fn estimate(cart: &Cart, coupon: Option<&Coupon>) -> Self {
        let subtotal = cart.total_price();
        Self::build(subtotal, coupon, estimate_shipping(subtotal))
    }

    /// Summary for checkout with a chosen shipping method.
    #[must_use]
    pub fn for_checkout(cart: &Cart, shipping: ShippingMethod, coupon: Option<&Coupon>) -> Self {
        Self::build(cart.total_price(), coupon, shipping.rate())
    }
}

/// Errors that block a checkout submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,
    /// A required field is blank; holds the field's display words.
    #[error("Please fill in the {0} field")]
    MissingField(&'static str),
    #[error("Please enter a valid email address: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Raw checkout form as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub shipping_method: ShippingMethod,
    pub payment_method: PaymentMethod,
    pub same_billing_address: bool,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: DEFAULT_COUNTRY.to_owned(),
            shipping_method: ShippingMethod::default(),
            payment_method: PaymentMethod::default(),
            same_billing_address: true,
        }
    }
}

impl CheckoutForm {
    /// A blank form, prefilled with the signed-in user's name and email.
    #[must_use]
    pub fn prefilled(user: Option<&SessionUser>) -> Self {
        let mut form = Self::default();
        if let Some(user) = user {
            user.first_name().clone_into(&mut form.first_name);
            user.last_name().clone_into(&mut form.last_name);
            form.email = user.email.to_string();
        }
        form
    }

    /// Required fields in display order.
    fn required_fields(&self) -> [(&'static str, &str); 9] {
        [
            ("first name", self.first_name.as_str()),
            ("last name", self.last_name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("address", self.address.as_str()),
            ("city", self.city.as_str()),
            ("state", self.state.as_str()),
            ("zip code", self.zip_code.as_str()),
            ("country", self.country.as_str()),
        ]
    }

    /// Check every required field is present, then that the email parses.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::MissingField` naming the first blank field, or
    /// `CheckoutError::InvalidEmail`.
    pub fn validate(&self) -> Result<ShippingDetails, CheckoutError> {
        if let Some((name, _)) = self
            .required_fields()
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
        {
            return Err(CheckoutError::MissingField(name));
        }

        Ok(ShippingDetails {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email: Email::parse(&self.email)?,
            phone: self.phone.trim().to_owned(),
            address: self.address.trim().to_owned(),
            city: self.city.trim().to_owned(),
            state: self.state.trim().to_owned(),
            zip_code: self.zip_code.trim().to_owned(),
            country: self.country.trim().to_owned(),
        })
    }
}

/// Validated contact and shipping address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// A checkout that passed validation and is ready for payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    pub items: Vec<CartItem>,
    pub details: ShippingDetails,
    pub summary: OrderSummary,
    pub shipping_method: ShippingMethod,
    pub payment_method: PaymentMethod,
}

impl Checkout {
    /// Validate `form` against `cart`.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` for an empty cart, otherwise any
    /// form validation error.
    pub fn prepare(
        cart: &Cart,
        form: &CheckoutForm,
        coupon: Option<&Coupon>,
    ) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let details = form.validate()?;

        Ok(Self {
            items: cart.items().to_vec(),
            details,
            summary: OrderSummary::for_checkout(cart, form.shipping_method, coupon),
            shipping_method: form.shipping_method,
            payment_method: form.payment_method,
        })
    }
}
