//! Parcel Core - storefront domain library.
//!
//! This crate provides the types and pure logic shared by the Parcel components:
//! - `storefront` - HTTP service exposing the shop, cart, checkout and account routes
//! - `integration-tests` - End-to-end tests driving the storefront router
//!
//! # Architecture
//!
//! The core crate contains only types and synchronous logic - no I/O, no sessions,
//! no HTTP. Carts and catalogs are plain values owned by whoever calls into them,
//! which keeps them trivially testable and usable anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails and roles
//! - [`catalog`] - Immutable product catalog and the shop listing query
//! - [`cart`] - Per-visitor cart with stock-checked quantities and derived totals
//! - [`checkout`] - Checkout form validation, shipping, coupons and order summaries
//! - [`order`] - Placed orders and order numbers
//! - [`user`] - Signed-in user identity

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod order;
pub mod types;
pub mod user;

pub use cart::{Cart, CartError, CartItem};
pub use catalog::{Catalog, CatalogError, Product, ShopQuery, SortOrder, StockStatus};
pub use types::*;
pub use user::SessionUser;
