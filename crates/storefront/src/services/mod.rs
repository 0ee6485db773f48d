//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Credential checks and registration (demo account table)
//! - `storage` - Key-value persistence for the signed-in user
//! - `session` - Signed-in user lifecycle over a key-value store
//! - `payment` - Payment gateway (mock)
//! - `cart` - Loading and saving the visitor's cart in the HTTP session
//!
//! The capability traits (`KeyValueStore`, `AuthProvider`, `PaymentGateway`)
//! return boxed futures so they can sit behind `dyn` in the application state
//! and be swapped for real backends.

pub mod auth;
pub mod cart;
pub mod payment;
pub mod session;
pub mod storage;

use std::future::Future;
use std::pin::Pin;

/// A boxed, sendable future returned by the capability traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
