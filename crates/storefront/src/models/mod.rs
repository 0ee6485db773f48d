//! Domain models for storefront.
//!
//! Catalog, cart, checkout and user types live in `parcel-core`; this module
//! only holds what is specific to the HTTP session.

pub mod session;

pub use session::keys as session_keys;
