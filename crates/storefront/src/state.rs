//! Application state shared across handlers.

use std::sync::Arc;

use parcel_core::{Catalog, CatalogError};

use crate::config::StorefrontConfig;
use crate::services::auth::{AuthProvider, DemoAuthProvider};
use crate::services::payment::{MockPaymentGateway, PaymentGateway};

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to read catalog file: {0}")]
    CatalogIo(#[from] std::io::Error),
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the catalog, configuration and the auth and payment backends.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    auth: Arc<dyn AuthProvider>,
    payments: Arc<dyn PaymentGateway>,
}

impl AppState {
    /// Create application state with the demo auth provider and mock payments.
    ///
    /// The catalog is read from `config.catalog_path` when set, otherwise the
    /// built-in catalog is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be read or is invalid.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                let catalog = Catalog::from_json(&json)?;
                tracing::info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
                catalog
            }
            None => Catalog::seeded(),
        };

        let auth = Arc::new(DemoAuthProvider::with_demo_accounts(config.auth_latency));
        let payments = Arc::new(MockPaymentGateway::new(config.payment_latency));

        Ok(Self::with_services(config, catalog, auth, payments))
    }

    /// Create application state from explicit parts.
    #[must_use]
    pub fn with_services(
        config: StorefrontConfig,
        catalog: Catalog,
        auth: Arc<dyn AuthProvider>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                auth,
                payments,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the auth provider.
    #[must_use]
    pub fn auth(&self) -> &dyn AuthProvider {
        self.inner.auth.as_ref()
    }

    /// Get the payment gateway.
    #[must_use]
    pub fn payments(&self) -> &dyn PaymentGateway {
        self.inner.payments.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_new_uses_seeded_catalog_by_default() {
        let state = AppState::new(StorefrontConfig::default()).unwrap();
        assert_eq!(state.catalog().len(), 12);
    }

    #[test]
    fn test_new_loads_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"a","name":"Mug","description":"A mug","price":{{"amount":"9.50"}},
                "image":"https://example.com/mug.jpg","category":"Home","rating":"4.0","stock":3}}]"#
        )
        .unwrap();

        let config = StorefrontConfig {
            catalog_path: Some(file.path().to_path_buf()),
            ..StorefrontConfig::default()
        };
        let state = AppState::new(config).unwrap();
        assert_eq!(state.catalog().len(), 1);
    }

    #[test]
    fn test_new_rejects_missing_catalog_file() {
        let config = StorefrontConfig {
            catalog_path: Some("/nonexistent/catalog.json".into()),
            ..StorefrontConfig::default()
        };
        assert!(matches!(AppState::new(config), Err(StateError::CatalogIo(_))));
    }
}
