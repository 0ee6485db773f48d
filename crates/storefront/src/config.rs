//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: http://localhost:3000)
//! - `STOREFRONT_CATALOG_PATH` - JSON product catalog to load instead of the built-in one
//! - `STOREFRONT_AUTH_LATENCY_MS` - Simulated sign-in/registration latency (default: 500)
//! - `STOREFRONT_PAYMENT_LATENCY_MS` - Simulated payment latency (default: 2000)
//! - `STOREFRONT_RATE_LIMIT` - Rate limit auth and newsletter endpoints (default: true)
//! - `STOREFRONT_SESSION_CAPACITY` - Most sessions held in memory (default: 100000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Fraction of error events sent (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Fraction of transactions traced (default: 0.0)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_AUTH_LATENCY_MS: u64 = 500;
const DEFAULT_PAYMENT_LATENCY_MS: u64 = 2000;
const DEFAULT_SESSION_CAPACITY: u64 = 100_000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Optional JSON catalog file
    pub catalog_path: Option<PathBuf>,
    /// Delay applied by the demo auth provider
    pub auth_latency: Duration,
    /// Delay applied by the mock payment gateway
    pub payment_latency: Duration,
    /// Whether auth and newsletter endpoints are rate limited
    pub rate_limit: bool,
    /// Most sessions held in memory before the least recently used are evicted
    pub session_capacity: u64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

impl Default for StorefrontConfig {
    /// Local development defaults.
    ///
    /// # Panics
    ///
    /// Panics if `DEFAULT_BASE_URL` is not a valid URL.
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            catalog_path: None,
            auth_latency: Duration::from_millis(DEFAULT_AUTH_LATENCY_MS),
            payment_latency: Duration::from_millis(DEFAULT_PAYMENT_LATENCY_MS),
            rate_limit: true,
            session_capacity: DEFAULT_SESSION_CAPACITY,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let host = parse_env("STOREFRONT_HOST", defaults.host, |v| v.parse::<IpAddr>())?;
        let port = parse_env("STOREFRONT_PORT", defaults.port, |v| v.parse::<u16>())?;
        let base_url = parse_env("STOREFRONT_BASE_URL", defaults.base_url, parse_base_url)?;
        let catalog_path = get_optional_env("STOREFRONT_CATALOG_PATH").map(PathBuf::from);
        let auth_latency = parse_env("STOREFRONT_AUTH_LATENCY_MS", defaults.auth_latency, |v| {
            v.parse::<u64>().map(Duration::from_millis)
        })?;
        let payment_latency =
            parse_env("STOREFRONT_PAYMENT_LATENCY_MS", defaults.payment_latency, |v| {
                v.parse::<u64>().map(Duration::from_millis)
            })?;
        let rate_limit = parse_env("STOREFRONT_RATE_LIMIT", defaults.rate_limit, parse_bool)?;
        let session_capacity = parse_env(
            "STOREFRONT_SESSION_CAPACITY",
            defaults.session_capacity,
            parse_capacity,
        )?;
        let sentry_sample_rate = parse_env("SENTRY_SAMPLE_RATE", defaults.sentry_sample_rate, parse_rate)?;
        let sentry_traces_sample_rate = parse_env(
            "SENTRY_TRACES_SAMPLE_RATE",
            defaults.sentry_traces_sample_rate,
            parse_rate,
        )?;

        Ok(Self {
            host,
            port,
            base_url,
            catalog_path,
            auth_latency,
            payment_latency,
            rate_limit,
            session_capacity,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS (secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional, non-empty environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an optional environment variable, falling back to `default` when unset.
fn parse_env<T, E: std::fmt::Display>(
    key: &str,
    default: T,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> Result<T, ConfigError> {
    match get_optional_env(key) {
        Some(value) => {
            parse(value.trim()).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        }
        None => Ok(default),
    }
}

/// Parse a base URL, requiring an http(s) scheme and a host.
fn parse_base_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("base URL must have a host".to_string());
    }
    Ok(url)
}

/// Parse a boolean flag (`true/false`, `1/0`, `yes/no`, `on/off`).
fn parse_bool(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(format!("expected a boolean, got '{other}'")),
    }
}

/// Parse a positive capacity.
fn parse_capacity(value: &str) -> Result<u64, String> {
    match value.parse::<u64>().map_err(|e| e.to_string())? {
        0 => Err("capacity must be at least 1".to_string()),
        capacity => Ok(capacity),
    }
}

/// Parse a sample rate in `0.0..=1.0`.
fn parse_rate(value: &str) -> Result<f32, String> {
    let rate = value.parse::<f32>().map_err(|e| e.to_string())?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(format!("{rate} is outside 0.0..=1.0"));
    }
    Ok(rate)
}
