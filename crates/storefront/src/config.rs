//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: http://localhost:3000)
//! - `ORDER_CHANNEL` - Where submitted orders go: `clipboard`, `email`, or `log` (default: clipboard)
//! - `ORDER_EMAIL_RECIPIENT` - Inbox for email handoffs (default: orders@solegifts.example)
//! - `CATALOG_PATH` - YAML catalog file; the built-in sample catalog is used when unset
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use sole_gifts_core::Email;
use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_ORDER_RECIPIENT: &str = "orders@solegifts.example";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Channel that receives submitted orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderChannel {
    /// Write the order text to the system clipboard.
    #[default]
    Clipboard,
    /// Open a pre-filled email to the order inbox.
    Email,
    /// Record the order in the application log.
    Log,
}

impl OrderChannel {
    /// Lowercase name as used in configuration.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clipboard => "clipboard",
            Self::Email => "email",
            Self::Log => "log",
        }
    }

    /// Label for the order sheet's submit button.
    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        match self {
            Self::Clipboard => "Copy order to clipboard",
            Self::Email => "Email order",
            Self::Log => "Send order",
        }
    }
}

impl fmt::Display for OrderChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clipboard" => Ok(Self::Clipboard),
            "email" => Ok(Self::Email),
            "log" => Ok(Self::Log),
            other => Err(format!(
                "unknown channel '{other}' (expected clipboard, email, or log)"
            )),
        }
    }
}

/// Quick-order handoff configuration.
#[derive(Debug, Clone)]
pub struct OrderConfig {
    /// Channel that receives submitted orders
    pub channel: OrderChannel,
    /// Recipient of email handoffs
    pub recipient: Email,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            channel: OrderChannel::default(),
            recipient: Email::parse(DEFAULT_ORDER_RECIPIENT)
                .unwrap_or_else(|_| unreachable!("default recipient is a valid address")),
        }
    }
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
    /// Quick-order handoff settings
    pub order: OrderConfig,
    /// Optional YAML catalog file
    pub catalog_path: Option<PathBuf>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry performance trace sample rate
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        let host = env.parse_or("STOREFRONT_HOST", "127.0.0.1")?;
        let port = env.parse_or("STOREFRONT_PORT", "3000")?;
        let base_url = env.parse_or("STOREFRONT_BASE_URL", DEFAULT_BASE_URL)?;
        let order = OrderConfig {
            channel: env.parse_or("ORDER_CHANNEL", OrderChannel::Clipboard.as_str())?,
            recipient: env.parse_or("ORDER_EMAIL_RECIPIENT", DEFAULT_ORDER_RECIPIENT)?,
        };
        let catalog_path = env.optional("CATALOG_PATH").map(PathBuf::from);

        Ok(Self {
            host,
            port,
            base_url,
            order,
            catalog_path,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env.parse_or("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: env.parse_or("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
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

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: Url::parse(DEFAULT_BASE_URL)
                .unwrap_or_else(|_| unreachable!("default base url is valid")),
            order: OrderConfig::default(),
            catalog_path: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Environment lookup with typed accessors.
struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional, non-blank variable.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let raw = self.optional(key).unwrap_or_else(|| default.to_string());
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.order.channel, OrderChannel::Clipboard);
        assert_eq!(config.order.recipient.as_str(), "orders@solegifts.example");
        assert!(config.catalog_path.is_none());
        assert!(!config.is_secure());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOREFRONT_PORT", "8080"),
            ("STOREFRONT_BASE_URL", "https://solegifts.example"),
            ("ORDER_CHANNEL", "Email"),
            ("ORDER_EMAIL_RECIPIENT", "hello@solegifts.example"),
            ("CATALOG_PATH", "catalog.yaml"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.is_secure());
        assert_eq!(config.order.channel, OrderChannel::Email);
        assert_eq!(config.order.recipient.as_str(), "hello@solegifts.example");
        assert_eq!(config.catalog_path, Some(PathBuf::from("catalog.yaml")));
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = load(&[("ORDER_CHANNEL", "  "), ("CATALOG_PATH", "")]).unwrap();
        assert_eq!(config.order.channel, OrderChannel::Clipboard);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_invalid_channel() {
        let err = load(&[("ORDER_CHANNEL", "fax")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "ORDER_CHANNEL"));
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("STOREFRONT_PORT", "70000")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_invalid_recipient() {
        let err = load(&[("ORDER_EMAIL_RECIPIENT", "orders")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "ORDER_EMAIL_RECIPIENT"));
    }

    #[test]
    fn test_channel_labels() {
        assert_eq!(OrderChannel::Clipboard.submit_label(), "Copy order to clipboard");
        assert_eq!("LOG".parse::<OrderChannel>().unwrap(), OrderChannel::Log);
    }

    #[test]
    fn test_default_matches_empty_env() {
        let from_env = load(&[]).unwrap();
        let default = StorefrontConfig::default();
        assert_eq!(from_env.socket_addr(), default.socket_addr());
        assert_eq!(from_env.base_url, default.base_url);
        assert_eq!(from_env.order.recipient, default.order.recipient);
    }
}
