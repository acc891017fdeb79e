//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string (falls back
//!   to `DATABASE_URL`)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: `http://127.0.0.1:3000`);
//!   an `https` URL turns on secure session cookies
//! - `FREE_SHIPPING_THRESHOLD` - Subtotal at which shipping is free (default: 100)
//! - `FLAT_SHIPPING_COST` - Shipping cost below the threshold (default: 5)
//! - `TELEGRAM_BOT_TOKEN` - Bot token for order notifications
//! - `TELEGRAM_CHAT_ID` - Chat the notifications go to
//! - `TELEGRAM_API_BASE` - Bot API base URL override (tests)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//!
//! Order notifications are optional: when either Telegram variable is
//! missing the notifier is disabled and checkout still works.

use std::net::{IpAddr, SocketAddr};

use greenridge_core::order::ShippingPolicy;
use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Free-shipping threshold and flat rate
    pub shipping: ShippingPolicy,
    /// Telegram order notifications; `None` disables them
    pub telegram: Option<TelegramConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Telegram Bot API configuration.
///
/// Implements `Debug` manually to redact the bot token.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Bot token (the `bot<token>` path segment of every API call)
    pub bot_token: SecretString,
    /// Target chat for order notifications
    pub chat_id: String,
    /// API base URL override; `None` means the public Bot API
    pub api_base: Option<String>,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"[REDACTED]")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the database URL is missing or a variable
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("STOREFRONT_DATABASE_URL")?;
        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_env_or_default("STOREFRONT_BASE_URL", "http://127.0.0.1:3000");

        let shipping = ShippingPolicy {
            free_shipping_threshold: parse_decimal(
                "FREE_SHIPPING_THRESHOLD",
                &get_env_or_default("FREE_SHIPPING_THRESHOLD", "100"),
            )?,
            flat_cost: parse_decimal(
                "FLAT_SHIPPING_COST",
                &get_env_or_default("FLAT_SHIPPING_COST", "5"),
            )?,
        };

        let telegram = TelegramConfig::from_env();
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            shipping,
            telegram,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies should be marked secure.
    #[must_use]
    pub fn use_secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl TelegramConfig {
    /// `None` unless both the bot token and the chat id are set.
    fn from_env() -> Option<Self> {
        let bot_token = get_optional_env("TELEGRAM_BOT_TOKEN")?;
        let chat_id = get_optional_env("TELEGRAM_CHAT_ID")?;
        Some(Self {
            bot_token: SecretString::from(bot_token),
            chat_id,
            api_base: get_optional_env("TELEGRAM_API_BASE"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Database URL, preferring the service-specific variable over the
/// generic `DATABASE_URL` that hosting platforms inject.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    std::env::var(primary_key)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| ConfigError::MissingEnvVar(primary_key.to_string()))
}

fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a decimal-valued variable, keeping the variable name in the error.
fn parse_decimal(key: &str, raw: &str) -> Result<Decimal, ConfigError> {
    raw.parse::<Decimal>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
