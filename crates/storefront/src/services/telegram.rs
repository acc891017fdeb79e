//! Telegram Bot API client for order notifications.
//!
//! New orders are announced to a staff chat via the Bot API `sendMessage`
//! method. Notifications are best-effort: the checkout flow logs failures
//! and moves on, so nothing here is allowed to fail an order.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

use greenridge_core::stores::Notifier;

use crate::config::TelegramConfig;

/// Telegram Bot API base URL.
const BASE_URL: &str = "https://api.telegram.org";

/// Per-request timeout; a slow Telegram must not hold up checkout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors that can occur when sending a Telegram notification.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// HTTP request failed (includes timeouts).
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// API answered 200 but flagged the request as failed.
    #[error("API rejected message: {0}")]
    Rejected(String),

    /// Failed to parse the response envelope.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Notifications are not configured.
    #[error("Telegram notifications are disabled")]
    Disabled,
}

/// Low-level `sendMessage` client.
#[derive(Clone)]
pub struct TelegramSender {
    client: reqwest::Client,
    bot_token: SecretString,
    chat_id: String,
    base_url: String,
}

impl TelegramSender {
    /// Create a sender from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &TelegramConfig) -> Result<Self, TelegramError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(TelegramError::Http)?;

        Ok(Self {
            client,
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
            base_url: config
                .api_base
                .clone()
                .unwrap_or_else(|| BASE_URL.to_string()),
        })
    }

    /// Send a Markdown-formatted message to the configured chat.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, times out, or the API reports
    /// the message as not sent.
    pub async fn send_message(&self, text: &str) -> Result<(), TelegramError> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.base_url,
            self.bot_token.expose_secret()
        );

        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "Markdown",
        });

        // The bot token is part of the URL path; strip URLs from transport
        // errors so the token never reaches logs or Sentry.
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TelegramError::Http(e.without_url()))?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TelegramError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiEnvelope = response
            .json()
            .await
            .map_err(|e| TelegramError::Parse(e.without_url().to_string()))?;

        if !envelope.ok {
            return Err(TelegramError::Rejected(
                envelope
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            ));
        }

        Ok(())
    }
}

/// Response envelope common to all Bot API methods.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    ok: bool,
    description: Option<String>,
}

/// Order notifier backed by [`TelegramSender`].
///
/// Carries `None` when notifications are not configured, in which case
/// every send reports [`TelegramError::Disabled`]; checkout treats that
/// like any other notification failure.
#[derive(Clone)]
pub struct TelegramNotifier {
    sender: Option<TelegramSender>,
}

impl TelegramNotifier {
    /// Build a notifier; `None` config produces a disabled notifier.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn from_config(config: Option<&TelegramConfig>) -> Result<Self, TelegramError> {
        let sender = config.map(TelegramSender::new).transpose()?;
        Ok(Self { sender })
    }

    /// A notifier that drops every message.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { sender: None }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }
}

impl Notifier for TelegramNotifier {
    type Error = TelegramError;

    async fn send(&self, message: &str) -> Result<(), TelegramError> {
        match &self.sender {
            Some(sender) => sender.send_message(message).await,
            None => Err(TelegramError::Disabled),
        }
    }
}
