// # Telegram Notifier
//
// This crate provides a Telegram Bot API notifier implementation for revwatch.
//
// ## Implementation Notes
//
// - ✅ Makes one HTTP request per delivery (no retry - owned by RevwatchEngine)
// - ✅ Full error propagation to engine (engine logs and swallows delivery failures)
// - ✅ HTTP timeout configured (30 seconds)
// - ✅ Checks both the HTTP status and the `ok` flag in the API response
// - ❌ NO retry logic (intentionally omitted - owned by RevwatchEngine)
// - ❌ NO message queueing (delivery is single-shot)
// - ❌ NO background tasks
//
// ## Security Requirements
//
// - Bot token NEVER appears in logs (it is part of the request URL, so
//   transport errors are stripped of their URL before formatting)
// - Notifier MUST fail fast if token is empty
//
// ## API Reference
//
// - Telegram Bot API: https://core.telegram.org/bots/api
// - Send Message: POST `/bot<token>/sendMessage` with `{"chat_id": ..., "text": ...}`
// - Success response: `{"ok": true, "result": {...}}`

use async_trait::async_trait;
use revwatch_core::config::NotifierConfig;
use revwatch_core::traits::{Notifier, NotifierFactory};
use revwatch_core::{ComponentRegistry, Error, Result};
use serde_json::Value;
use std::time::Duration;

/// Telegram Bot API base URL
const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Telegram Bot API notifier
///
/// Delivers plain-text messages to one fixed chat via `sendMessage`.
/// A delivery attempt fails when the transport errors, the HTTP status is
/// not successful, or the API responds with `ok: false`.
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the bot token.
pub struct TelegramNotifier {
    /// Bot token issued by BotFather
    /// ⚠️ NEVER log this value (it is embedded in request URLs)
    bot_token: String,

    /// Destination chat: numeric id or @channel name
    chat_id: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the bot token
impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("bot_token", &"<REDACTED>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    /// Create a new Telegram notifier
    ///
    /// # Parameters
    ///
    /// - `bot_token`: bot token issued by BotFather
    /// - `chat_id`: destination chat id or @channel name
    ///
    /// # Panics
    ///
    /// Panics when the bot token is empty; use the factory for fallible
    /// construction from configuration.
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        let bot_token = bot_token.into();

        if bot_token.is_empty() {
            panic!("Telegram bot token cannot be empty");
        }

        // Build HTTP client with timeout
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            bot_token,
            chat_id: chat_id.into(),
            client,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    /// Deliver one message to the configured chat
    ///
    /// This implementation:
    /// - Makes ONE HTTP request per call (no retry - owned by the engine)
    /// - Never logs the bot token; transport errors are stripped of the URL
    /// - Treats `ok: false` as a failure even under HTTP 200
    ///
    /// # API Call
    ///
    /// ```http
    /// POST /bot<token>/sendMessage
    /// {"chat_id": "<chat>", "text": "<message>"}
    /// ```
    async fn send(&self, text: &str) -> Result<()> {
        tracing::debug!("Sending Telegram message to chat {}", self.chat_id);

        let url = format!("{}/bot{}/sendMessage", TELEGRAM_API_BASE, self.bot_token);
        let payload = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        // without_url: the URL embeds the bot token and must not surface in
        // error text
        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                Error::delivery(format!("Telegram request failed: {}", e.without_url()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let description = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("description")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| "no description".to_string());

            return Err(Error::delivery(format!(
                "Telegram API error {}: {}",
                status.as_u16(),
                description
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            Error::delivery(format!("Failed to parse Telegram response: {}", e.without_url()))
        })?;

        if body.get("ok").and_then(Value::as_bool) != Some(true) {
            let description = body
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("no description");
            return Err(Error::delivery(format!(
                "Telegram rejected the message: {}",
                description
            )));
        }

        Ok(())
    }

    fn notifier_name(&self) -> &'static str {
        "telegram"
    }
}

/// Factory for creating Telegram notifiers
pub struct TelegramNotifierFactory;

impl NotifierFactory for TelegramNotifierFactory {
    fn create(&self, config: &NotifierConfig) -> Result<Box<dyn Notifier>> {
        match config {
            NotifierConfig::Telegram { bot_token, chat_id } => {
                if bot_token.is_empty() {
                    return Err(Error::configuration("Telegram bot token is required"));
                }
                if chat_id.is_empty() {
                    return Err(Error::configuration("Telegram chat id is required"));
                }

                Ok(Box::new(TelegramNotifier::new(
                    bot_token.clone(),
                    chat_id.clone(),
                )))
            }
            _ => Err(Error::configuration("Invalid config for Telegram notifier")),
        }
    }
}

/// Register the Telegram notifier with a registry
///
/// This function should be called during initialization to make the
/// Telegram notifier available.
///
/// # Example
///
/// ```rust
/// use revwatch_core::ComponentRegistry;
///
/// let registry = ComponentRegistry::new();
/// revwatch_notify_telegram::register(&registry);
/// ```
pub fn register(registry: &ComponentRegistry) {
    registry.register_notifier("telegram", Box::new(TelegramNotifierFactory));
}
