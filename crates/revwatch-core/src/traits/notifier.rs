// # Notifier Trait
//
// Defines the interface for delivering user-facing messages.
//
// ## Implementations
//
// - Telegram Bot API: `revwatch-notify-telegram` crate
// - Future: email, webhooks, other chat platforms
//
// ## Usage
//
// ```rust,ignore
// use revwatch_core::Notifier;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let notifier = /* Notifier implementation */;
//
//     notifier.send("Работа взята на проверку ревьюером.").await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

/// Trait for notification channel implementations
///
/// A notifier delivers one plain-text message per call to its configured
/// destination. Failures are reported as `Error::Delivery`; the engine logs
/// and swallows them, so a broken channel never stops the polling loop.
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// ## Allowed Capabilities
/// - ✅ Perform HTTP calls to their messaging endpoint only
/// - ✅ Return success or failure for a single delivery attempt
///
/// ## Forbidden Capabilities
/// - ❌ Retry or queue messages (delivery is single-shot)
/// - ❌ Rewrite or truncate message text
/// - ❌ Decide which messages to send (owned by the engine)
/// - ❌ Spawn tasks or cache state between calls
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one message to the configured destination.
    ///
    /// # Parameters
    ///
    /// - `text`: the message body, sent verbatim
    ///
    /// # Returns
    ///
    /// - `Ok(())`: the channel accepted the message
    /// - `Err(Error::Delivery)`: transport failure or channel rejection
    async fn send(&self, text: &str) -> Result<(), crate::Error>;

    /// Get the notifier name (for logging/debugging)
    fn notifier_name(&self) -> &'static str;
}

/// Helper trait for constructing notifiers from configuration
pub trait NotifierFactory: Send + Sync {
    /// Create a Notifier instance from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Configuration specific to this notifier type
    ///
    /// # Returns
    ///
    /// A boxed Notifier trait object
    fn create(
        &self,
        config: &crate::config::NotifierConfig,
    ) -> Result<Box<dyn Notifier>, crate::Error>;
}
