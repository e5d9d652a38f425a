//! Configuration types for the revwatch system
//!
//! This module defines all configuration structures used throughout the crate.

use serde::{Deserialize, Serialize};

/// Main revwatch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevwatchConfig {
    /// Review source configuration
    pub source: ReviewSourceConfig,

    /// Notification channel configuration
    pub notifier: NotifierConfig,

    /// Optional engine settings
    #[serde(default)]
    pub engine: EngineConfig,
}

impl RevwatchConfig {
    /// Create a configuration from source and notifier settings
    pub fn new(source: ReviewSourceConfig, notifier: NotifierConfig) -> Self {
        Self {
            source,
            notifier,
            engine: EngineConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.source.validate()?;
        self.notifier.validate()?;
        self.engine.validate()?;
        Ok(())
    }
}

/// Review source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReviewSourceConfig {
    /// Practicum homework status API
    Practicum {
        /// Endpoint URL override; the production endpoint when omitted
        #[serde(default)]
        endpoint: Option<String>,
        /// OAuth token for the homework API
        token: String,
    },

    /// Custom review source
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl ReviewSourceConfig {
    /// Validate the review source configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ReviewSourceConfig::Practicum { endpoint, token } => {
                if token.is_empty() {
                    return Err(crate::Error::configuration(
                        "Practicum API token cannot be empty",
                    ));
                }
                if matches!(endpoint.as_deref(), Some("")) {
                    return Err(crate::Error::configuration(
                        "Practicum endpoint override cannot be empty",
                    ));
                }
                Ok(())
            }
            ReviewSourceConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::configuration(
                        "Custom source factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::configuration(
                        "Custom source config cannot be null",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the source type name
    pub fn type_name(&self) -> &str {
        match self {
            ReviewSourceConfig::Practicum { .. } => "practicum",
            ReviewSourceConfig::Custom { factory, .. } => factory,
        }
    }
}

/// Notification channel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotifierConfig {
    /// Telegram Bot API notifier
    Telegram {
        /// Bot token issued by BotFather
        bot_token: String,
        /// Destination chat: numeric id or @channel name
        chat_id: String,
    },

    /// Custom notifier
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl NotifierConfig {
    /// Validate the notifier configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            NotifierConfig::Telegram { bot_token, chat_id } => {
                if bot_token.is_empty() {
                    return Err(crate::Error::configuration(
                        "Telegram bot token cannot be empty",
                    ));
                }
                if chat_id.is_empty() {
                    return Err(crate::Error::configuration(
                        "Telegram chat id cannot be empty",
                    ));
                }
                Ok(())
            }
            NotifierConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::configuration(
                        "Custom notifier factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::configuration(
                        "Custom notifier config cannot be null",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the notifier type name
    pub fn type_name(&self) -> &str {
        match self {
            NotifierConfig::Telegram { .. } => "telegram",
            NotifierConfig::Custom { factory, .. } => factory,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seconds between poll cycles
    ///
    /// The sleep is unconditional: it runs after successful and failed
    /// cycles alike.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Capacity of the internal event channel
    ///
    /// When full, new engine events will be dropped (with a warning log).
    /// This prevents unbounded memory growth when nobody drains the channel.
    ///
    /// Default: 1000 events
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

impl EngineConfig {
    /// Validate the engine configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.poll_interval_secs == 0 {
            return Err(crate::Error::configuration("Poll interval must be > 0"));
        }
        if self.event_channel_capacity == 0 {
            return Err(crate::Error::configuration(
                "Event channel capacity must be > 0",
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            event_channel_capacity: default_event_channel_capacity(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    600
}

fn default_event_channel_capacity() -> usize {
    1000
}
