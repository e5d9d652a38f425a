// # revwatchd - Homework Review Watcher Daemon
//
// The daemon is a thin integration layer: it contains no polling,
// diffing, or notification logic of its own. All of that lives in
// revwatch-core; revwatchd only wires configured components together.
//
// The revwatchd daemon is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing the runtime
// 3. Registering review sources and notifiers
// 4. Starting the watcher engine
//
// ## Configuration
//
// All configuration is done via environment variables. A `.env` file in
// the working directory is loaded first, if present.
//
// ### Required
// - `PRACTICUM_TOKEN`: OAuth token for the homework review API
// - `TELEGRAM_TOKEN`: Telegram bot token used to deliver notifications
// - `TELEGRAM_CHAT_ID`: Chat that receives the notifications
//
// ### Optional
// - `REVWATCH_ENDPOINT`: Override for the homework statuses URL
// - `REVWATCH_POLL_INTERVAL`: Poll interval in seconds (default: 600)
// - `REVWATCH_LOG_LEVEL`: Log level (trace, debug, info, warn, error)
//
// ## Example
//
// ```bash
// export PRACTICUM_TOKEN=y0_AgAAAABNn1EqAAYckQAAAADV8IP1
// export TELEGRAM_TOKEN=110201543:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw
// export TELEGRAM_CHAT_ID=123456789
//
// revwatchd
// ```

use anyhow::Result;
use std::env;
use std::process::ExitCode;
use tracing::{Level, debug, error, info};
use tracing_subscriber::FmtSubscriber;

use revwatch_core::{
    ComponentRegistry, NotifierConfig, RevwatchConfig, RevwatchEngine, ReviewSourceConfig,
};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum RevwatchExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<RevwatchExitCode> for ExitCode {
    fn from(code: RevwatchExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    practicum_token: Option<String>,
    telegram_token: Option<String>,
    telegram_chat_id: Option<String>,
    endpoint: Option<String>,
    poll_interval_secs: Option<u64>,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Variables set to an empty string count as absent, so an
    /// `export PRACTICUM_TOKEN=` typo is caught the same way as a
    /// missing variable.
    fn from_env() -> Self {
        Self {
            practicum_token: env::var("PRACTICUM_TOKEN").ok().filter(|s| !s.is_empty()),
            telegram_token: env::var("TELEGRAM_TOKEN").ok().filter(|s| !s.is_empty()),
            telegram_chat_id: env::var("TELEGRAM_CHAT_ID").ok().filter(|s| !s.is_empty()),
            endpoint: env::var("REVWATCH_ENDPOINT").ok().filter(|s| !s.is_empty()),
            poll_interval_secs: env::var("REVWATCH_POLL_INTERVAL")
                .ok()
                .map(|s| s.parse().unwrap_or(600)),
            log_level: env::var("REVWATCH_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Names of required variables that are absent from the environment
    fn missing_secrets(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.practicum_token.is_none() {
            missing.push("PRACTICUM_TOKEN");
        }
        if self.telegram_token.is_none() {
            missing.push("TELEGRAM_TOKEN");
        }
        if self.telegram_chat_id.is_none() {
            missing.push("TELEGRAM_CHAT_ID");
        }

        missing
    }

    /// Validate the configuration
    ///
    /// This checks value formats only; required-variable presence is
    /// reported separately so it can be logged through tracing.
    fn validate(&self) -> Result<()> {
        // Validate poll interval range
        if let Some(interval) = self.poll_interval_secs
            && !(1..=86400).contains(&interval)
        {
            anyhow::bail!(
                "REVWATCH_POLL_INTERVAL must be between 1 and 86400 seconds. Got: {}",
                interval
            );
        }

        // Validate endpoint URL scheme
        if let Some(ref url) = self.endpoint {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                anyhow::bail!(
                    "REVWATCH_ENDPOINT must use HTTP or HTTPS scheme. Got: {}",
                    url
                );
            }

            // Warn if using HTTP (not HTTPS)
            if url.starts_with("http://") {
                eprintln!(
                    "WARNING: REVWATCH_ENDPOINT uses HTTP (not HTTPS). \
                          This is less secure. Consider using HTTPS."
                );
            }
        }

        // Validate log level
        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "REVWATCH_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }
}

fn main() -> ExitCode {
    // A .env file in the working directory supplies any unset variables
    dotenvy::dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return RevwatchExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return RevwatchExitCode::ConfigError.into();
    }

    // The one fatal condition: no credentials, no loop
    let missing = config.missing_secrets();
    if !missing.is_empty() {
        error!(
            "Отсутствуют необходимые переменные окружения: {}",
            missing.join(", ")
        );
        return RevwatchExitCode::ConfigError.into();
    }

    info!("Starting revwatchd daemon");

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return RevwatchExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run_daemon(config).await {
            error!("Daemon error: {}", e);
            RevwatchExitCode::RuntimeError
        } else {
            RevwatchExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Run the daemon
async fn run_daemon(config: Config) -> Result<()> {
    // Create component registry
    let registry = ComponentRegistry::new();

    // Register built-in components
    #[cfg(feature = "practicum")]
    {
        info!("Registering Practicum review source");
        revwatch_source_practicum::register(&registry);
    }

    #[cfg(feature = "telegram")]
    {
        info!("Registering Telegram notifier");
        revwatch_notify_telegram::register(&registry);
    }

    // Presence was already checked in main(); these guards only matter
    // if someone rewires the startup sequence.
    let practicum_token = config
        .practicum_token
        .ok_or_else(|| anyhow::anyhow!("PRACTICUM_TOKEN is not set"))?;
    let telegram_token = config
        .telegram_token
        .ok_or_else(|| anyhow::anyhow!("TELEGRAM_TOKEN is not set"))?;
    let telegram_chat_id = config
        .telegram_chat_id
        .ok_or_else(|| anyhow::anyhow!("TELEGRAM_CHAT_ID is not set"))?;

    let mut revwatch_config = RevwatchConfig::new(
        ReviewSourceConfig::Practicum {
            endpoint: config.endpoint,
            token: practicum_token,
        },
        NotifierConfig::Telegram {
            bot_token: telegram_token,
            chat_id: telegram_chat_id,
        },
    );

    if let Some(interval) = config.poll_interval_secs {
        revwatch_config.engine.poll_interval_secs = interval;
    }

    info!("Review source type: {}", revwatch_config.source.type_name());
    info!("Notifier type: {}", revwatch_config.notifier.type_name());
    info!(
        "Poll interval: {}s",
        revwatch_config.engine.poll_interval_secs
    );

    // Create components from config
    let source = registry.create_source(&revwatch_config.source)?;
    let notifier = registry.create_notifier(&revwatch_config.notifier)?;

    let (mut engine, mut events) = RevwatchEngine::new(source, notifier, revwatch_config)?;

    // Drain engine events so the bounded channel never overflows
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            debug!("Engine event: {:?}", event);
        }
    });

    info!("Starting review watcher engine");
    engine.run().await?;

    info!("Daemon shut down cleanly");
    Ok(())
}
