// # Practicum Review Source
//
// This crate provides the Practicum homework-status source for revwatch.
//
// ## Implementation Notes
//
// - ✅ Makes one HTTP request per engine cycle
// - ✅ Full error propagation to engine (engine owns recovery and notification)
// - ✅ HTTP timeout configured (30 seconds)
// - ✅ Strict 200 check: any other status is EndpointUnavailable
// - ❌ NO retry logic (owned by RevwatchEngine)
// - ❌ NO payload interpretation (owned by RevwatchEngine)
// - ❌ NO background tasks
//
// ## Security Requirements
//
// - OAuth token NEVER appears in logs
// - Source MUST fail fast if token is empty
//
// ## API Reference
//
// - GET `<endpoint>?from_date=<unix ts>`
// - Header: `Authorization: OAuth <token>`
// - 200 response body: `{"homeworks": [...], "current_date": <unix ts>}`

use async_trait::async_trait;
use revwatch_core::config::ReviewSourceConfig;
use revwatch_core::traits::{ReviewSource, ReviewSourceFactory};
use revwatch_core::{ComponentRegistry, Error, Result};
use serde_json::Value;
use std::time::Duration;

/// Production Practicum homework-status endpoint
pub const PRACTICUM_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Practicum review source
///
/// Performs one GET request per call with `from_date` bounding the change
/// window and OAuth token authentication. Returns the payload as parsed,
/// uninterpreted JSON.
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the OAuth token.
pub struct PracticumSource {
    /// Endpoint URL for homework statuses
    endpoint: String,

    /// OAuth token for the homework API
    /// ⚠️ NEVER log this value
    token: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the OAuth token
impl std::fmt::Debug for PracticumSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumSource")
            .field("endpoint", &self.endpoint)
            .field("token", &"<REDACTED>")
            .finish()
    }
}

impl PracticumSource {
    /// Create a source against the production Practicum endpoint
    ///
    /// # Parameters
    ///
    /// - `token`: OAuth token for the homework API
    ///
    /// # Panics
    ///
    /// Panics when the token is empty; use the factory for fallible
    /// construction from configuration.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_endpoint(token, PRACTICUM_ENDPOINT)
    }

    /// Create a source against a custom endpoint (staging, tests)
    pub fn with_endpoint(token: impl Into<String>, endpoint: impl Into<String>) -> Self {
        let token = token.into();

        if token.is_empty() {
            panic!("Practicum API token cannot be empty");
        }

        // Build HTTP client with timeout
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            endpoint: endpoint.into(),
            token,
            client,
        }
    }
}

#[async_trait]
impl ReviewSource for PracticumSource {
    /// Fetch homework statuses changed since `from_date`
    ///
    /// This implementation:
    /// - Makes ONE HTTP request per call (no retry, no backoff - owned by engine)
    /// - Treats any status other than 200 as unavailability, redirects included
    /// - Never logs the OAuth token
    ///
    /// # API Call
    ///
    /// ```http
    /// GET <endpoint>?from_date=<unix ts>
    /// Authorization: OAuth <token>
    /// ```
    async fn fetch(&self, from_date: i64) -> Result<Value> {
        // A zero cursor means "now": an empty change window on the first poll
        let timestamp = if from_date == 0 {
            chrono::Utc::now().timestamp()
        } else {
            from_date
        };

        tracing::debug!(
            "Requesting homework statuses from {} (from_date={})",
            self.endpoint,
            timestamp
        );

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", timestamp)])
            .send()
            .await
            .map_err(|e| {
                Error::endpoint_unavailable(format!(
                    "Эндпоинт {} недоступен: {}",
                    self.endpoint, e
                ))
            })?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(Error::endpoint_unavailable(format!(
                "Эндпоинт {} недоступен, код ответа: {}",
                self.endpoint,
                response.status().as_u16()
            )));
        }

        // The parse error detail is dropped on purpose: the message is a
        // deduplication key and must not vary between malformed bodies
        response
            .json::<Value>()
            .await
            .map_err(|_| Error::endpoint_unavailable("Сервер вернул тело не в формате JSON"))
    }

    fn source_name(&self) -> &'static str {
        "practicum"
    }
}

/// Factory for creating Practicum sources
pub struct PracticumSourceFactory;

impl ReviewSourceFactory for PracticumSourceFactory {
    fn create(&self, config: &ReviewSourceConfig) -> Result<Box<dyn ReviewSource>> {
        match config {
            ReviewSourceConfig::Practicum { endpoint, token } => {
                if token.is_empty() {
                    return Err(Error::configuration("Practicum API token is required"));
                }

                let source = match endpoint {
                    Some(url) => PracticumSource::with_endpoint(token.clone(), url.clone()),
                    None => PracticumSource::new(token.clone()),
                };

                Ok(Box::new(source))
            }
            _ => Err(Error::configuration("Invalid config for Practicum source")),
        }
    }
}

/// Register the Practicum source with a registry
///
/// This function should be called during initialization to make the
/// Practicum source available.
///
/// # Example
///
/// ```rust
/// use revwatch_core::ComponentRegistry;
///
/// let registry = ComponentRegistry::new();
/// revwatch_source_practicum::register(&registry);
/// ```
pub fn register(registry: &ComponentRegistry) {
    registry.register_source("practicum", Box::new(PracticumSourceFactory));
}
