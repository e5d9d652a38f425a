// # Review Source Trait
//
// Defines the interface for fetching homework review payloads.
//
// ## Implementations
//
// - Practicum homework API: `revwatch-source-practicum` crate
// - Future: other review platforms with a compatible payload shape
//
// ## Usage
//
// ```rust,ignore
// use revwatch_core::ReviewSource;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* ReviewSource implementation */;
//
//     // Fetch everything that changed since the cursor
//     let payload = source.fetch(1_700_000_000).await?;
//     println!("payload: {payload}");
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use serde_json::Value;

/// Trait for review source implementations
///
/// A review source performs exactly one HTTP request per call and returns
/// the payload as parsed, uninterpreted JSON. Shape validation belongs to
/// the engine, which applies the same checks to every source.
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// ## Allowed Capabilities
/// - ✅ Perform HTTP calls to their configured endpoint only
/// - ✅ Parse the response body as JSON
/// - ✅ Return an error (the engine owns recovery and notification)
///
/// ## Forbidden Capabilities
/// - ❌ Interpret payload contents (owned by the engine)
/// - ❌ Implement retry logic or sleeping (owned by the engine)
/// - ❌ Send notifications (use `Notifier`)
/// - ❌ Spawn tasks or cache state between calls
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// Fetch review statuses changed since the given cursor.
    ///
    /// # Parameters
    ///
    /// - `from_date`: cursor as Unix seconds; `0` means "now" and yields an
    ///   empty change window on healthy servers
    ///
    /// # Returns
    ///
    /// - `Ok(Value)`: the parsed response payload, shape unchecked
    /// - `Err(Error::EndpointUnavailable)`: transport failure, non-200
    ///   status, or a body that is not JSON
    async fn fetch(&self, from_date: i64) -> Result<Value, crate::Error>;

    /// Get the source name (for logging/debugging)
    fn source_name(&self) -> &'static str;
}

/// Helper trait for constructing review sources from configuration
pub trait ReviewSourceFactory: Send + Sync {
    /// Create a ReviewSource instance from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Configuration specific to this source type
    ///
    /// # Returns
    ///
    /// A boxed ReviewSource trait object
    fn create(
        &self,
        config: &crate::config::ReviewSourceConfig,
    ) -> Result<Box<dyn ReviewSource>, crate::Error>;
}
