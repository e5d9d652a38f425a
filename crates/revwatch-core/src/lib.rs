// # revwatch-core
//
// Core library for the homework-review status notifier.
//
// ## Architecture Overview
//
// This library provides the core functionality for review polling:
// - **ReviewSource**: Trait for fetching homework status payloads
// - **Notifier**: Trait for delivering user-facing messages
// - **RevwatchEngine**: Core engine that orchestrates the poll → validate → diff → notify cycle
// - **ComponentRegistry**: Plugin-based registry for sources and notifiers
// - **StatusLedger / ErrorTracker**: In-memory state owned by the loop
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from implementations
// 2. **Single Task**: One polling loop owns all mutable state, no locking
// 3. **Plugin-Based**: Components are registered dynamically, no hard-coded if-else
// 4. **Library-First**: All core functionality can be used as a library
// 5. **Errors Never Escape**: Cycle errors are formatted, deduplicated, and notified

pub mod traits;
pub mod engine;
pub mod registry;
pub mod config;
pub mod error;
pub mod review;
pub mod state;

// Re-export core types for convenience
pub use traits::{Notifier, ReviewSource};
pub use engine::{EngineEvent, RevwatchEngine};
pub use registry::ComponentRegistry;
pub use config::{NotifierConfig, RevwatchConfig, ReviewSourceConfig};
pub use error::{Error, Result};
pub use review::{homework_list, HomeworkStatus, StatusCheck};
pub use state::{ErrorTracker, StatusLedger};
