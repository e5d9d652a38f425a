//! Plugin-based component registry
//!
//! The registry allows review sources and notifiers to be registered
//! dynamically at runtime, avoiding hardcoded if-else chains.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use revwatch_core::registry::ComponentRegistry;
//! use revwatch_core::config::ReviewSourceConfig;
//!
//! // Create a registry
//! let registry = ComponentRegistry::new();
//!
//! // Register components
//! registry.register_source("practicum", Box::new(practicum_factory));
//!
//! // Create a source from config
//! let config = ReviewSourceConfig::Practicum { .. };
//! let source = registry.create_source(&config)?;
//! ```
//!
//! ## Registration
//!
//! Implementations should register themselves during initialization:
//!
//! ```rust,ignore
//! # use revwatch_core::registry::ComponentRegistry;
//!
//! // In revwatch-source-practicum crate
//! pub fn register(registry: &ComponentRegistry) {
//!     registry.register_source("practicum", Box::new(PracticumSourceFactory));
//! }
//! ```

use crate::config::{NotifierConfig, ReviewSourceConfig};
use crate::error::{Error, Result};
use crate::traits::{Notifier, NotifierFactory, ReviewSource, ReviewSourceFactory};
use std::collections::HashMap;
use std::sync::RwLock;

/// Component registry for plugin-based source and notifier creation
///
/// The registry maintains maps of component type names to factory objects,
/// allowing dynamic instantiation based on configuration.
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct ComponentRegistry {
    /// Registered review source factories
    sources: RwLock<HashMap<String, Box<dyn ReviewSourceFactory>>>,

    /// Registered notifier factories
    notifiers: RwLock<HashMap<String, Box<dyn NotifierFactory>>>,
}

impl ComponentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a review source factory
    ///
    /// # Parameters
    ///
    /// - `name`: Source type name (e.g., "practicum")
    /// - `factory`: Factory object for creating source instances
    pub fn register_source(&self, name: impl Into<String>, factory: Box<dyn ReviewSourceFactory>) {
        let name = name.into();
        let mut sources = self.sources.write().unwrap();
        sources.insert(name, factory);
    }

    /// Register a notifier factory
    ///
    /// # Parameters
    ///
    /// - `name`: Notifier type name (e.g., "telegram")
    /// - `factory`: Factory object for creating notifier instances
    pub fn register_notifier(&self, name: impl Into<String>, factory: Box<dyn NotifierFactory>) {
        let name = name.into();
        let mut notifiers = self.notifiers.write().unwrap();
        notifiers.insert(name, factory);
    }

    /// Create a review source from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Review source configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn ReviewSource>)`: Created source instance
    /// - `Err(Error)`: If the source type is not registered or creation fails
    pub fn create_source(&self, config: &ReviewSourceConfig) -> Result<Box<dyn ReviewSource>> {
        let source_type = config.type_name();
        let sources = self.sources.read().unwrap();

        let factory = sources.get(source_type).ok_or_else(|| {
            Error::configuration(format!("Unknown source type: {}", source_type))
        })?;

        factory.create(config)
    }

    /// Create a notifier from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Notifier configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn Notifier>)`: Created notifier instance
    /// - `Err(Error)`: If the notifier type is not registered or creation fails
    pub fn create_notifier(&self, config: &NotifierConfig) -> Result<Box<dyn Notifier>> {
        let notifier_type = config.type_name();
        let notifiers = self.notifiers.read().unwrap();

        let factory = notifiers.get(notifier_type).ok_or_else(|| {
            Error::configuration(format!("Unknown notifier type: {}", notifier_type))
        })?;

        factory.create(config)
    }

    /// List all registered source types
    pub fn list_sources(&self) -> Vec<String> {
        let sources = self.sources.read().unwrap();
        sources.keys().cloned().collect()
    }

    /// List all registered notifier types
    pub fn list_notifiers(&self) -> Vec<String> {
        let notifiers = self.notifiers.read().unwrap();
        notifiers.keys().cloned().collect()
    }

    /// Check if a source type is registered
    pub fn has_source(&self, name: &str) -> bool {
        let sources = self.sources.read().unwrap();
        sources.contains_key(name)
    }

    /// Check if a notifier type is registered
    pub fn has_notifier(&self, name: &str) -> bool {
        let notifiers = self.notifiers.read().unwrap();
        notifiers.contains_key(name)
    }
}
