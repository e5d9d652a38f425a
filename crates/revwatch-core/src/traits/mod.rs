//! Core traits for the revwatch system
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`ReviewSource`]: Poll a review API for homework status payloads
//! - [`Notifier`]: Deliver user-facing messages to a chat channel

pub mod notifier;
pub mod review_source;

pub use notifier::{Notifier, NotifierFactory};
pub use review_source::{ReviewSource, ReviewSourceFactory};
