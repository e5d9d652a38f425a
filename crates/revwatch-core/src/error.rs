//! Error types for the revwatch system
//!
//! The error enum is closed on purpose: the control loop matches on it
//! explicitly, and every variant carries the full human-readable message
//! that downstream deduplication is keyed on. Variants render their payload
//! verbatim, so `error.to_string()` is exactly the text built at the raise
//! site.

use thiserror::Error;

/// Result type alias for revwatch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the revwatch system
#[derive(Error, Debug)]
pub enum Error {
    /// Review endpoint unreachable, returned a non-200 status, or sent an
    /// unparsable body
    #[error("{0}")]
    EndpointUnavailable(String),

    /// Response payload had the wrong shape (not an object, list where an
    /// object was expected, and so on)
    #[error("{0}")]
    TypeMismatch(String),

    /// A required key was absent from the payload or a record
    #[error("{0}")]
    MissingField(String),

    /// Homework status value outside the recognized set
    #[error("{0}")]
    UnknownStatus(String),

    /// Required configuration absent or invalid at startup; fatal
    #[error("{0}")]
    ConfigurationMissing(String),

    /// Notification delivery failure; swallowed at the loop layer
    #[error("{0}")]
    Delivery(String),
}

impl Error {
    /// Create an endpoint availability error
    pub fn endpoint_unavailable(msg: impl Into<String>) -> Self {
        Self::EndpointUnavailable(msg.into())
    }

    /// Create a payload shape error
    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        Self::TypeMismatch(msg.into())
    }

    /// Create a missing key error
    pub fn missing_field(msg: impl Into<String>) -> Self {
        Self::MissingField(msg.into())
    }

    /// Create an unrecognized status error
    pub fn unknown_status(msg: impl Into<String>) -> Self {
        Self::UnknownStatus(msg.into())
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationMissing(msg.into())
    }

    /// Create a delivery error
    pub fn delivery(msg: impl Into<String>) -> Self {
        Self::Delivery(msg.into())
    }

    /// Whether the loop may keep running after this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::ConfigurationMissing(_))
    }
}
