//! Error types for skymarket.
//!
//! This module defines the top-level error type used throughout the skymarket
//! crate. Failures from the remote services have their own type,
//! [`ServiceError`](crate::service::ServiceError), which is wrapped here when
//! it has to cross a module boundary.

use std::path::PathBuf;
use thiserror::Error;

use crate::service::ServiceError;

/// The main error type for skymarket operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// A regular expression could not be compiled.
    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// The underlying error.
        #[source]
        source: regex::Error,
    },

    // === Navigation Errors ===
    /// A navigation path did not match the expected route shape.
    #[error("unrecognized route '{path}': {message}")]
    Route {
        /// The path that failed to parse.
        path: String,
        /// Description of what was expected.
        message: String,
    },

    // === Service Errors ===
    /// A remote service call failed.
    #[error(transparent)]
    Service(#[from] ServiceError),

    // === File Errors ===
    /// A configuration file could not be found.
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was requested.
        path: PathBuf,
    },
}

/// A specialized Result type for skymarket operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new configuration validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create a new route error.
    #[must_use]
    pub fn route(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Route {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if this error came from a remote service.
    #[must_use]
    pub fn is_service_error(&self) -> bool {
        matches!(self, Self::Service(_))
    }

    /// Check if this error is a configuration problem.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigLoad(_)
                | Self::ConfigValidation { .. }
                | Self::ConfigNotFound { .. }
                | Self::Pattern { .. }
        )
    }
}
