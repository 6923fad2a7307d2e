//! # Error Types
//!
//! Structured errors for handler registration, resolution and value conversion,
//! built on thiserror instead of `Box<dyn Error>` patterns.
//!
//! The three kinds propagate synchronously to the immediate caller and are never
//! logged or swallowed inside this crate.

use crate::types::{FormatTag, TypeDescriptor};
use thiserror::Error;

/// A registered handler reference could not be turned into a usable handler.
///
/// Raised at first use (resolution time), never at registration time, so the
/// order in which handlers are registered cannot change the outcome.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Handler '{handler}' cannot be instantiated for {declared_type}: {reason}")]
    Instantiation {
        handler: String,
        declared_type: String,
        reason: String,
    },

    #[error("Unknown handler alias: {alias}")]
    UnknownAlias { alias: String },

    #[error("Invalid type expression '{expression}': {reason}")]
    InvalidType { expression: String, reason: String },

    #[error("Invalid registration: {reason}")]
    InvalidRegistration { reason: String },

    #[error("Configuration load failed: {message}")]
    Load { message: String },
}

impl ConfigurationError {
    /// Create an instantiation error
    pub fn instantiation(
        handler: impl Into<String>,
        declared_type: &TypeDescriptor,
        reason: impl Into<String>,
    ) -> Self {
        Self::Instantiation {
            handler: handler.into(),
            declared_type: declared_type.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an unknown alias error
    pub fn unknown_alias(alias: impl Into<String>) -> Self {
        Self::UnknownAlias {
            alias: alias.into(),
        }
    }

    /// Create an invalid type expression error
    pub fn invalid_type(expression: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidType {
            expression: expression.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid registration error
    pub fn invalid_registration(reason: impl Into<String>) -> Self {
        Self::InvalidRegistration {
            reason: reason.into(),
        }
    }

    /// Create a load error
    pub fn load(message: impl Into<String>) -> Self {
        Self::Load {
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for ConfigurationError {
    fn from(err: config::ConfigError) -> Self {
        Self::load(err.to_string())
    }
}

/// No handler could be determined for a request and no default exists.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("No type handler found for {declared_type} (format tag: {})", .format_tag.as_deref().unwrap_or("none"))]
pub struct HandlerResolutionError {
    pub declared_type: String,
    pub format_tag: Option<String>,
}

impl HandlerResolutionError {
    pub fn new(declared_type: &TypeDescriptor, format_tag: Option<&FormatTag>) -> Self {
        Self {
            declared_type: declared_type.to_string(),
            format_tag: format_tag.map(|tag| tag.as_str().to_string()),
        }
    }
}

/// A handler failed to move one specific value across the boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("{handler} cannot read {found}: {reason}")]
    Read {
        handler: String,
        found: String,
        reason: String,
    },

    #[error("{handler} cannot write {found}: {reason}")]
    Write {
        handler: String,
        found: String,
        reason: String,
    },
}

impl ConversionError {
    /// Create a read error
    pub fn read(
        handler: impl Into<String>,
        found: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Read {
            handler: handler.into(),
            found: found.into(),
            reason: reason.into(),
        }
    }

    /// Create a write error
    pub fn write(
        handler: impl Into<String>,
        found: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Write {
            handler: handler.into(),
            found: found.into(),
            reason: reason.into(),
        }
    }
}

/// Umbrella error for callers that drive registration, resolution and
/// conversion through one code path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypeHandlerError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Resolution error: {0}")]
    Resolution(#[from] HandlerResolutionError),

    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),
}

pub type Result<T> = std::result::Result<T, TypeHandlerError>;
