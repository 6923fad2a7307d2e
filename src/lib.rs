#![allow(clippy::doc_markdown)] // Allow technical terms like CSV, JSON in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Type Handler Core
//!
//! Resolution engine mapping application value types, generic ones included, to
//! bidirectional converters between host values and external column values.
//!
//! ## Overview
//!
//! A statement executor asks, for every value it reads or binds, "which handler
//! converts this?". Four sources of type information compete for the answer: an
//! explicit override, the declared type with its captured generic argument, the
//! raw type, and the external column's format tag. The engine reconciles them
//! under one fixed precedence and falls back to a default handler.
//!
//! ## Module Organization
//!
//! - [`types`] - Type descriptors, format tags, host values and external cells
//! - [`handler`] - The handler contract, handler classes and built-in handlers
//! - [`registry`] - Handler registry and lazy instance caching
//! - [`resolution`] - Request builders and the precedence engine
//! - [`config`] - Declarative registry setup
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use type_handler_core::handler::{DelimitedListHandler, HandlerClass, WrapperHandler};
//! use type_handler_core::resolution::{HandlerResolver, ResolutionRequest};
//! use type_handler_core::types::{Cell, TypeDescriptor, Value};
//! use type_handler_core::TypeHandlerRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(TypeHandlerRegistry::new());
//! registry.register_type(
//!     TypeDescriptor::new("FuzzyBean"),
//!     HandlerClass::type_aware("wrapper", WrapperHandler::for_type),
//! )?;
//! registry.register_type(
//!     TypeDescriptor::list_of(TypeDescriptor::new("Integer")),
//!     HandlerClass::type_aware("csv", DelimitedListHandler::for_type),
//! )?;
//!
//! let resolver = HandlerResolver::new(registry);
//! let integers = resolver.resolve(&ResolutionRequest::new(
//!     TypeDescriptor::list_of(TypeDescriptor::new("Integer")),
//! ))?;
//! assert_eq!(
//!     integers.read(&Cell::text("1,3,5"))?,
//!     Value::from(vec![1_i64, 3, 5])
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # All tests
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod logging;
pub mod registry;
pub mod resolution;
pub mod types;

pub use config::{ConfigLoader, RegistrationConfig, RegistryConfig};
pub use error::{
    ConfigurationError, ConversionError, HandlerResolutionError, Result, TypeHandlerError,
};
pub use handler::{HandlerClass, HandlerRef, TypeHandler};
pub use registry::{RegistrationKey, TypeHandlerRegistry};
pub use resolution::{HandlerResolver, Resolution, ResolutionRequest, ResolutionSource};
pub use types::{Cell, FormatTag, TypeDescriptor, Value};
