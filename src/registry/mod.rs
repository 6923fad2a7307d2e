//! # Registry Infrastructure
//!
//! Handler registration, lookup and lazy instantiation.
//!
//! ## Available Components
//!
//! - **TypeHandlerRegistry**: `(type, format tag)` entries, aliases and the default handler
//! - **HandlerFactory**: per-entry lazy instantiation and instance caching
//!
//! ## Architecture
//!
//! ```text
//! Registry Infrastructure
//! ├── TypeHandlerRegistry   (entries, aliases, default)
//! └── HandlerFactory        (handler creation & caching per entry)
//! ```

pub mod handler_factory;
pub mod type_handler_registry;

pub use handler_factory::{HandlerCacheStats, HandlerFactory};
pub use type_handler_registry::{RegistrationKey, RegistryStats, TypeHandlerRegistry};
