//! # Handler Resolution
//!
//! Request builders, the normalized request, and the precedence engine.
//!
//! ```text
//! Request Builder -> ResolutionRequest -> HandlerResolver -> TypeHandlerRegistry
//!                                                  |
//!                                                  v
//!                                         Arc<dyn TypeHandler>
//! ```

pub mod builders;
pub mod engine;
pub mod request;

pub use builders::{
    DeclarativeMapping, ParameterBinding, ParameterBindings, PropertyTypes, ResultColumnMapping,
    ReturnTypeMapping, StructMetadata,
};
pub use engine::{HandlerResolver, Resolution, ResolutionSource};
pub use request::ResolutionRequest;
