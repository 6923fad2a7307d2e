//! # Resolution Engine
//!
//! Deterministic precedence algorithm turning a [`ResolutionRequest`] into a
//! handler.
//!
//! ## Precedence
//!
//! ```text
//! 1. explicit override        (registry not consulted)
//! 2. exact descriptor         (only when a generic argument was captured)
//! 3. raw type                 (argument discarded)
//! 4. format tag only
//! 5. default handler
//! ```
//!
//! Inside steps 2 and 3 an entry registered for the request's tag is preferred
//! over the untagged entry of the same type. The first step that finds an entry
//! decides: if its class cannot be instantiated the `ConfigurationError`
//! surfaces and no later step is tried.

use super::request::ResolutionRequest;
use crate::error::{HandlerResolutionError, Result};
use crate::handler::{HandlerRef, TypeHandler};
use crate::logging::log_resolution;
use crate::registry::{HandlerFactory, TypeHandlerRegistry};
use std::fmt;
use std::sync::Arc;

/// Which precedence step produced the handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionSource {
    Override,
    Exact,
    Raw,
    Tag,
    Default,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResolutionSource::Override => "override",
            ResolutionSource::Exact => "exact",
            ResolutionSource::Raw => "raw",
            ResolutionSource::Tag => "tag",
            ResolutionSource::Default => "default",
        };
        f.write_str(name)
    }
}

/// Resolved handler plus the step that matched
#[derive(Debug, Clone)]
pub struct Resolution {
    pub handler: Arc<dyn TypeHandler>,
    pub source: ResolutionSource,
}

/// Applies the precedence algorithm against one registry
#[derive(Debug, Clone)]
pub struct HandlerResolver {
    registry: Arc<TypeHandlerRegistry>,
}

impl HandlerResolver {
    pub fn new(registry: Arc<TypeHandlerRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<TypeHandlerRegistry> {
        &self.registry
    }

    /// Resolve the handler for one request
    pub fn resolve(&self, request: &ResolutionRequest) -> Result<Arc<dyn TypeHandler>> {
        self.resolve_with_source(request)
            .map(|resolution| resolution.handler)
    }

    /// Resolve each request independently, failing on the first error
    pub fn resolve_all(&self, requests: &[ResolutionRequest]) -> Result<Vec<Arc<dyn TypeHandler>>> {
        requests.iter().map(|request| self.resolve(request)).collect()
    }

    /// Resolve and report which precedence step matched
    pub fn resolve_with_source(&self, request: &ResolutionRequest) -> Result<Resolution> {
        let declared = request.declared_type();

        let (factory, source) = match self.select(request) {
            Some(selected) => selected,
            None => {
                return Err(HandlerResolutionError::new(declared, request.format_tag()).into());
            }
        };
        let handler = factory.handler_for(declared)?;

        log_resolution(
            &declared.to_string(),
            request.format_tag().map(|tag| tag.as_str()),
            &source.to_string(),
            handler.name(),
        );
        Ok(Resolution { handler, source })
    }

    fn select(&self, request: &ResolutionRequest) -> Option<(Arc<HandlerFactory>, ResolutionSource)> {
        let declared = request.declared_type();
        let tag = request.format_tag();

        if let Some(handler) = request.explicit_override() {
            let factory = match handler {
                HandlerRef::Instance(_) => Arc::new(HandlerFactory::new(handler.clone())),
                HandlerRef::Class(class) => self.registry.override_factory(class),
            };
            return Some((factory, ResolutionSource::Override));
        }

        if declared.has_argument() {
            if let Some(factory) = self.registry.lookup_exact(declared, tag) {
                return Some((factory, ResolutionSource::Exact));
            }
        }

        if let Some(factory) = self.registry.lookup_raw(declared.raw_type(), tag) {
            return Some((factory, ResolutionSource::Raw));
        }

        if let Some(tag) = tag {
            if let Some(factory) = self.registry.lookup_by_tag(tag) {
                return Some((factory, ResolutionSource::Tag));
            }
        }

        self.registry
            .default_factory()
            .map(|factory| (factory, ResolutionSource::Default))
    }
}
