//! # Handler Factory
//!
//! Lazy instantiation and caching of the handler behind one registry entry.
//!
//! ## Overview
//!
//! Every registration owns a `HandlerFactory`. A ready instance is handed out as
//! is; a [`HandlerClass`] is instantiated on first use and the instance is cached
//! for the lifetime of the registration. Re-registering a key replaces the whole
//! factory, so instances built for the previous registration are never served
//! again.
//!
//! Type-aware classes are cached per declared type (`FuzzyBean<String>` and
//! `FuzzyBean<Integer>` get distinct instances from one registration); all other
//! classes keep a single instance.
//!
//! The cache is not bounded: a type-aware factory holds one instance per distinct
//! declared type it has served until [`HandlerFactory::clear_cache`] runs.
//! [`TypeHandlerRegistry::clear_instance_cache`] clears every factory it owns.
//!
//! [`TypeHandlerRegistry::clear_instance_cache`]: crate::registry::TypeHandlerRegistry::clear_instance_cache

use crate::error::ConfigurationError;
use crate::handler::{HandlerClass, HandlerRef, TypeHandler};
use crate::types::TypeDescriptor;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Factory for creating and caching the handler of one registration
#[derive(Debug)]
pub struct HandlerFactory {
    handler_ref: HandlerRef,
    /// Cache of created handlers, keyed by declared type for type-aware classes
    handler_cache: DashMap<Option<TypeDescriptor>, Arc<dyn TypeHandler>>,
}

impl HandlerFactory {
    pub fn new(handler_ref: HandlerRef) -> Self {
        Self {
            handler_ref,
            handler_cache: DashMap::new(),
        }
    }

    pub fn handler_ref(&self) -> &HandlerRef {
        &self.handler_ref
    }

    pub fn handler_name(&self) -> &str {
        self.handler_ref.name()
    }

    /// Handler serving `declared`, instantiating the class on first use
    pub fn handler_for(
        &self,
        declared: &TypeDescriptor,
    ) -> Result<Arc<dyn TypeHandler>, ConfigurationError> {
        let class = match &self.handler_ref {
            HandlerRef::Instance(handler) => return Ok(handler.clone()),
            HandlerRef::Class(class) => class,
        };

        let cache_key = class.is_type_aware().then(|| declared.clone());
        if let Some(handler) = self.handler_cache.get(&cache_key) {
            return Ok(handler.clone());
        }

        let created = class.instantiate(declared)?;
        // first insert wins so racing resolutions share one instance
        let handler = self
            .handler_cache
            .entry(cache_key)
            .or_insert(created)
            .clone();

        debug!(
            handler = class.name(),
            declared_type = %declared,
            "Instantiated and cached type handler"
        );
        Ok(handler)
    }

    /// Clear cached instances; the next lookup instantiates again
    pub fn clear_cache(&self) {
        self.handler_cache.clear();
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> HandlerCacheStats {
        HandlerCacheStats {
            cached_handlers: self.handler_cache.len(),
            cache_keys: self
                .handler_cache
                .iter()
                .map(|entry| match entry.key() {
                    Some(declared) => declared.to_string(),
                    None => "*".to_string(),
                })
                .collect(),
        }
    }
}

impl From<HandlerClass> for HandlerFactory {
    fn from(class: HandlerClass) -> Self {
        Self::new(HandlerRef::Class(class))
    }
}

/// Statistics about the handler cache
#[derive(Debug, Clone)]
pub struct HandlerCacheStats {
    pub cached_handlers: usize,
    pub cache_keys: Vec<String>,
}
