//! # Type Handlers
//!
//! The bidirectional converter contract plus the references the registry stores.
//!
//! ## Overview
//!
//! A [`TypeHandler`] moves one logical type across the boundary: `read` turns an
//! external [`Cell`] into a host [`Value`], `write` does the reverse. Handlers are
//! pure value transformers with no retained mutable state, so a single instance is
//! shared by every caller that resolves to it.
//!
//! Registrations name either a ready instance or a [`HandlerClass`], a named
//! constructor the registry instantiates lazily on first use.
//!
//! ## Built-in Handlers
//!
//! - **ScalarHandler**: string, integer, long, boolean, double and bytes passthrough
//! - **DelimitedListHandler**: list of scalars stored as delimited text
//! - **WrapperHandler**: single-argument wrapper around a scalar
//! - **UnknownTypeHandler**: default best-effort conversion by runtime shape

pub mod builtin;
pub mod collection;
pub mod unknown;
pub mod wrapper;

use crate::error::{ConfigurationError, ConversionError};
use crate::types::{Cell, TypeDescriptor, Value};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub use builtin::{builtin_classes, ScalarHandler, ScalarKind, DEFAULT_LIST_DELIMITER};
pub use collection::DelimitedListHandler;
pub use unknown::UnknownTypeHandler;
pub use wrapper::WrapperHandler;

/// Bidirectional converter for one logical type
pub trait TypeHandler: Send + Sync + fmt::Debug {
    /// Read an external cell into a host value
    fn read(&self, cell: &Cell) -> Result<Value, ConversionError>;

    /// Write a host value into an external cell
    fn write(&self, value: &Value) -> Result<Cell, ConversionError>;

    /// Name used in errors and logs
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

type Constructor =
    Arc<dyn Fn(&TypeDescriptor) -> Result<Arc<dyn TypeHandler>, String> + Send + Sync>;

static NEXT_CLASS_ID: AtomicU64 = AtomicU64::new(1);

/// Named, lazily invoked handler constructor.
///
/// A type-aware class receives the declared type of the request being resolved
/// (for example `FuzzyBean<Integer>`), so one registration can yield
/// argument-specific instances.
///
/// Every constructed class carries its own [`id`](Self::id); clones share it.
/// Two classes built separately are distinct even when their names match.
#[derive(Clone)]
pub struct HandlerClass {
    id: u64,
    name: Arc<str>,
    type_aware: bool,
    constructor: Constructor,
}

impl HandlerClass {
    /// Class whose instances are built with `Default`
    pub fn of<H>(name: &str) -> Self
    where
        H: TypeHandler + Default + 'static,
    {
        Self::from_fn(name, H::default)
    }

    /// Class built by a no-argument constructor
    pub fn from_fn<H, F>(name: &str, constructor: F) -> Self
    where
        H: TypeHandler + 'static,
        F: Fn() -> H + Send + Sync + 'static,
    {
        Self {
            id: NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed),
            name: Arc::from(name),
            type_aware: false,
            constructor: Arc::new(move |_: &TypeDescriptor| {
                Ok(Arc::new(constructor()) as Arc<dyn TypeHandler>)
            }),
        }
    }

    /// Class built from the declared type; the constructor may refuse a type it
    /// cannot serve.
    pub fn type_aware<H, F>(name: &str, constructor: F) -> Self
    where
        H: TypeHandler + 'static,
        F: Fn(&TypeDescriptor) -> Result<H, String> + Send + Sync + 'static,
    {
        Self {
            id: NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed),
            name: Arc::from(name),
            type_aware: true,
            constructor: Arc::new(move |declared: &TypeDescriptor| {
                constructor(declared).map(|handler| Arc::new(handler) as Arc<dyn TypeHandler>)
            }),
        }
    }

    /// Identity of this class, shared by its clones
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_type_aware(&self) -> bool {
        self.type_aware
    }

    /// Build a fresh instance for `declared`
    pub fn instantiate(
        &self,
        declared: &TypeDescriptor,
    ) -> Result<Arc<dyn TypeHandler>, ConfigurationError> {
        (self.constructor)(declared)
            .map_err(|reason| ConfigurationError::instantiation(self.name(), declared, reason))
    }
}

impl fmt::Debug for HandlerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerClass")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("type_aware", &self.type_aware)
            .finish()
    }
}

/// What a registration or an explicit override points at
#[derive(Debug, Clone)]
pub enum HandlerRef {
    Instance(Arc<dyn TypeHandler>),
    Class(HandlerClass),
}

impl HandlerRef {
    pub fn instance<H: TypeHandler + 'static>(handler: H) -> Self {
        HandlerRef::Instance(Arc::new(handler))
    }

    pub fn name(&self) -> &str {
        match self {
            HandlerRef::Instance(handler) => handler.name(),
            HandlerRef::Class(class) => class.name(),
        }
    }
}

impl From<HandlerClass> for HandlerRef {
    fn from(class: HandlerClass) -> Self {
        HandlerRef::Class(class)
    }
}

impl From<Arc<dyn TypeHandler>> for HandlerRef {
    fn from(handler: Arc<dyn TypeHandler>) -> Self {
        HandlerRef::Instance(handler)
    }
}
