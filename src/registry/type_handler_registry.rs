//! # Type Handler Registry
//!
//! Long-lived mapping store from `(type, format tag)` keys to handlers.
//!
//! ## Architecture
//!
//! ```text
//! RegistrationKey -> HandlerFactory (HandlerRef + lazily built instances)
//! alias           -> HandlerClass
//! default         -> HandlerFactory (UnknownTypeHandler unless replaced)
//! ```
//!
//! One registry exists per configuration lifetime; independently configured
//! registries never share state. Lookups take a read lock and are safe under any
//! number of concurrent callers. Registration takes the write lock and is last
//! write wins per key.
//!
//! ## Usage
//!
//! ```rust
//! use type_handler_core::handler::{HandlerClass, WrapperHandler};
//! use type_handler_core::registry::{RegistrationKey, TypeHandlerRegistry};
//! use type_handler_core::types::TypeDescriptor;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = TypeHandlerRegistry::new();
//! registry.register(
//!     RegistrationKey::for_type(TypeDescriptor::new("FuzzyBean")),
//!     HandlerClass::type_aware("wrapper", WrapperHandler::for_type),
//! )?;
//! assert!(registry.lookup_raw("FuzzyBean", None).is_some());
//! # Ok(())
//! # }
//! ```

use super::handler_factory::HandlerFactory;
use crate::error::ConfigurationError;
use crate::handler::{
    builtin_classes, HandlerClass, HandlerRef, ScalarHandler, ScalarKind, UnknownTypeHandler,
    DEFAULT_LIST_DELIMITER,
};
use crate::logging::log_registry_operation;
use crate::types::{FormatTag, TypeDescriptor};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Key for handler lookup in the registry; at least one side is present
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistrationKey {
    host_type: Option<TypeDescriptor>,
    format_tag: Option<FormatTag>,
}

impl RegistrationKey {
    pub fn new(
        host_type: Option<TypeDescriptor>,
        format_tag: Option<FormatTag>,
    ) -> Result<Self, ConfigurationError> {
        if host_type.is_none() && format_tag.is_none() {
            return Err(ConfigurationError::invalid_registration(
                "a registration needs a type, a format tag, or both",
            ));
        }
        Ok(Self {
            host_type,
            format_tag,
        })
    }

    pub fn for_type(host_type: TypeDescriptor) -> Self {
        Self {
            host_type: Some(host_type),
            format_tag: None,
        }
    }

    pub fn for_tag(format_tag: impl Into<FormatTag>) -> Self {
        Self {
            host_type: None,
            format_tag: Some(format_tag.into()),
        }
    }

    pub fn for_type_and_tag(host_type: TypeDescriptor, format_tag: impl Into<FormatTag>) -> Self {
        Self {
            host_type: Some(host_type),
            format_tag: Some(format_tag.into()),
        }
    }

    pub fn host_type(&self) -> Option<&TypeDescriptor> {
        self.host_type.as_ref()
    }

    pub fn format_tag(&self) -> Option<&FormatTag> {
        self.format_tag.as_ref()
    }
}

impl fmt::Display for RegistrationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.host_type {
            Some(host_type) => write!(f, "{host_type}")?,
            None => write!(f, "*")?,
        }
        if let Some(tag) = &self.format_tag {
            write!(f, "@{tag}")?;
        }
        Ok(())
    }
}

impl From<TypeDescriptor> for RegistrationKey {
    fn from(host_type: TypeDescriptor) -> Self {
        Self::for_type(host_type)
    }
}

impl From<FormatTag> for RegistrationKey {
    fn from(tag: FormatTag) -> Self {
        Self::for_tag(tag)
    }
}

/// Registry statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryStats {
    pub total_entries: usize,
    pub typed_entries: usize,
    pub tag_only_entries: usize,
    pub aliases: usize,
    pub cached_instances: usize,
    pub has_default: bool,
}

/// Handler registry scoped to one configuration lifetime
pub struct TypeHandlerRegistry {
    entries: RwLock<HashMap<RegistrationKey, Arc<HandlerFactory>>>,
    default_handler: RwLock<Option<Arc<HandlerFactory>>>,
    /// Explicit override classes, cached by [`HandlerClass::id`]
    override_factories: DashMap<u64, Arc<HandlerFactory>>,
    aliases: RwLock<HashMap<String, HandlerClass>>,
}

impl TypeHandlerRegistry {
    /// Registry with the built-in handlers and the unknown-type default
    pub fn new() -> Self {
        Self::with_list_delimiter(DEFAULT_LIST_DELIMITER)
    }

    /// Same as [`TypeHandlerRegistry::new`] with a custom delimiter for the `csv` alias
    pub fn with_list_delimiter(list_delimiter: &str) -> Self {
        let registry = Self::empty();
        registry.install_builtins(list_delimiter);
        registry.set_default_handler(HandlerRef::instance(UnknownTypeHandler));
        registry
    }

    /// Registry with no entries, no aliases and no default handler
    pub fn empty() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_handler: RwLock::new(None),
            override_factories: DashMap::new(),
            aliases: RwLock::new(HashMap::new()),
        }
    }

    fn install_builtins(&self, list_delimiter: &str) {
        self.install_builtin_entries();
        self.install_builtin_aliases(list_delimiter);
    }

    /// Scalar handlers keyed by raw type and by their conventional format tag
    pub(crate) fn install_builtin_entries(&self) {
        let mut entries = self.entries.write();
        for kind in ScalarKind::ALL {
            let handler = HandlerRef::instance(ScalarHandler::new(kind));
            entries.insert(
                RegistrationKey::for_type(TypeDescriptor::new(kind.raw_type())),
                Arc::new(HandlerFactory::new(handler.clone())),
            );
            entries.insert(
                RegistrationKey::for_tag(kind.format_tag()),
                Arc::new(HandlerFactory::new(handler)),
            );
        }
    }

    pub(crate) fn install_builtin_aliases(&self, list_delimiter: &str) {
        let mut aliases = self.aliases.write();
        for (alias, class) in builtin_classes(list_delimiter) {
            aliases.insert(alias, class);
        }
    }

    /// Store or overwrite the entry for `key`.
    ///
    /// Classes are not instantiated here; a class that cannot be built fails
    /// with a `ConfigurationError` when first resolved.
    pub fn register(
        &self,
        key: impl Into<RegistrationKey>,
        handler: impl Into<HandlerRef>,
    ) -> Result<(), ConfigurationError> {
        let key = key.into();
        if let Some(host_type) = key.host_type() {
            if host_type.raw_type().trim().is_empty() {
                return Err(ConfigurationError::invalid_registration(
                    "raw type name must not be empty",
                ));
            }
        }
        if let Some(tag) = key.format_tag() {
            if tag.as_str().is_empty() {
                return Err(ConfigurationError::invalid_registration(
                    "format tag must not be empty",
                ));
            }
        }

        let handler = handler.into();
        let key_name = key.to_string();
        let replaced = self
            .entries
            .write()
            .insert(key, Arc::new(HandlerFactory::new(handler.clone())))
            .is_some();

        log_registry_operation(
            "register",
            &key_name,
            handler.name(),
            if replaced { "replaced" } else { "added" },
        );
        Ok(())
    }

    /// Register by raw type or full descriptor
    pub fn register_type(
        &self,
        host_type: TypeDescriptor,
        handler: impl Into<HandlerRef>,
    ) -> Result<(), ConfigurationError> {
        self.register(RegistrationKey::for_type(host_type), handler)
    }

    /// Register by external format tag only
    pub fn register_tag(
        &self,
        format_tag: impl Into<FormatTag>,
        handler: impl Into<HandlerRef>,
    ) -> Result<(), ConfigurationError> {
        self.register(RegistrationKey::for_tag(format_tag), handler)
    }

    /// Make `class` available to declarative mappings under `alias`
    pub fn register_alias(&self, alias: &str, class: HandlerClass) {
        log_registry_operation("register_alias", alias, class.name(), "added");
        self.aliases.write().insert(alias.to_string(), class);
    }

    /// Class registered under `alias`
    pub fn resolve_alias(&self, alias: &str) -> Result<HandlerClass, ConfigurationError> {
        self.aliases
            .read()
            .get(alias)
            .cloned()
            .ok_or_else(|| ConfigurationError::unknown_alias(alias))
    }

    pub fn set_default_handler(&self, handler: impl Into<HandlerRef>) {
        let handler = handler.into();
        log_registry_operation("set_default", "*", handler.name(), "replaced");
        *self.default_handler.write() = Some(Arc::new(HandlerFactory::new(handler)));
    }

    pub fn clear_default_handler(&self) {
        *self.default_handler.write() = None;
    }

    /// Entry keyed by the full descriptor (generic argument included).
    ///
    /// With a tag, a `(type, tag)` entry is preferred over the `(type, *)` entry.
    pub fn lookup_exact(
        &self,
        descriptor: &TypeDescriptor,
        format_tag: Option<&FormatTag>,
    ) -> Option<Arc<HandlerFactory>> {
        let entries = self.entries.read();
        if let Some(tag) = format_tag {
            let tagged = RegistrationKey::for_type_and_tag(descriptor.clone(), tag.clone());
            if let Some(factory) = entries.get(&tagged) {
                return Some(factory.clone());
            }
        }
        entries
            .get(&RegistrationKey::for_type(descriptor.clone()))
            .cloned()
    }

    /// Entry keyed by the raw type alone, with no generic argument
    pub fn lookup_raw(
        &self,
        raw_type: &str,
        format_tag: Option<&FormatTag>,
    ) -> Option<Arc<HandlerFactory>> {
        self.lookup_exact(&TypeDescriptor::new(raw_type), format_tag)
    }

    /// Entry keyed by the external format tag alone
    pub fn lookup_by_tag(&self, format_tag: &FormatTag) -> Option<Arc<HandlerFactory>> {
        self.entries
            .read()
            .get(&RegistrationKey::for_tag(format_tag.clone()))
            .cloned()
    }

    pub fn default_factory(&self) -> Option<Arc<HandlerFactory>> {
        self.default_handler.read().clone()
    }

    /// Shared factory for an explicit override class.
    ///
    /// Factories are keyed by class identity, so a class and its clones share
    /// one factory while a separately built class with the same name gets its
    /// own. One factory is kept per distinct class until
    /// [`clear_instance_cache`](Self::clear_instance_cache); callers that build
    /// override classes per request should build them once and reuse them.
    pub fn override_factory(&self, class: &HandlerClass) -> Arc<HandlerFactory> {
        self.override_factories
            .entry(class.id())
            .or_insert_with(|| Arc::new(HandlerFactory::from(class.clone())))
            .clone()
    }

    /// Whether an exact or raw entry exists for `descriptor`
    pub fn has_handler(&self, descriptor: &TypeDescriptor) -> bool {
        self.lookup_exact(descriptor, None).is_some()
            || self.lookup_raw(descriptor.raw_type(), None).is_some()
    }

    /// Drop every cached instance and every override factory; classes are
    /// rebuilt on next use
    pub fn clear_instance_cache(&self) {
        for factory in self.entries.read().values() {
            factory.clear_cache();
        }
        if let Some(factory) = self.default_handler.read().as_ref() {
            factory.clear_cache();
        }
        self.override_factories.clear();
    }

    pub fn stats(&self) -> RegistryStats {
        let entries = self.entries.read();
        let typed_entries = entries.keys().filter(|key| key.host_type.is_some()).count();
        let mut cached_instances: usize = entries
            .values()
            .map(|factory| factory.cache_stats().cached_handlers)
            .sum();
        cached_instances += self
            .override_factories
            .iter()
            .map(|factory| factory.cache_stats().cached_handlers)
            .sum::<usize>();
        let default_handler = self.default_handler.read();
        if let Some(factory) = default_handler.as_ref() {
            cached_instances += factory.cache_stats().cached_handlers;
        }

        RegistryStats {
            total_entries: entries.len(),
            typed_entries,
            tag_only_entries: entries.len() - typed_entries,
            aliases: self.aliases.read().len(),
            cached_instances,
            has_default: default_handler.is_some(),
        }
    }
}

impl Default for TypeHandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeHandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeHandlerRegistry")
            .field("stats", &self.stats())
            .finish()
    }
}
