//! # Registry Configuration
//!
//! Declarative setup of a [`TypeHandlerRegistry`]: which built-ins to install,
//! which handler serves as the default, the delimiter of the `csv` alias, and a
//! list of registrations naming handlers by alias.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use type_handler_core::config::ConfigLoader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::new().with_file("config/type_handlers.yaml").load()?;
//! let registry = config.build_registry()?;
//! # Ok(())
//! # }
//! ```
//!
//! ```yaml
//! builtins: true
//! default_handler: unknown
//! list_delimiter: ","
//! registrations:
//!   - host_type: "List<String>"
//!     handler: csv
//!   - format_tag: CSV
//!     handler: csv
//! ```

pub mod loader;

use crate::error::ConfigurationError;
use crate::handler::{HandlerClass, HandlerRef, DEFAULT_LIST_DELIMITER};
use crate::registry::{RegistrationKey, TypeHandlerRegistry};
use crate::types::{FormatTag, TypeDescriptor};
use serde::{Deserialize, Serialize};
use tracing::info;

pub use loader::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Install the scalar handlers keyed by raw type and format tag
    pub builtins: bool,

    /// Alias of the default handler; `None` leaves the registry without one
    pub default_handler: Option<String>,

    /// Delimiter used by the `csv` alias
    pub list_delimiter: String,

    pub registrations: Vec<RegistrationConfig>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            builtins: true,
            default_handler: Some("unknown".to_string()),
            list_delimiter: DEFAULT_LIST_DELIMITER.to_string(),
            registrations: Vec::new(),
        }
    }
}

/// One registration: a type expression, a format tag, or both, and a handler alias.
///
/// Files may also spell the keys `java_type` and `jdbc_type`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RegistrationConfig {
    #[serde(default, alias = "java_type")]
    pub host_type: Option<String>,
    #[serde(default, alias = "jdbc_type")]
    pub format_tag: Option<String>,
    pub handler: String,
}

impl RegistrationConfig {
    fn key(&self) -> Result<RegistrationKey, ConfigurationError> {
        let host_type = self
            .host_type
            .as_deref()
            .map(str::parse::<TypeDescriptor>)
            .transpose()?;
        RegistrationKey::new(host_type, self.format_tag.as_deref().map(FormatTag::new))
    }
}

impl RegistryConfig {
    /// Check everything that can be checked without a registry
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.list_delimiter.is_empty() {
            return Err(ConfigurationError::load("list_delimiter must not be empty"));
        }
        for registration in &self.registrations {
            if registration.handler.trim().is_empty() {
                return Err(ConfigurationError::load(
                    "registration handler alias must not be empty",
                ));
            }
            registration.key()?;
        }
        Ok(())
    }

    /// Build a fresh registry from this configuration
    pub fn build_registry(&self) -> Result<TypeHandlerRegistry, ConfigurationError> {
        self.build_registry_with(std::iter::empty())
    }

    /// Build a fresh registry, making `classes` available as aliases first so
    /// registrations can name application handlers
    pub fn build_registry_with(
        &self,
        classes: impl IntoIterator<Item = (String, HandlerClass)>,
    ) -> Result<TypeHandlerRegistry, ConfigurationError> {
        self.validate()?;

        let registry = TypeHandlerRegistry::empty();
        registry.install_builtin_aliases(&self.list_delimiter);
        if self.builtins {
            registry.install_builtin_entries();
        }
        for (alias, class) in classes {
            registry.register_alias(&alias, class);
        }

        if let Some(alias) = &self.default_handler {
            let class = registry.resolve_alias(alias)?;
            registry.set_default_handler(HandlerRef::Class(class));
        }

        for registration in &self.registrations {
            let class = registry.resolve_alias(&registration.handler)?;
            registry.register(registration.key()?, class)?;
        }

        info!(
            builtins = self.builtins,
            default_handler = self.default_handler.as_deref(),
            registrations = self.registrations.len(),
            "Type handler registry built from configuration"
        );
        Ok(registry)
    }
}
