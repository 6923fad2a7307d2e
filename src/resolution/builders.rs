//! # Resolution Request Builders
//!
//! The four call sites that feed the resolution engine, each normalizing its own
//! metadata into a [`ResolutionRequest`]:
//!
//! - [`ResultColumnMapping`]: annotation-style column to property mapping
//! - [`ParameterBinding`] / [`ParameterBindings`]: programmatic single and
//!   multi-value parameter binding
//! - [`DeclarativeMapping`]: file-based parameter or result mapping with string
//!   attributes, optionally lacking a declared type
//! - [`ReturnTypeMapping`]: a method's declared, possibly generic, return type
//!
//! Generic arguments are captured eagerly here (from the declaration, from an
//! in-hand collection, or from a configuration attribute) and never discovered
//! at resolution time.

use super::request::ResolutionRequest;
use crate::error::ConfigurationError;
use crate::handler::HandlerRef;
use crate::registry::TypeHandlerRegistry;
use crate::types::{FormatTag, TypeDescriptor, Value};
use std::collections::HashMap;

/// Annotation-declared mapping of one result column onto a property
#[derive(Debug, Clone)]
pub struct ResultColumnMapping {
    pub property: String,
    pub column: String,
    pub host_type: TypeDescriptor,
    pub format_tag: Option<FormatTag>,
    pub type_handler: Option<HandlerRef>,
}

impl ResultColumnMapping {
    pub fn new(
        property: impl Into<String>,
        column: impl Into<String>,
        host_type: TypeDescriptor,
    ) -> Self {
        Self {
            property: property.into(),
            column: column.into(),
            host_type,
            format_tag: None,
            type_handler: None,
        }
    }

    pub fn with_format_tag(mut self, tag: impl Into<FormatTag>) -> Self {
        self.format_tag = Some(tag.into());
        self
    }

    pub fn with_type_handler(mut self, handler: impl Into<HandlerRef>) -> Self {
        self.type_handler = Some(handler.into());
        self
    }

    pub fn to_request(&self) -> ResolutionRequest {
        ResolutionRequest::new(self.host_type.clone())
            .with_optional_format_tag(self.format_tag.clone())
            .with_optional_override(self.type_handler.clone())
    }
}

/// One value bound to a statement parameter
#[derive(Debug, Clone)]
pub struct ParameterBinding {
    pub name: String,
    pub declared_type: TypeDescriptor,
    pub value: Option<Value>,
    pub format_tag: Option<FormatTag>,
    pub type_handler: Option<HandlerRef>,
}

impl ParameterBinding {
    pub fn new(name: impl Into<String>, declared_type: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            declared_type,
            value: None,
            format_tag: None,
            type_handler: None,
        }
    }

    /// Attach the in-hand value; used to capture an erased collection argument
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_format_tag(mut self, tag: impl Into<FormatTag>) -> Self {
        self.format_tag = Some(tag.into());
        self
    }

    pub fn with_type_handler(mut self, handler: impl Into<HandlerRef>) -> Self {
        self.type_handler = Some(handler.into());
        self
    }

    /// Declared type with any erased argument filled in from the value
    pub fn effective_type(&self) -> TypeDescriptor {
        match &self.value {
            Some(value) => self.declared_type.capture_from_value(value),
            None => self.declared_type.clone(),
        }
    }

    pub fn to_request(&self) -> ResolutionRequest {
        ResolutionRequest::new(self.effective_type())
            .with_optional_format_tag(self.format_tag.clone())
            .with_optional_override(self.type_handler.clone())
    }
}

/// Several independent values bound to one statement.
///
/// Each binding yields its own request from its own declared type.
#[derive(Debug, Clone, Default)]
pub struct ParameterBindings {
    bindings: Vec<ParameterBinding>,
}

impl ParameterBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, binding: ParameterBinding) -> Self {
        self.bindings.push(binding);
        self
    }

    pub fn bindings(&self) -> &[ParameterBinding] {
        &self.bindings
    }

    pub fn requests(&self) -> Vec<ResolutionRequest> {
        self.bindings.iter().map(ParameterBinding::to_request).collect()
    }
}

impl FromIterator<ParameterBinding> for ParameterBindings {
    fn from_iter<I: IntoIterator<Item = ParameterBinding>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

/// Declared property types of a parameter or result object
pub trait PropertyTypes {
    fn property_type(&self, property: &str) -> Option<TypeDescriptor>;
}

impl PropertyTypes for HashMap<String, TypeDescriptor> {
    fn property_type(&self, property: &str) -> Option<TypeDescriptor> {
        self.get(property).cloned()
    }
}

/// Property metadata of one host struct
#[derive(Debug, Clone, Default)]
pub struct StructMetadata {
    pub type_name: String,
    properties: HashMap<String, TypeDescriptor>,
}

impl StructMetadata {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            properties: HashMap::new(),
        }
    }

    pub fn property(mut self, name: impl Into<String>, declared_type: TypeDescriptor) -> Self {
        self.properties.insert(name.into(), declared_type);
        self
    }
}

impl PropertyTypes for StructMetadata {
    fn property_type(&self, property: &str) -> Option<TypeDescriptor> {
        self.properties.get(property).cloned()
    }
}

/// File-based parameter or result mapping, attributes still in string form.
///
/// `host_type` is a type expression such as `List<Integer>`; `format_tag` is a
/// format tag; `type_handler` is a handler alias known to the registry.
#[derive(Debug, Clone, Default)]
pub struct DeclarativeMapping {
    pub property: String,
    pub host_type: Option<String>,
    pub format_tag: Option<String>,
    pub type_handler: Option<String>,
}

impl DeclarativeMapping {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            ..Self::default()
        }
    }

    pub fn host_type(mut self, expression: impl Into<String>) -> Self {
        self.host_type = Some(expression.into());
        self
    }

    pub fn format_tag(mut self, tag: impl Into<String>) -> Self {
        self.format_tag = Some(tag.into());
        self
    }

    pub fn type_handler(mut self, alias: impl Into<String>) -> Self {
        self.type_handler = Some(alias.into());
        self
    }

    /// Build the request.
    ///
    /// Without a `host_type` attribute the declared type comes from `properties`
    /// (the parameter or result object's metadata); without either it is the
    /// unspecified object type.
    pub fn to_request(
        &self,
        registry: &TypeHandlerRegistry,
        properties: Option<&dyn PropertyTypes>,
    ) -> Result<ResolutionRequest, ConfigurationError> {
        let declared_type = match &self.host_type {
            Some(expression) => expression.parse::<TypeDescriptor>()?,
            None => properties
                .and_then(|properties| properties.property_type(&self.property))
                .unwrap_or_else(TypeDescriptor::object),
        };

        let type_handler = self
            .type_handler
            .as_deref()
            .map(|alias| registry.resolve_alias(alias).map(HandlerRef::Class))
            .transpose()?;

        Ok(ResolutionRequest::new(declared_type)
            .with_optional_format_tag(self.format_tag.as_deref().map(FormatTag::new))
            .with_optional_override(type_handler))
    }
}

/// Declared return type of a mapped method.
///
/// The handler converts the column into the value; building the host wrapper
/// around it is the caller's job.
#[derive(Debug, Clone)]
pub struct ReturnTypeMapping {
    pub return_type: TypeDescriptor,
    pub format_tag: Option<FormatTag>,
}

impl ReturnTypeMapping {
    pub fn new(return_type: TypeDescriptor) -> Self {
        Self {
            return_type,
            format_tag: None,
        }
    }

    pub fn with_format_tag(mut self, tag: impl Into<FormatTag>) -> Self {
        self.format_tag = Some(tag.into());
        self
    }

    pub fn to_request(&self) -> ResolutionRequest {
        ResolutionRequest::new(self.return_type.clone())
            .with_optional_format_tag(self.format_tag.clone())
    }
}
