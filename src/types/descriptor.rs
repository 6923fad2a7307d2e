//! # Type Descriptor
//!
//! Normalized, comparable form of a possibly generic host type reference.
//!
//! Equality drives every registry lookup: `List` and `List<String>` are distinct
//! descriptors, so an argument-aware registration never satisfies a plain raw
//! lookup by accident. Falling back from one to the other is the resolution
//! engine's job, not the descriptor's.

use crate::error::ConfigurationError;
use crate::types::Value;
use std::fmt;
use std::str::FromStr;

/// Raw type names used by the built-in handlers
pub mod raw {
    pub const OBJECT: &str = "Object";
    pub const STRING: &str = "String";
    pub const INTEGER: &str = "Integer";
    pub const LONG: &str = "Long";
    pub const BOOLEAN: &str = "Boolean";
    pub const DOUBLE: &str = "Double";
    pub const BYTES: &str = "Bytes";
    pub const LIST: &str = "List";
}

/// Raw type identity plus ordered generic arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeDescriptor {
    raw_type: String,
    type_arguments: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    /// Non-generic descriptor
    pub fn new(raw_type: impl Into<String>) -> Self {
        Self {
            raw_type: raw_type.into(),
            type_arguments: Vec::new(),
        }
    }

    /// Descriptor with one captured generic argument
    pub fn generic(raw_type: impl Into<String>, argument: TypeDescriptor) -> Self {
        Self {
            raw_type: raw_type.into(),
            type_arguments: vec![argument],
        }
    }

    pub fn with_arguments(raw_type: impl Into<String>, arguments: Vec<TypeDescriptor>) -> Self {
        Self {
            raw_type: raw_type.into(),
            type_arguments: arguments,
        }
    }

    /// The unspecified object type
    pub fn object() -> Self {
        Self::new(raw::OBJECT)
    }

    /// Shorthand for `List<element>`
    pub fn list_of(element: TypeDescriptor) -> Self {
        Self::generic(raw::LIST, element)
    }

    pub fn raw_type(&self) -> &str {
        &self.raw_type
    }

    pub fn type_arguments(&self) -> &[TypeDescriptor] {
        &self.type_arguments
    }

    /// The only argument this system gives meaning to
    pub fn first_argument(&self) -> Option<&TypeDescriptor> {
        self.type_arguments.first()
    }

    pub fn has_argument(&self) -> bool {
        !self.type_arguments.is_empty()
    }

    /// Copy with every generic argument discarded
    pub fn raw(&self) -> TypeDescriptor {
        Self::new(self.raw_type.clone())
    }

    pub fn is_object(&self) -> bool {
        self.raw_type == raw::OBJECT && !self.has_argument()
    }

    /// Best-effort descriptor for an in-hand value.
    ///
    /// Lists capture the descriptor of their first non-null element; an empty
    /// list or a wrapper yields no argument because nothing is observable.
    pub fn of_value(value: &Value) -> TypeDescriptor {
        match value {
            Value::Null => Self::object(),
            Value::Bool(_) => Self::new(raw::BOOLEAN),
            Value::Int(_) => Self::new(raw::LONG),
            Value::Float(_) => Self::new(raw::DOUBLE),
            Value::Text(_) => Self::new(raw::STRING),
            Value::Bytes(_) => Self::new(raw::BYTES),
            Value::List(items) => match items.iter().find(|item| !item.is_null()) {
                Some(first) => Self::list_of(Self::of_value(first)),
                None => Self::new(raw::LIST),
            },
            Value::Wrapped(_) => Self::object(),
        }
    }

    /// Fill in a missing first argument from an in-hand value.
    ///
    /// Declared arguments always win; the value is only consulted when the
    /// declaration site erased them.
    pub fn capture_from_value(&self, value: &Value) -> TypeDescriptor {
        if self.has_argument() {
            return self.clone();
        }
        let observed = Self::of_value(value);
        if observed.raw_type == self.raw_type && observed.has_argument() {
            observed
        } else {
            self.clone()
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw_type)?;
        if self.type_arguments.is_empty() {
            return Ok(());
        }
        write!(f, "<")?;
        for (index, argument) in self.type_arguments.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{argument}")?;
        }
        write!(f, ">")
    }
}

impl FromStr for TypeDescriptor {
    type Err = ConfigurationError;

    /// Parses `Raw` or `Raw<Arg, ...>` with nesting, e.g. `List<FuzzyBean<String>>`.
    fn from_str(expression: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser {
            expression,
            position: 0,
        };
        let descriptor = parser.descriptor()?;
        parser.skip_whitespace();
        if parser.position != expression.len() {
            return Err(parser.error("trailing characters"));
        }
        Ok(descriptor)
    }
}

struct Parser<'a> {
    expression: &'a str,
    position: usize,
}

impl Parser<'_> {
    fn descriptor(&mut self) -> Result<TypeDescriptor, ConfigurationError> {
        self.skip_whitespace();
        let start = self.position;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '.' || c == ':' {
                self.position += c.len_utf8();
            } else {
                break;
            }
        }
        if start == self.position {
            return Err(self.error("expected a type name"));
        }
        let raw_type = self.expression[start..self.position].to_string();

        self.skip_whitespace();
        let mut arguments = Vec::new();
        if self.peek() == Some('<') {
            self.position += 1;
            loop {
                arguments.push(self.descriptor()?);
                self.skip_whitespace();
                match self.peek() {
                    Some(',') => self.position += 1,
                    Some('>') => {
                        self.position += 1;
                        break;
                    }
                    _ => return Err(self.error("expected ',' or '>'")),
                }
            }
        }
        Ok(TypeDescriptor::with_arguments(raw_type, arguments))
    }

    fn peek(&self) -> Option<char> {
        self.expression[self.position..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.position += c.len_utf8();
        }
    }

    fn error(&self, reason: &str) -> ConfigurationError {
        ConfigurationError::invalid_type(
            self.expression,
            format!("{reason} at offset {}", self.position),
        )
    }
}
