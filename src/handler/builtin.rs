//! # Built-in Scalar Handlers
//!
//! Passthrough handlers for the primitive host types, and the alias catalog the
//! registry installs so declarative mappings can name handlers by string.

use super::{
    collection::DelimitedListHandler, unknown::UnknownTypeHandler, wrapper::WrapperHandler,
    HandlerClass, TypeHandler,
};
use crate::error::ConversionError;
use crate::types::{raw, tags, Cell, TypeDescriptor, Value};

/// Delimiter used by the `csv` alias unless configured otherwise
pub const DEFAULT_LIST_DELIMITER: &str = ",";

/// Primitive host types with a built-in handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Integer,
    Long,
    Boolean,
    Double,
    Bytes,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 6] = [
        ScalarKind::String,
        ScalarKind::Integer,
        ScalarKind::Long,
        ScalarKind::Boolean,
        ScalarKind::Double,
        ScalarKind::Bytes,
    ];

    /// Scalar kind named by a non-generic descriptor
    pub fn for_type(declared: &TypeDescriptor) -> Option<Self> {
        if declared.has_argument() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.raw_type() == declared.raw_type())
    }

    pub fn raw_type(self) -> &'static str {
        match self {
            ScalarKind::String => raw::STRING,
            ScalarKind::Integer => raw::INTEGER,
            ScalarKind::Long => raw::LONG,
            ScalarKind::Boolean => raw::BOOLEAN,
            ScalarKind::Double => raw::DOUBLE,
            ScalarKind::Bytes => raw::BYTES,
        }
    }

    /// Column format conventionally carrying this kind
    pub fn format_tag(self) -> &'static str {
        match self {
            ScalarKind::String => tags::VARCHAR,
            ScalarKind::Integer => tags::INTEGER,
            ScalarKind::Long => tags::BIGINT,
            ScalarKind::Boolean => tags::BOOLEAN,
            ScalarKind::Double => tags::DOUBLE,
            ScalarKind::Bytes => tags::BINARY,
        }
    }

    pub fn alias(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Long => "long",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Double => "double",
            ScalarKind::Bytes => "bytes",
        }
    }

    pub fn handler_name(self) -> &'static str {
        match self {
            ScalarKind::String => "StringTypeHandler",
            ScalarKind::Integer => "IntegerTypeHandler",
            ScalarKind::Long => "LongTypeHandler",
            ScalarKind::Boolean => "BooleanTypeHandler",
            ScalarKind::Double => "DoubleTypeHandler",
            ScalarKind::Bytes => "BytesTypeHandler",
        }
    }

    /// Parse one textual token into a value of this kind
    pub(crate) fn from_text(self, text: &str, handler: &str) -> Result<Value, ConversionError> {
        let malformed = |reason: String| ConversionError::read(handler, format!("'{text}'"), reason);
        match self {
            ScalarKind::String => Ok(Value::Text(text.to_string())),
            ScalarKind::Integer => text
                .trim()
                .parse::<i32>()
                .map(|n| Value::Int(i64::from(n)))
                .map_err(|e| malformed(e.to_string())),
            ScalarKind::Long => text
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|e| malformed(e.to_string())),
            ScalarKind::Boolean => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(Value::Bool(true)),
                "false" | "0" => Ok(Value::Bool(false)),
                _ => Err(malformed("not a boolean".to_string())),
            },
            ScalarKind::Double => text
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| malformed(e.to_string())),
            ScalarKind::Bytes => Ok(Value::Bytes(text.as_bytes().to_vec())),
        }
    }

    /// Render one value of this kind as a textual token
    pub(crate) fn to_text(self, value: &Value, handler: &str) -> Result<String, ConversionError> {
        match (self, value) {
            (ScalarKind::String, Value::Text(text)) => Ok(text.clone()),
            (ScalarKind::Integer, Value::Int(n)) => i32::try_from(*n)
                .map(|n| n.to_string())
                .map_err(|_| out_of_range(handler, *n)),
            (ScalarKind::Long, Value::Int(n)) => Ok(n.to_string()),
            (ScalarKind::Boolean, Value::Bool(b)) => Ok(b.to_string()),
            (ScalarKind::Double, Value::Float(f)) => Ok(f.to_string()),
            (kind, other) => Err(ConversionError::write(
                handler,
                other.kind(),
                format!("expected {}", kind.raw_type()),
            )),
        }
    }

    pub(crate) fn read_cell(self, cell: &Cell, handler: &str) -> Result<Value, ConversionError> {
        match (self, cell) {
            (_, Cell::Null) => Ok(Value::Null),
            (_, Cell::Text(text)) => self.from_text(text, handler),
            (ScalarKind::String, Cell::Integer(n)) => Ok(Value::Text(n.to_string())),
            (ScalarKind::String, Cell::Real(f)) => Ok(Value::Text(f.to_string())),
            (ScalarKind::String, Cell::Boolean(b)) => Ok(Value::Text(b.to_string())),
            (ScalarKind::String, Cell::Binary(bytes)) => String::from_utf8(bytes.clone())
                .map(Value::Text)
                .map_err(|e| ConversionError::read(handler, cell.kind(), e.to_string())),
            (ScalarKind::Integer, Cell::Integer(n)) => i32::try_from(*n)
                .map(|_| Value::Int(*n))
                .map_err(|_| ConversionError::read(handler, n.to_string(), "outside integer range")),
            (ScalarKind::Long, Cell::Integer(n)) => Ok(Value::Int(*n)),
            (ScalarKind::Boolean, Cell::Boolean(b)) => Ok(Value::Bool(*b)),
            (ScalarKind::Boolean, Cell::Integer(0)) => Ok(Value::Bool(false)),
            (ScalarKind::Boolean, Cell::Integer(1)) => Ok(Value::Bool(true)),
            (ScalarKind::Double, Cell::Real(f)) => Ok(Value::Float(*f)),
            (ScalarKind::Double, Cell::Integer(n)) => Ok(Value::Float(*n as f64)),
            (ScalarKind::Bytes, Cell::Binary(bytes)) => Ok(Value::Bytes(bytes.clone())),
            (kind, other) => Err(ConversionError::read(
                handler,
                other.kind(),
                format!("not convertible to {}", kind.raw_type()),
            )),
        }
    }

    pub(crate) fn write_value(self, value: &Value, handler: &str) -> Result<Cell, ConversionError> {
        match (self, value) {
            (_, Value::Null) => Ok(Cell::Null),
            (ScalarKind::String, Value::Text(text)) => Ok(Cell::Text(text.clone())),
            (ScalarKind::Integer, Value::Int(n)) => i32::try_from(*n)
                .map(|_| Cell::Integer(*n))
                .map_err(|_| out_of_range(handler, *n)),
            (ScalarKind::Long, Value::Int(n)) => Ok(Cell::Integer(*n)),
            (ScalarKind::Boolean, Value::Bool(b)) => Ok(Cell::Boolean(*b)),
            (ScalarKind::Double, Value::Float(f)) => Ok(Cell::Real(*f)),
            (ScalarKind::Double, Value::Int(n)) => Ok(Cell::Real(*n as f64)),
            (ScalarKind::Bytes, Value::Bytes(bytes)) => Ok(Cell::Binary(bytes.clone())),
            (kind, other) => Err(ConversionError::write(
                handler,
                other.kind(),
                format!("expected {}", kind.raw_type()),
            )),
        }
    }
}

fn out_of_range(handler: &str, n: i64) -> ConversionError {
    ConversionError::write(handler, n.to_string(), "outside integer range")
}

/// Passthrough handler for one primitive kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarHandler {
    kind: ScalarKind,
}

impl ScalarHandler {
    pub fn new(kind: ScalarKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }
}

impl TypeHandler for ScalarHandler {
    fn read(&self, cell: &Cell) -> Result<Value, ConversionError> {
        self.kind.read_cell(cell, self.name())
    }

    fn write(&self, value: &Value) -> Result<Cell, ConversionError> {
        self.kind.write_value(value, self.name())
    }

    fn name(&self) -> &str {
        self.kind.handler_name()
    }
}

/// Alias catalog of every built-in handler class.
///
/// `csv` splits and joins on `list_delimiter`.
pub fn builtin_classes(list_delimiter: &str) -> Vec<(String, HandlerClass)> {
    let mut classes: Vec<(String, HandlerClass)> = ScalarKind::ALL
        .into_iter()
        .map(|kind| {
            (
                kind.alias().to_string(),
                HandlerClass::from_fn(kind.handler_name(), move || ScalarHandler::new(kind)),
            )
        })
        .collect();

    let delimiter = list_delimiter.to_string();
    classes.push((
        "csv".to_string(),
        HandlerClass::type_aware("DelimitedListHandler", move |declared: &TypeDescriptor| {
            DelimitedListHandler::for_type_with_delimiter(declared, &delimiter)
        }),
    ));
    classes.push((
        "wrapper".to_string(),
        HandlerClass::type_aware("WrapperHandler", WrapperHandler::for_type),
    ));
    classes.push((
        "unknown".to_string(),
        HandlerClass::of::<UnknownTypeHandler>("UnknownTypeHandler"),
    ));
    classes
}
