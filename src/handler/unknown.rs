//! Default handler consulted when nothing narrower matches.

use super::TypeHandler;
use crate::error::ConversionError;
use crate::types::{Cell, Value};

/// Best-effort conversion by runtime shape.
///
/// Scalars map to their natural cell and back. Composite values (lists and
/// wrappers) are written as serde-tagged JSON text, and `read` decodes text of
/// that form back into the composite, so write-then-read reproduces every
/// value. A text value that is itself such a JSON document would read back as
/// the composite; writing one is a [`ConversionError`]. Never fails for want
/// of a specific handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownTypeHandler;

impl UnknownTypeHandler {
    /// Composite encoded by `write`, if `text` is one
    fn decode_composite(text: &str) -> Option<Value> {
        if !text.starts_with(r#"{"kind":"#) {
            return None;
        }
        serde_json::from_str::<Value>(text)
            .ok()
            .filter(|value| matches!(value, Value::List(_) | Value::Wrapped(_)))
    }
}

impl TypeHandler for UnknownTypeHandler {
    fn read(&self, cell: &Cell) -> Result<Value, ConversionError> {
        Ok(match cell {
            Cell::Null => Value::Null,
            Cell::Boolean(b) => Value::Bool(*b),
            Cell::Integer(n) => Value::Int(*n),
            Cell::Real(f) => Value::Float(*f),
            Cell::Text(text) => {
                Self::decode_composite(text).unwrap_or_else(|| Value::Text(text.clone()))
            }
            Cell::Binary(bytes) => Value::Bytes(bytes.clone()),
        })
    }

    fn write(&self, value: &Value) -> Result<Cell, ConversionError> {
        match value {
            Value::Null => Ok(Cell::Null),
            Value::Bool(b) => Ok(Cell::Boolean(*b)),
            Value::Int(n) => Ok(Cell::Integer(*n)),
            Value::Float(f) => Ok(Cell::Real(*f)),
            Value::Text(text) if Self::decode_composite(text).is_some() => {
                Err(ConversionError::write(
                    self.name(),
                    value.kind(),
                    "text would read back as an encoded composite",
                ))
            }
            Value::Text(text) => Ok(Cell::Text(text.clone())),
            Value::Bytes(bytes) => Ok(Cell::Binary(bytes.clone())),
            Value::List(_) | Value::Wrapped(_) => serde_json::to_string(value)
                .map(Cell::Text)
                .map_err(|e| ConversionError::write(self.name(), value.kind(), e.to_string())),
        }
    }

    fn name(&self) -> &str {
        "UnknownTypeHandler"
    }
}
