//! Single-argument wrapper types such as `FuzzyBean<T>`.

use super::{ScalarHandler, ScalarKind, TypeHandler};
use crate::error::ConversionError;
use crate::types::{Cell, TypeDescriptor, Value};

/// Reads a column into the inner type named by the wrapper's argument and
/// yields [`Value::Wrapped`]; writes the value held inside the wrapper.
///
/// Registered once by the wrapper's raw type, it serves every argument: the
/// type-aware constructor picks the inner conversion per declared type.
#[derive(Debug, Clone)]
pub struct WrapperHandler {
    inner: ScalarHandler,
    name: String,
}

impl WrapperHandler {
    pub fn new(wrapper_type: &str, inner: ScalarKind) -> Self {
        Self {
            inner: ScalarHandler::new(inner),
            name: format!("WrapperHandler<{wrapper_type}<{}>>", inner.raw_type()),
        }
    }

    pub fn for_type(declared: &TypeDescriptor) -> Result<Self, String> {
        let argument = declared
            .first_argument()
            .ok_or_else(|| format!("{declared} carries no type argument"))?;
        let inner = ScalarKind::for_type(argument)
            .ok_or_else(|| format!("unsupported wrapped type {argument}"))?;
        Ok(Self::new(declared.raw_type(), inner))
    }

    pub fn inner_kind(&self) -> ScalarKind {
        self.inner.kind()
    }
}

impl TypeHandler for WrapperHandler {
    fn read(&self, cell: &Cell) -> Result<Value, ConversionError> {
        match self.inner.read(cell)? {
            Value::Null => Ok(Value::Null),
            inner => Ok(Value::wrapped(inner)),
        }
    }

    fn write(&self, value: &Value) -> Result<Cell, ConversionError> {
        match value {
            Value::Null => Ok(Cell::Null),
            Value::Wrapped(inner) => self.inner.write(inner),
            other => Err(ConversionError::write(
                self.name(),
                other.kind(),
                "expected a wrapped value",
            )),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
