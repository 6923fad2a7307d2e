//! Lists of scalars stored as one delimited text column.

use super::{ScalarKind, TypeHandler, DEFAULT_LIST_DELIMITER};
use crate::error::ConversionError;
use crate::types::{Cell, TypeDescriptor, Value};

/// Converts `"a,b,c"` to and from a list whose element kind comes from the
/// captured generic argument (`List<String>`, `List<Integer>`, ...).
///
/// An empty column text is the empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedListHandler {
    element: ScalarKind,
    delimiter: String,
}

impl DelimitedListHandler {
    pub fn new(element: ScalarKind, delimiter: impl Into<String>) -> Self {
        Self {
            element,
            delimiter: delimiter.into(),
        }
    }

    /// Build from a declared type using the default `,` delimiter
    pub fn for_type(declared: &TypeDescriptor) -> Result<Self, String> {
        Self::for_type_with_delimiter(declared, DEFAULT_LIST_DELIMITER)
    }

    /// Build from a declared type.
    ///
    /// A declaration without an argument (an untyped column tagged as delimited
    /// text, say) gets string elements.
    pub fn for_type_with_delimiter(
        declared: &TypeDescriptor,
        delimiter: &str,
    ) -> Result<Self, String> {
        if delimiter.is_empty() {
            return Err("list delimiter must not be empty".to_string());
        }
        let element = match declared.first_argument() {
            None => ScalarKind::String,
            Some(argument) => match ScalarKind::for_type(argument) {
                Some(ScalarKind::Bytes) | None => {
                    return Err(format!("unsupported list element type {argument}"))
                }
                Some(kind) => kind,
            },
        };
        Ok(Self::new(element, delimiter))
    }

    pub fn element(&self) -> ScalarKind {
        self.element
    }
}

impl TypeHandler for DelimitedListHandler {
    fn read(&self, cell: &Cell) -> Result<Value, ConversionError> {
        let text = match cell {
            Cell::Null => return Ok(Value::Null),
            Cell::Text(text) => text,
            other => {
                return Err(ConversionError::read(
                    self.name(),
                    other.kind(),
                    "expected delimited text",
                ))
            }
        };
        if text.is_empty() {
            return Ok(Value::List(Vec::new()));
        }
        text.split(self.delimiter.as_str())
            .map(|token| self.element.from_text(token, self.name()))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List)
    }

    fn write(&self, value: &Value) -> Result<Cell, ConversionError> {
        let items = match value {
            Value::Null => return Ok(Cell::Null),
            Value::List(items) => items,
            other => {
                return Err(ConversionError::write(
                    self.name(),
                    other.kind(),
                    "expected a list",
                ))
            }
        };
        // a lone empty string would read back as the empty list
        if let [Value::Text(only)] = items.as_slice() {
            if only.is_empty() {
                return Err(ConversionError::write(
                    self.name(),
                    "['']",
                    "a single empty element has no delimited form",
                ));
            }
        }
        let mut tokens = Vec::with_capacity(items.len());
        for item in items {
            let token = self.element.to_text(item, self.name())?;
            if token.contains(self.delimiter.as_str()) {
                return Err(ConversionError::write(
                    self.name(),
                    format!("'{token}'"),
                    format!("element contains the delimiter '{}'", self.delimiter),
                ));
            }
            tokens.push(token);
        }
        let text = tokens.join(&self.delimiter);
        // a multi-character delimiter can be formed across a token boundary
        if !text.split(self.delimiter.as_str()).eq(tokens.iter().map(String::as_str)) {
            return Err(ConversionError::write(
                self.name(),
                format!("{tokens:?}"),
                format!("elements run into the delimiter '{}'", self.delimiter),
            ));
        }
        Ok(Cell::Text(text))
    }

    fn name(&self) -> &str {
        "DelimitedListHandler"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(raw: &str) -> TypeDescriptor {
        TypeDescriptor::list_of(TypeDescriptor::new(raw))
    }

    #[test]
    fn test_element_kind_follows_argument() {
        let strings = DelimitedListHandler::for_type(&list_of("String")).unwrap();
        let integers = DelimitedListHandler::for_type(&list_of("Integer")).unwrap();

        assert_eq!(
            strings.read(&Cell::text("1,3,5")).unwrap(),
            Value::from(vec!["1", "3", "5"])
        );
        assert_eq!(
            integers.read(&Cell::text("1,3,5")).unwrap(),
            Value::from(vec![1_i64, 3, 5])
        );
    }

    #[test]
    fn test_empty_list_round_trip() {
        let handler = DelimitedListHandler::for_type(&list_of("Integer")).unwrap();
        let cell = handler.write(&Value::List(vec![])).unwrap();
        assert_eq!(cell, Cell::text(""));
        assert_eq!(handler.read(&cell).unwrap(), Value::List(vec![]));
    }

    #[test]
    fn test_malformed_text_is_conversion_error() {
        let handler = DelimitedListHandler::for_type(&list_of("Integer")).unwrap();
        let err = handler.read(&Cell::text("1,x,3")).unwrap_err();
        assert!(matches!(err, ConversionError::Read { .. }));
    }

    #[test]
    fn test_incompatible_shapes_rejected_on_write() {
        let handler = DelimitedListHandler::for_type(&list_of("String")).unwrap();
        assert!(handler.write(&Value::text("a,b")).is_err());
        assert!(handler.write(&Value::from(vec!["a,b"])).is_err());
        assert!(handler.write(&Value::from(vec![""])).is_err());
        assert!(handler
            .write(&Value::List(vec![Value::Int(1)]))
            .is_err());
    }

    #[test]
    fn test_custom_delimiter() {
        let handler =
            DelimitedListHandler::for_type_with_delimiter(&list_of("Long"), "|").unwrap();
        let cell = handler.write(&Value::from(vec![i64::MIN, i64::MAX])).unwrap();
        assert_eq!(
            cell,
            Cell::Text(format!("{}|{}", i64::MIN, i64::MAX))
        );
        assert_eq!(
            handler.read(&cell).unwrap(),
            Value::from(vec![i64::MIN, i64::MAX])
        );
    }

    #[test]
    fn test_multi_character_delimiter_rejects_split_ambiguity() {
        let handler =
            DelimitedListHandler::for_type_with_delimiter(&list_of("String"), "||").unwrap();

        for ambiguous in [vec!["a|", "b"], vec!["|", "|"], vec!["a||b"]] {
            let err = handler.write(&Value::from(ambiguous)).unwrap_err();
            assert!(matches!(err, ConversionError::Write { .. }));
        }

        let safe = Value::from(vec!["a|b", "|c", ""]);
        let cell = handler.write(&safe).unwrap();
        assert_eq!(cell, Cell::text("a|b|||c||"));
        assert_eq!(handler.read(&cell).unwrap(), safe);
    }

    #[test]
    fn test_unsupported_element_type_refused() {
        let nested = TypeDescriptor::list_of(list_of("String"));
        assert!(DelimitedListHandler::for_type(&nested).is_err());
        assert!(DelimitedListHandler::for_type_with_delimiter(&list_of("String"), "").is_err());
    }
}
