//! Registry setup shared by the integration tests, plus a small in-memory
//! `users` table that drives handlers the way a statement executor would.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use type_handler_core::handler::{DelimitedListHandler, HandlerClass, WrapperHandler};
use type_handler_core::logging::init_structured_logging;
use type_handler_core::resolution::{HandlerResolver, ResolutionRequest, StructMetadata};
use type_handler_core::{Cell, TypeDescriptor, TypeHandlerRegistry, Value};

/// Host-side object: property name to value
pub type Record = HashMap<String, Value>;

/// External-side row: column name to cell
pub type Row = HashMap<String, Cell>;

pub fn fuzzy_bean(argument: &str) -> TypeDescriptor {
    TypeDescriptor::generic("FuzzyBean", TypeDescriptor::new(argument))
}

pub fn list_of(element: &str) -> TypeDescriptor {
    TypeDescriptor::list_of(TypeDescriptor::new(element))
}

pub fn type_aware_class() -> HandlerClass {
    HandlerClass::type_aware("TypeAwareTypeHandler", WrapperHandler::for_type)
}

pub fn csv_class() -> HandlerClass {
    HandlerClass::type_aware("CsvTypeHandler", DelimitedListHandler::for_type)
}

/// Registry with the wrapper handler keyed by raw `FuzzyBean` and the CSV
/// handler keyed by `List<String>` and `List<Integer>`
pub fn configured_registry() -> Arc<TypeHandlerRegistry> {
    init_structured_logging();
    let registry = Arc::new(TypeHandlerRegistry::new());
    registry
        .register_type(TypeDescriptor::new("FuzzyBean"), type_aware_class())
        .expect("register FuzzyBean");
    registry
        .register_type(list_of("String"), csv_class())
        .expect("register List<String>");
    registry
        .register_type(list_of("Integer"), csv_class())
        .expect("register List<Integer>");
    registry.register_alias("fuzzy", type_aware_class());
    registry
}

pub fn configured_resolver() -> HandlerResolver {
    HandlerResolver::new(configured_registry())
}

/// Property metadata of the `User` struct
pub fn user_metadata() -> StructMetadata {
    StructMetadata::new("User")
        .property("id", TypeDescriptor::new("Integer"))
        .property("strvalue", fuzzy_bean("String"))
        .property("intvalue", fuzzy_bean("Integer"))
        .property("strings", list_of("String"))
        .property("integers", list_of("Integer"))
}

pub fn user(
    id: i64,
    strvalue: &str,
    intvalue: i64,
    strings: &[&str],
    integers: &[i64],
) -> Record {
    let mut record = Record::new();
    record.insert("id".to_string(), Value::Int(id));
    record.insert(
        "strvalue".to_string(),
        Value::wrapped(Value::text(strvalue)),
    );
    record.insert("intvalue".to_string(), Value::wrapped(Value::Int(intvalue)));
    record.insert(
        "strings".to_string(),
        Value::List(strings.iter().map(|s| Value::text(*s)).collect()),
    );
    record.insert(
        "integers".to_string(),
        Value::List(integers.iter().map(|i| Value::Int(*i)).collect()),
    );
    record
}

/// Rows keyed by the `id` column
#[derive(Debug, Default)]
pub struct UserTable {
    rows: Mutex<HashMap<i64, Row>>,
}

impl UserTable {
    /// Table holding user 1: garden / 31 / a,b,c / 1,3,5
    pub fn seeded() -> Self {
        let table = Self::default();
        let mut row = Row::new();
        row.insert("id".to_string(), Cell::Integer(1));
        row.insert("strvalue".to_string(), Cell::text("garden"));
        row.insert("intvalue".to_string(), Cell::Integer(31));
        row.insert("strings".to_string(), Cell::text("a,b,c"));
        row.insert("integers".to_string(), Cell::text("1,3,5"));
        table.insert(row);
        table
    }

    pub fn insert(&self, row: Row) {
        let id = match row.get("id") {
            Some(Cell::Integer(id)) => *id,
            other => panic!("row without integer id: {other:?}"),
        };
        self.rows.lock().insert(id, row);
    }

    pub fn row(&self, id: i64) -> Row {
        self.rows
            .lock()
            .get(&id)
            .cloned()
            .unwrap_or_else(|| panic!("no row with id {id}"))
    }
}

/// Resolve each `(property, request)` pair and write the property into its column
pub fn bind_record(
    resolver: &HandlerResolver,
    bindings: &[(String, ResolutionRequest)],
    record: &Record,
) -> Row {
    bindings
        .iter()
        .map(|(property, request)| {
            let handler = resolver.resolve(request).expect("resolve parameter");
            let value = record.get(property).cloned().unwrap_or(Value::Null);
            let cell = handler.write(&value).expect("write parameter");
            (property.clone(), cell)
        })
        .collect()
}

/// Resolve each `(column, property, request)` triple and read the column
pub fn read_row(
    resolver: &HandlerResolver,
    mappings: &[(String, String, ResolutionRequest)],
    row: &Row,
) -> Record {
    mappings
        .iter()
        .map(|(column, property, request)| {
            let handler = resolver.resolve(request).expect("resolve result");
            let cell = row.get(column).cloned().unwrap_or(Cell::Null);
            let value = handler.read(&cell).expect("read column");
            (property.clone(), value)
        })
        .collect()
}
