//! End-to-end flows against the in-memory `users` table: every request
//! builder feeds the same globally registered handlers.

mod common;

use anyhow::Result;
use common::*;
use type_handler_core::resolution::{
    DeclarativeMapping, ParameterBinding, ParameterBindings, PropertyTypes, ResultColumnMapping,
    ReturnTypeMapping,
};
use type_handler_core::{Cell, ResolutionRequest, TypeDescriptor, Value};

const USER_PROPERTIES: [&str; 5] = ["id", "strvalue", "intvalue", "strings", "integers"];

fn annotated_result_mappings() -> Vec<(String, String, ResolutionRequest)> {
    [
        ResultColumnMapping::new("id", "id", TypeDescriptor::new("Integer")),
        ResultColumnMapping::new("strvalue", "strvalue", fuzzy_bean("String")),
        ResultColumnMapping::new("intvalue", "intvalue", fuzzy_bean("Integer")),
        ResultColumnMapping::new("strings", "strings", list_of("String")),
        ResultColumnMapping::new("integers", "integers", list_of("Integer")),
    ]
    .into_iter()
    .map(|mapping| {
        let request = mapping.to_request();
        (mapping.column, mapping.property, request)
    })
    .collect()
}

fn user_bindings(prefix: &str, record: &Record) -> Vec<ParameterBinding> {
    let metadata = user_metadata();
    USER_PROPERTIES
        .iter()
        .map(|property| {
            let declared = metadata
                .property_type(property)
                .expect("declared user property");
            ParameterBinding::new(format!("{prefix}{property}"), declared)
                .with_value(record[*property].clone())
        })
        .collect()
}

/// Binding requests keyed by the bare property name
fn as_property_requests(
    bindings: &[ParameterBinding],
    prefix: &str,
) -> Vec<(String, ResolutionRequest)> {
    bindings
        .iter()
        .map(|binding| {
            let property = binding.name.trim_start_matches(prefix).to_string();
            (property, binding.to_request())
        })
        .collect()
}

fn assert_row_reads_back(record: &Record, row: &Row) {
    let resolver = configured_resolver();
    let read_back = read_row(&resolver, &annotated_result_mappings(), row);
    assert_eq!(&read_back, record);
}

#[test]
fn test_annotated_result_mapping_reads_seeded_user() {
    let resolver = configured_resolver();
    let table = UserTable::seeded();

    let read = read_row(&resolver, &annotated_result_mappings(), &table.row(1));
    assert_eq!(read, user(1, "garden", 31, &["a", "b", "c"], &[1, 3, 5]));
}

#[test]
fn test_programmatic_parameter_binding_inserts_user() {
    let resolver = configured_resolver();
    let table = UserTable::seeded();
    let record = user(2, "park", 7, &["aa", "bb"], &[11, 22]);

    let bindings = user_bindings("", &record);
    let row = bind_record(&resolver, &as_property_requests(&bindings, ""), &record);
    assert_eq!(row["strvalue"], Cell::text("park"));
    assert_eq!(row["intvalue"], Cell::Integer(7));
    assert_eq!(row["strings"], Cell::text("aa,bb"));
    assert_eq!(row["integers"], Cell::text("11,22"));

    table.insert(row);
    assert_row_reads_back(&record, &table.row(2));
}

#[test]
fn test_multi_parameter_binding_resolves_each_independently() -> Result<()> {
    let resolver = configured_resolver();
    let table = UserTable::seeded();
    let record = user(3, "well", 23, &["x"], &[9]);

    let bindings: ParameterBindings = user_bindings("user.", &record)
        .into_iter()
        .chain(std::iter::once(
            ParameterBinding::new("note", TypeDescriptor::new("String"))
                .with_value(Value::text("whatevs")),
        ))
        .collect();

    let handlers = resolver.resolve_all(&bindings.requests())?;
    assert_eq!(handlers.len(), 6);
    let note = handlers.last().expect("note handler");
    assert_eq!(note.name(), "StringTypeHandler");
    assert_eq!(note.write(&Value::text("whatevs"))?, Cell::text("whatevs"));

    let user_only = &bindings.bindings()[..5];
    let row = bind_record(&resolver, &as_property_requests(user_only, "user."), &record);
    table.insert(row);
    assert_row_reads_back(&record, &table.row(3));
    Ok(())
}

#[test]
fn test_declarative_result_mapping_with_type_attributes() -> Result<()> {
    let resolver = configured_resolver();
    let registry = resolver.registry().clone();
    let table = UserTable::seeded();

    let mappings = [
        DeclarativeMapping::new("id").host_type("Integer"),
        DeclarativeMapping::new("strvalue").host_type("FuzzyBean<String>"),
        DeclarativeMapping::new("intvalue").host_type("FuzzyBean<Integer>"),
        DeclarativeMapping::new("strings").host_type("List<String>"),
        DeclarativeMapping::new("integers").host_type("List<Integer>"),
    ];
    let requests = mappings
        .iter()
        .map(|mapping| -> Result<_> {
            let request = mapping.to_request(&registry, None)?;
            Ok((mapping.property.clone(), mapping.property.clone(), request))
        })
        .collect::<Result<Vec<_>>>()?;

    let read = read_row(&resolver, &requests, &table.row(1));
    assert_eq!(read, user(1, "garden", 31, &["a", "b", "c"], &[1, 3, 5]));
    Ok(())
}

#[test]
fn test_declarative_parameter_mapping_with_type_attributes() -> Result<()> {
    let resolver = configured_resolver();
    let registry = resolver.registry().clone();
    let table = UserTable::seeded();
    let record = user(4, "pond", 23, &["p", "q"], &[4, 5, 6]);

    let mappings = [
        DeclarativeMapping::new("id").host_type("Integer"),
        DeclarativeMapping::new("strvalue").host_type("FuzzyBean<String>"),
        DeclarativeMapping::new("intvalue").host_type("FuzzyBean<Integer>"),
        DeclarativeMapping::new("strings").host_type("List<String>"),
        DeclarativeMapping::new("integers").host_type("List<Integer>"),
    ];
    let requests = mappings
        .iter()
        .map(|mapping| -> Result<_> {
            Ok((mapping.property.clone(), mapping.to_request(&registry, None)?))
        })
        .collect::<Result<Vec<_>>>()?;

    table.insert(bind_record(&resolver, &requests, &record));
    assert_row_reads_back(&record, &table.row(4));
    Ok(())
}

#[test]
fn test_declarative_parameter_mapping_without_type_attributes() -> Result<()> {
    let resolver = configured_resolver();
    let registry = resolver.registry().clone();
    let metadata = user_metadata();
    let table = UserTable::seeded();
    let record = user(5, "library", 38, &["r"], &[8]);

    let requests = USER_PROPERTIES
        .iter()
        .map(|property| -> Result<_> {
            let request =
                DeclarativeMapping::new(*property).to_request(&registry, Some(&metadata))?;
            Ok((property.to_string(), request))
        })
        .collect::<Result<Vec<_>>>()?;

    assert_eq!(requests[1].1.declared_type(), &fuzzy_bean("String"));
    table.insert(bind_record(&resolver, &requests, &record));
    assert_row_reads_back(&record, &table.row(5));
    Ok(())
}

#[test]
fn test_declarative_type_handler_alias_overrides_lookup() -> Result<()> {
    let resolver = configured_resolver();
    let registry = resolver.registry().clone();

    let mapping = DeclarativeMapping::new("strvalue")
        .host_type("FuzzyBean<String>")
        .type_handler("fuzzy");
    let request = mapping.to_request(&registry, None)?;
    let resolution = resolver.resolve_with_source(&request)?;

    assert_eq!(resolution.source.to_string(), "override");
    assert_eq!(
        resolution.handler.read(&Cell::text("garden"))?,
        Value::wrapped(Value::text("garden"))
    );
    Ok(())
}

#[test]
fn test_declarative_mapping_without_any_type_uses_default() -> Result<()> {
    let resolver = configured_resolver();
    let registry = resolver.registry().clone();

    let request = DeclarativeMapping::new("mystery").to_request(&registry, None)?;
    assert!(request.declared_type().is_object());
    assert_eq!(resolver.resolve(&request)?.name(), "UnknownTypeHandler");
    Ok(())
}

#[test]
fn test_generic_return_type_reads_wrapped_column() -> Result<()> {
    let resolver = configured_resolver();
    let table = UserTable::seeded();

    let request = ReturnTypeMapping::new(fuzzy_bean("String")).to_request();
    let handler = resolver.resolve(&request)?;
    let value = handler.read(&table.row(1)["strvalue"])?;

    assert_eq!(value.unwrap_inner(), Some(&Value::text("garden")));
    Ok(())
}

#[test]
fn test_erased_list_binding_captures_element_type_from_value() -> Result<()> {
    let resolver = configured_resolver();

    let binding = ParameterBinding::new("values", TypeDescriptor::new("List"))
        .with_value(Value::from(vec![1_i64, 2, 3]));
    assert_eq!(binding.effective_type(), list_of("Long"));

    let strings = ParameterBinding::new("values", TypeDescriptor::new("List"))
        .with_value(Value::from(vec!["aa", "bb"]));
    let handler = resolver.resolve(&strings.to_request())?;
    assert_eq!(handler.write(&Value::from(vec!["aa", "bb"]))?, Cell::text("aa,bb"));
    Ok(())
}

#[test]
fn test_null_columns_read_as_null() -> Result<()> {
    let resolver = configured_resolver();
    let mut row = UserTable::seeded().row(1);
    row.insert("strings".to_string(), Cell::Null);
    row.insert("intvalue".to_string(), Cell::Null);

    let read = read_row(&resolver, &annotated_result_mappings(), &row);
    assert_eq!(read["strings"], Value::Null);
    assert_eq!(read["intvalue"], Value::Null);
    Ok(())
}
