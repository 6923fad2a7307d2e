use proptest::prelude::*;
use type_handler_core::handler::ScalarKind;
use type_handler_core::{TypeDescriptor, Value};

/// Tokens that survive a `,`-delimited round trip
pub fn list_token_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9 _.-]{1,12}"
}

/// Raw type names in the usual capitalized form
pub fn raw_type_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z0-9]{0,15}"
}

/// Descriptors up to two levels of nesting
pub fn descriptor_strategy() -> impl Strategy<Value = TypeDescriptor> {
    let leaf = raw_type_strategy().prop_map(TypeDescriptor::new);
    leaf.prop_recursive(2, 8, 3, |inner| {
        (raw_type_strategy(), prop::collection::vec(inner, 1..3))
            .prop_map(|(raw, arguments)| TypeDescriptor::with_arguments(raw, arguments))
    })
}

/// Format tag spellings, including mixed case and surrounding blanks
pub fn format_tag_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("VARCHAR".to_string()),
        Just("varchar".to_string()),
        Just(" Csv ".to_string()),
        "[a-zA-Z]{1,10}",
    ]
}

/// A scalar kind paired with a value that kind can hold
pub fn scalar_value_strategy() -> impl Strategy<Value = (ScalarKind, Value)> {
    prop_oneof![
        ".{0,24}".prop_map(|s| (ScalarKind::String, Value::Text(s))),
        any::<i32>().prop_map(|n| (ScalarKind::Integer, Value::Int(i64::from(n)))),
        any::<i64>().prop_map(|n| (ScalarKind::Long, Value::Int(n))),
        any::<bool>().prop_map(|b| (ScalarKind::Boolean, Value::Bool(b))),
        (-1.0e12f64..1.0e12).prop_map(|f| (ScalarKind::Double, Value::Float(f))),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(|b| (ScalarKind::Bytes, Value::Bytes(b))),
    ]
}

/// Arbitrary host values, composites included. Floats only appear at the top
/// level, where they travel as a real cell rather than as JSON text.
pub fn host_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        ".{0,16}".prop_map(Value::Text),
        prop::collection::vec(any::<u8>(), 0..8).prop_map(Value::Bytes),
    ];
    let composite = leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            inner.prop_map(Value::wrapped),
        ]
    });
    prop_oneof![
        composite,
        (-1.0e12f64..1.0e12).prop_map(Value::Float),
    ]
}
