//! Property-based tests for parameter validation.
//!
//! Range checks agree with plain comparison, whole floats always pass as
//! integers, array validation reports exactly the first bad element, and
//! repeated validation is deterministic.

use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tool_spec::{
    validate_parameter, validate_parameters, ErrorKind, ParameterSpec, ToolSpec, ToolType,
};

// ============================================================================
// Strategies
// ============================================================================

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        (-1e6f64..1e6).prop_map(|f| json!(f)),
        "[a-z]{0,8}".prop_map(Value::String),
    ]
}

fn arb_tool_type() -> impl Strategy<Value = ToolType> {
    prop_oneof![
        Just(ToolType::String),
        Just(ToolType::Integer),
        Just(ToolType::Float),
        Just(ToolType::Boolean),
        Just(ToolType::Enum),
        Just(ToolType::Datetime),
        Just(ToolType::Asset),
    ]
}

fn arb_tool() -> impl Strategy<Value = ToolSpec> {
    prop::collection::btree_map("[a-e]", (arb_tool_type(), any::<bool>()), 0..5).prop_map(
        |params| {
            let mut spec = ToolSpec::default();
            for (name, (tool_type, optional)) in params {
                let mut p = ParameterSpec::new(name.clone(), tool_type);
                p.optional = optional;
                spec.parameters.insert(name, p);
            }
            spec
        },
    )
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn range_check_matches_comparison(
        min in -100.0f64..100.0,
        span in 0.0f64..100.0,
        value in -300.0f64..300.0,
    ) {
        let max = min + span;
        let mut spec = ParameterSpec::new("x", ToolType::Float);
        spec.min = Some(min);
        spec.max = Some(max);

        let result = validate_parameter(&spec, &json!(value));
        if value < min || value > max {
            prop_assert_eq!(result.unwrap_err().kind, ErrorKind::OutOfRange);
        } else {
            prop_assert!(result.is_ok());
        }
    }

    #[test]
    fn whole_floats_pass_as_integers(n in -1_000_000i64..1_000_000) {
        let spec = ParameterSpec::new("n", ToolType::Integer);
        prop_assert!(validate_parameter(&spec, &json!(n as f64)).is_ok());
        prop_assert!(validate_parameter(&spec, &json!(n)).is_ok());
    }

    #[test]
    fn fractional_floats_fail_as_integers(n in -1_000i64..1_000, frac in 0.01f64..0.99) {
        let spec = ParameterSpec::new("n", ToolType::Integer);
        let err = validate_parameter(&spec, &json!(n as f64 + frac)).unwrap_err();
        prop_assert_eq!(err.kind, ErrorKind::WrongType);
        prop_assert_eq!(err.actual, "float");
    }

    #[test]
    fn array_reports_first_bad_element(
        good in prop::collection::vec("[a-z]{1,4}", 0..6),
        bad_at in 0usize..6,
        bad in any::<i64>(),
    ) {
        let mut spec = ParameterSpec::new("names", ToolType::String);
        spec.is_array = true;

        let mut items: Vec<Value> = good.into_iter().map(Value::String).collect();
        let idx = bad_at.min(items.len());
        items.insert(idx, json!(bad));
        items.push(json!(false));

        let err = validate_parameter(&spec, &Value::Array(items)).unwrap_err();
        prop_assert_eq!(err.kind, ErrorKind::WrongType);
        prop_assert_eq!(err.actual, "integer");
        let expected_message = format!("expected names[{}] to be of type string", idx);
        prop_assert_eq!(err.message, expected_message);
    }

    #[test]
    fn validation_is_deterministic(
        tool in arb_tool(),
        inputs in prop::collection::btree_map("[a-g]", arb_scalar(), 0..6),
        fail_on_extra in any::<bool>(),
    ) {
        let inputs: BTreeMap<String, Value> = inputs;
        let first = validate_parameters(&tool, &inputs, fail_on_extra);
        let second = validate_parameters(&tool, &inputs, fail_on_extra);
        prop_assert_eq!(&first, &second);

        let names: Vec<&str> = first.errors().iter().map(|e| e.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        prop_assert_eq!(names, sorted);
    }

    #[test]
    fn undeclared_names_only_fail_when_strict(
        tool in arb_tool(),
        value in arb_scalar(),
    ) {
        let mut inputs = BTreeMap::new();
        inputs.insert("zz_extra".to_string(), value);

        let lenient = validate_parameters(&tool, &inputs, false);
        prop_assert!(lenient.errors().iter().all(|e| e.name != "zz_extra"));

        let strict = validate_parameters(&tool, &inputs, true);
        let extra: Vec<_> = strict.errors().iter().filter(|e| e.name == "zz_extra").collect();
        prop_assert_eq!(extra.len(), 1);
        prop_assert_eq!(extra[0].kind, ErrorKind::NotAllowed);
    }
}
