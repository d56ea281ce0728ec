//! End-to-end behavior of `stringify` on value graphs: omission, replacers,
//! indentation, conversion hooks, dates and cycles.

use serde_stringify::{
    quote, stringify, stringify_with, value, AccessError, Array, Custom, Date, Error, Function,
    Holder, Key, Object, Replacer, StringifyOptions, Value,
};
use std::cell::RefCell;
use std::rc::Rc;

fn compact(value: &Value) -> Option<String> {
    stringify(value, &StringifyOptions::new()).unwrap()
}

fn text(value: &Value, options: &StringifyOptions) -> String {
    stringify(value, options).unwrap().expect("root has a JSON form")
}

#[test]
fn test_quote_escapes_literally() {
    assert_eq!(quote("a\"b\\c\nd"), r#""a\"b\\c\nd""#);
    assert_eq!(quote("a\"b\\c\nd").chars().count(), 14);
}

#[test]
fn test_non_finite_numbers_in_arrays() {
    let data = value!([1, 2, f64::NAN, f64::INFINITY]);
    assert_eq!(compact(&data).as_deref(), Some("[1,2,null,null]"));
}

#[test]
fn test_key_order_is_insertion_order() {
    assert_eq!(compact(&value!({ "b": 2, "a": 1 })).as_deref(), Some(r#"{"b":2,"a":1}"#));
}

#[test]
fn test_pretty_two_spaces() {
    let data = value!({ "a": [1, { "b": 2 }] });
    let output = text(&data, &StringifyOptions::new().with_indent(2));
    assert_eq!(
        output,
        "{\n  \"a\": [\n    1,\n    {\n      \"b\": 2\n    }\n  ]\n}"
    );
}

#[test]
fn test_self_reference_is_an_error() {
    let circular = Object::new();
    circular.insert("self", circular.clone());

    let err = stringify(&Value::Object(circular), &StringifyOptions::new()).unwrap_err();
    assert_eq!(err, Error::CyclicStructure { key: "self".to_string() });
}

#[test]
fn test_indirect_cycle_through_array() {
    let outer = Object::new();
    let list = Array::new();
    list.push(1);
    list.push(outer.clone());
    outer.insert("list", list);

    let err = stringify(&Value::Object(outer.clone()), &StringifyOptions::pretty()).unwrap_err();
    assert_eq!(err, Error::cyclic(1));

    // breaking the cycle makes the same graph serializable again
    outer.insert("list", Value::Null);
    assert_eq!(compact(&Value::Object(outer)).as_deref(), Some(r#"{"list":null}"#));
}

#[test]
fn test_shared_reference_serializes_twice() {
    let shared = value!([1]);
    let data = Value::from(vec![shared.clone(), shared]);
    assert_eq!(compact(&data).as_deref(), Some("[[1],[1]]"));
}

#[test]
fn test_epoch_date() {
    let epoch = Value::Date(Date::from_millis(0.0));
    assert_eq!(compact(&epoch).as_deref(), Some(r#""1970-01-01T00:00:00.000Z""#));
}

#[test]
fn test_dates_at_range_edges() {
    let data = value!([
        (Date::from_millis(-62_198_841_600_000.0)),
        (Date::from_millis(253_402_300_800_000.0)),
        (Date::from_millis(f64::NAN)),
        (Date::from_millis(8.64e15 + 1.0))
    ]);
    assert_eq!(
        compact(&data).as_deref(),
        Some(r#"["-000001-01-01T00:00:00.000Z","+010000-01-01T00:00:00.000Z",null,null]"#)
    );
}

#[test]
fn test_time_value_limits_are_serialized() {
    let data = value!([
        (Date::from_millis(8.64e15)),
        (Date::from_millis(-8.64e15)),
        (Date::from_millis(8.64e15 - 1.0))
    ]);
    assert_eq!(
        compact(&data).as_deref(),
        Some(concat!(
            r#"["+275760-09-13T00:00:00.000Z","-271821-04-20T00:00:00.000Z","#,
            r#""+275760-09-12T23:59:59.999Z"]"#
        ))
    );
}

#[test]
fn test_custom_returned_by_transform_is_empty_object() {
    let options = StringifyOptions::new().with_transform(|_, key, value| match key {
        Key::Name(name) if name == "a" => Value::Custom(Custom::new(|_: &Key| Value::from(1))),
        Key::Index(0) => Value::Custom(Custom::new(|_: &Key| Value::from(2))),
        _ => value,
    });
    assert_eq!(
        text(&value!({ "a": 0, "b": [1] }), &options),
        r#"{"a":{},"b":[{}]}"#
    );
}

#[test]
fn test_custom_returning_custom_is_empty_object() {
    let nested = || Custom::new(|_: &Key| Value::Custom(Custom::new(|_: &Key| Value::from("inner"))));
    let data = value!({ "x": (nested()), "list": [(nested())] });
    assert_eq!(compact(&data).as_deref(), Some(r#"{"x":{},"list":[{}]}"#));
}

#[test]
fn test_untyped_replacer_sees_holder() {
    let tag_with_holder = Value::Function(Function::new(|args: &[Value]| match (&args[1], &args[2]) {
        (Value::Number(_), Value::Array(_)) => Value::from("in array"),
        (Value::Number(_), Value::Object(_)) => Value::from("in object"),
        (value, _) => value.clone(),
    }));
    let data = value!({ "n": 1, "list": [2] });
    assert_eq!(
        stringify_with(&data, &tag_with_holder, &Value::Undefined).unwrap().as_deref(),
        Some(r#"{"n":"in object","list":["in array"]}"#)
    );
}

#[test]
fn test_allow_list_drops_members() {
    let options = StringifyOptions::new().with_allow_list(["a"]);
    assert_eq!(text(&value!({ "a": 1, "b": 2 }), &options), r#"{"a":1}"#);
}

#[test]
fn test_allow_list_order_and_depth() {
    let data = value!({ "a": 1, "b": { "a": 2, "c": 3 }, "c": [{ "c": 4, "a": 5 }] });
    let options = StringifyOptions::new().with_allow_list(["c", "a", "c", "missing"]);
    assert_eq!(text(&data, &options), r#"{"c":[{"c":4,"a":5}],"a":1}"#);
}

#[test]
fn test_numeric_allow_list_entries() {
    let data = value!({ "1": "one", "2": "two" });
    let options = StringifyOptions::new().with_allow_list([2]);
    assert_eq!(text(&data, &options), r#"{"2":"two"}"#);
}

#[test]
fn test_undefined_root_is_omitted() {
    assert_eq!(compact(&Value::Undefined), None);
    assert_eq!(compact(&Value::Function(Function::new(|_| Value::Null))), None);
    assert_eq!(compact(&Value::Null).as_deref(), Some("null"));
}

#[test]
fn test_omitted_members_and_elements() {
    let f = Value::Function(Function::new(|_| Value::Null));
    let data = value!({
        "u": undefined,
        "f": (f.clone()),
        "list": [undefined, (f), 3]
    });
    assert_eq!(compact(&data).as_deref(), Some(r#"{"list":[null,null,3]}"#));
}

#[test]
fn test_failing_accessor_is_treated_as_undefined() {
    let obj = Object::new();
    obj.insert("ok", 1);
    obj.define_getter("broken", || Err(AccessError::new("boom")));
    obj.define_getter("computed", || Ok(Value::from("yes")));
    assert_eq!(
        compact(&Value::Object(obj)).as_deref(),
        Some(r#"{"ok":1,"computed":"yes"}"#)
    );
}

#[test]
fn test_custom_conversion_receives_key() {
    let data = value!({
        "price": (Custom::new(|key: &Key| Value::from(format!("{}=12.50", key)))),
        "list": [(Custom::new(|key: &Key| Value::from(key.to_string())))]
    });
    assert_eq!(compact(&data).as_deref(), Some(r#"{"price":"price=12.50","list":["0"]}"#));
}

#[test]
fn test_custom_conversion_at_root_sees_empty_key() {
    let root = Value::Custom(Custom::new(|key: &Key| Value::from(key.to_string().is_empty())));
    assert_eq!(compact(&root).as_deref(), Some("true"));
}

#[test]
fn test_transform_sees_holder_key_and_converted_value() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    let options = StringifyOptions::new().with_transform(move |holder, key, value| {
        let kind = match holder {
            Holder::Object(_) => "object",
            Holder::Array(_) => "array",
        };
        log.borrow_mut().push(format!("{}:{}:{}", kind, key, value.is_string()));
        value
    });

    let data = value!({ "when": (Date::from_millis(0.0)), "list": [1] });
    text(&data, &options);

    assert_eq!(
        *seen.borrow(),
        vec!["object::false", "object:when:true", "object:list:false", "array:0:false"]
    );
}

#[test]
fn test_transform_can_drop_and_rewrite() {
    let options = StringifyOptions::new().with_transform(|_, key, value| match key {
        Key::Name(name) if name == "secret" => Value::Undefined,
        Key::Index(1) => Value::Undefined,
        _ => match value {
            Value::Number(n) => Value::from(n.as_f64() * 10.0),
            other => other,
        },
    });
    let data = value!({ "secret": "x", "n": 1, "list": [1, 2, 3] });
    assert_eq!(text(&data, &options), r#"{"n":10,"list":[10,null,30]}"#);
}

#[test]
fn test_transform_can_omit_root() {
    let options = StringifyOptions::new().with_transform(|_, key, value| {
        if matches!(key, Key::Name(name) if name.is_empty()) {
            Value::Undefined
        } else {
            value
        }
    });
    assert_eq!(stringify(&value!([1]), &options).unwrap(), None);
}

#[test]
fn test_transform_returning_date_emits_iso_string() {
    let options = StringifyOptions::new()
        .with_transform(|_, _, value| if value.is_number() { Value::Date(Date::from_millis(0.0)) } else { value });
    assert_eq!(text(&value!([1]), &options), r#"["1970-01-01T00:00:00.000Z"]"#);
}

#[test]
fn test_text_indent_and_clamping() {
    let data = value!([1, [2]]);
    assert_eq!(
        text(&data, &StringifyOptions::new().with_indent("--")),
        "[\n--1,\n--[\n----2\n--]\n]"
    );
    assert_eq!(
        text(&data, &StringifyOptions::new().with_indent("abcdefghijklmnop")),
        "[\nabcdefghij1,\nabcdefghij[\nabcdefghijabcdefghij2\nabcdefghij]\n]"
    );
    assert_eq!(text(&data, &StringifyOptions::new().with_indent(0)), "[1,[2]]");
    assert_eq!(text(&data, &StringifyOptions::new().with_indent("")), "[1,[2]]");
}

#[test]
fn test_empty_containers_stay_inline_when_indenting() {
    let data = value!({ "a": [], "b": {} });
    assert_eq!(
        text(&data, &StringifyOptions::pretty()),
        "{\n  \"a\": [],\n  \"b\": {}\n}"
    );
}

#[test]
fn test_object_whose_members_are_all_omitted() {
    let data = value!({ "a": { "x": undefined } });
    assert_eq!(text(&data, &StringifyOptions::pretty()), "{\n  \"a\": {}\n}");
}

#[test]
fn test_stringify_with_untyped_arguments() {
    let data = value!({ "a": 1, "b": [true], "c": "x" });

    let allow = value!(["b", null, {}, "c"]);
    assert_eq!(
        stringify_with(&data, &allow, &Value::Null).unwrap().as_deref(),
        Some(r#"{"b":[true],"c":"x"}"#)
    );

    let upper = Value::Function(Function::new(|args: &[Value]| match &args[1] {
        Value::String(s) => Value::from(s.to_uppercase()),
        other => other.clone(),
    }));
    assert_eq!(
        stringify_with(&data, &upper, &Value::from("\t")).unwrap().as_deref(),
        Some("{\n\t\"a\": 1,\n\t\"b\": [\n\t\ttrue\n\t],\n\t\"c\": \"X\"\n}")
    );
}

#[test]
fn test_replacer_from_value_ignores_other_kinds() {
    assert!(Replacer::from_value(&Value::from(3)).is_none());
    assert!(Replacer::from_value(&Value::object()).is_none());
}

#[test]
fn test_number_text() {
    let data = value!([0.1, 1e21, 1e-7, 0.000001, (-0.0), (0.1 + 0.2), 123456789012345680000.0]);
    assert_eq!(
        compact(&data).as_deref(),
        Some("[0.1,1e+21,1e-7,0.000001,0,0.30000000000000004,123456789012345680000]")
    );
}

#[test]
fn test_getter_may_mutate_graph_during_serialization() {
    let obj = Object::new();
    let handle = obj.clone();
    obj.define_getter("first", move || {
        handle.insert("late", "added");
        Ok(Value::from(1))
    });
    // members are enumerated before the getter runs
    assert_eq!(compact(&Value::Object(obj.clone())).as_deref(), Some(r#"{"first":1}"#));
    assert!(obj.contains_key("late"));
}
