//! # serde_stringify
//!
//! JSON stringification with the exact semantics of ECMAScript's
//! `JSON.stringify`, for shared and possibly cyclic value graphs as well as any
//! type implementing `serde::Serialize`.
//!
//! ## What it does
//!
//! - **Exact escaping**: control characters, quotes and backslashes are
//!   escaped with the standard short forms or lowercase `\u00XX`
//! - **ECMAScript numbers**: `1`, `0.30000000000000004`, `1e+21`; non-finite
//!   numbers become `null`
//! - **Omission rules**: `undefined`, functions and failing accessors are
//!   dropped from objects and written as `null` in arrays
//! - **Replacers**: a transform applied to every member, or an allow-list of
//!   member names
//! - **Pretty-printing**: a width of up to ten spaces, or up to ten
//!   characters of custom indentation
//! - **Cycle detection**: a structure that contains itself is reported as
//!   [`Error::CyclicStructure`], never as partial output
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_stringify::{stringify, value, StringifyOptions};
//!
//! let data = value!({ "b": 2, "a": [1, 2, null] });
//!
//! let compact = stringify(&data, &StringifyOptions::new()).unwrap();
//! assert_eq!(compact.as_deref(), Some(r#"{"b":2,"a":[1,2,null]}"#));
//!
//! let pretty = stringify(&data, &StringifyOptions::pretty()).unwrap().unwrap();
//! assert!(pretty.starts_with("{\n  \"b\": 2,"));
//! ```
//!
//! ### Serde types
//!
//! ```rust
//! use serde::Serialize;
//! use serde_stringify::to_string;
//!
//! #[derive(Serialize)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     score: f64,
//! }
//!
//! let user = User { id: 1, name: "Alice".to_string(), score: f64::NAN };
//! assert_eq!(to_string(&user).unwrap(), r#"{"id":1,"name":"Alice","score":null}"#);
//! ```
//!
//! ### Cycles
//!
//! ```rust
//! use serde_stringify::{stringify, Error, Object, StringifyOptions, Value};
//!
//! let node = Object::new();
//! node.insert("self", node.clone());
//!
//! let err = stringify(&Value::Object(node), &StringifyOptions::new()).unwrap_err();
//! assert!(matches!(err, Error::CyclicStructure { .. }));
//! ```
//!
//! ## Omitted results
//!
//! The core [`stringify`] returns `Ok(None)` when the top-level value has no
//! textual form at all (for example `undefined`, or a transform that drops
//! the root). This is distinct from `Ok(Some("null"))`.
//!
//! ## Performance Characteristics
//!
//! - **Serialization**: O(n) in the number of visited members
//! - **Cycle check**: O(depth) per visited array or object
//! - **Recursion**: depth equals the nesting depth of the input; callers that
//!   accept untrusted, deeply nested graphs should bound depth themselves
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Stringifying Serde types
//! - **`macro.rs`** - Building values with the value! macro
//! - **`dynamic_values.rs`** - Shared references, accessors and conversion hooks
//! - **`custom_options.rs`** - Replacers and indentation
//! - **`cyclic_graphs.rs`** - Detecting cycles
//!
//! Run any example with: `cargo run --example <name>`

pub mod date;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod quote;
pub mod ser;
pub mod value;

pub use date::Date;
pub use error::{AccessError, Error, Result};
pub use map::Members;
pub use options::{AllowEntry, AllowList, Indent, Replacer, StringifyOptions, Transform};
pub use quote::quote;
pub use ser::{Serializer, ValueSerializer};
pub use value::{Array, Custom, Function, Getter, Holder, Key, Number, Object, Property, ToJson, Value};

use serde::Serialize;
use std::io;

/// Stringifies a value graph.
///
/// Returns `Ok(None)` when the top-level value is omitted.
///
/// # Examples
///
/// ```rust
/// use serde_stringify::{stringify, value, StringifyOptions, Value};
///
/// let options = StringifyOptions::new();
/// assert_eq!(
///     stringify(&value!([1, 2, f64::NAN, f64::INFINITY]), &options).unwrap().as_deref(),
///     Some("[1,2,null,null]")
/// );
/// assert_eq!(stringify(&Value::Undefined, &options).unwrap(), None);
/// ```
///
/// # Errors
///
/// Returns [`Error::CyclicStructure`] if an array or object contains itself.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn stringify(value: &Value, options: &StringifyOptions) -> Result<Option<String>> {
    Serializer::new(options).serialize_root(value)
}

/// Stringifies a value graph with untyped replacer and indentation arguments.
///
/// A [`Value::Function`] replacer is called with `[key, value, holder]` for
/// every member; a [`Value::Array`] replacer is an allow-list of its string and
/// number elements. A number indent is a width and a string indent is a
/// literal unit. Any other argument is ignored.
///
/// # Examples
///
/// ```rust
/// use serde_stringify::{stringify_with, value, Value};
///
/// let text = stringify_with(&value!({ "a": 1, "b": 2 }), &value!(["b"]), &Value::from(1));
/// assert_eq!(text.unwrap().as_deref(), Some("{\n \"b\": 2\n}"));
/// ```
///
/// # Errors
///
/// Returns [`Error::CyclicStructure`] if an array or object contains itself.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn stringify_with(value: &Value, replacer: &Value, indent: &Value) -> Result<Option<String>> {
    let options = StringifyOptions {
        replacer: Replacer::from_value(replacer),
        indent: Indent::from_value(indent),
    };
    stringify(value, &options)
}

/// Convert any `T: Serialize` to a [`Value`] tree.
///
/// # Examples
///
/// ```rust
/// use serde_stringify::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: Value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(value.as_object().unwrap().keys(), vec!["x", "y"]);
/// ```
///
/// # Errors
///
/// Returns an error if the value uses map keys that are neither strings nor
/// numbers, or if its `Serialize` implementation fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serialize any `T: Serialize` to a compact JSON string.
///
/// # Examples
///
/// ```rust
/// use serde_stringify::to_string;
///
/// assert_eq!(to_string(&vec![1.0, 2.5]).unwrap(), "[1,2.5]");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be converted (see [`to_value`]).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &StringifyOptions::default())
}

/// Serialize any `T: Serialize` to JSON indented by two spaces per level.
///
/// # Errors
///
/// Returns an error if the value cannot be converted (see [`to_value`]).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &StringifyOptions::pretty())
}

/// Serialize any `T: Serialize` to JSON with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_stringify::{to_string_with_options, StringifyOptions};
/// use std::collections::BTreeMap;
///
/// let mut map = BTreeMap::new();
/// map.insert("keep", 1);
/// map.insert("skip", 2);
///
/// let options = StringifyOptions::new().with_allow_list(["keep"]);
/// assert_eq!(to_string_with_options(&map, &options).unwrap(), r#"{"keep":1}"#);
/// ```
///
/// # Errors
///
/// Returns [`Error::Omitted`] if a transform removes the top-level value, or
/// any error from [`to_value`] and [`stringify`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &StringifyOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let value = to_value(value)?;
    stringify(&value, options)?.ok_or(Error::Omitted)
}

/// Serialize any `T: Serialize` as compact JSON into a writer.
///
/// # Examples
///
/// ```rust
/// use serde_stringify::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &("a", 1)).unwrap();
/// assert_eq!(buffer, br#"["a",1]"#);
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &StringifyOptions::default())
}

/// Serialize any `T: Serialize` into a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &StringifyOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let json = to_string_with_options(value, options)?;
    writer
        .write_all(json.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
        manager: Option<Box<User>>,
    }

    fn alice() -> User {
        User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
            manager: None,
        }
    }

    #[test]
    fn test_serialize_point() {
        assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), r#"{"x":1,"y":2}"#);
    }

    #[test]
    fn test_serialize_user() {
        assert_eq!(
            to_string(&alice()).unwrap(),
            r#"{"id":123,"name":"Alice","active":true,"tags":["admin","user"],"manager":null}"#
        );
    }

    #[test]
    fn test_pretty_printing() {
        let pretty = to_string_pretty(&Point { x: 1, y: 2 }).unwrap();
        assert_eq!(pretty, "{\n  \"x\": 1,\n  \"y\": 2\n}");
    }

    #[test]
    fn test_to_value() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("x"), Ok(Value::Number(Number::Integer(1))));
        assert_eq!(obj.get("y"), Ok(Value::Number(Number::Integer(2))));
    }

    #[test]
    fn test_transform_can_omit_root() {
        let options = StringifyOptions::new().with_transform(|_, _, _| Value::Undefined);
        assert_eq!(
            to_string_with_options(&Point { x: 1, y: 2 }, &options),
            Err(Error::Omitted)
        );
    }

    #[test]
    fn test_stringify_with_ignores_malformed_arguments() {
        let data = value!({ "a": [1] });
        let text = stringify_with(&data, &Value::Bool(true), &value!({})).unwrap();
        assert_eq!(text.as_deref(), Some(r#"{"a":[1]}"#));
    }

    #[test]
    fn test_stringify_with_function_replacer() {
        let double = Function::new(|args: &[Value]| match &args[1] {
            Value::Number(n) if n.is_integer() => Value::from(n.as_f64() * 2.0),
            other => other.clone(),
        });
        let text = stringify_with(&value!([1, 2]), &Value::Function(double), &Value::Undefined);
        assert_eq!(text.unwrap().as_deref(), Some("[2,4]"));
    }

    #[test]
    fn test_to_writer() {
        let mut buffer = Vec::new();
        to_writer_with_options(&mut buffer, &vec![true], &StringifyOptions::pretty()).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "[\n  true\n]");
    }
}
