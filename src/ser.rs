//! Stringification.
//!
//! This module holds the two halves of the crate's output path:
//!
//! - [`Serializer`] walks a [`Value`] graph and produces JSON text, applying
//!   conversion hooks, the configured [`Replacer`], indentation and cycle
//!   detection.
//! - [`ValueSerializer`] is a `serde::Serializer` that turns any
//!   `T: Serialize` into a fresh [`Value`] tree, so ordinary Rust types can be
//!   stringified too.
//!
//! ## Per-member pipeline
//!
//! For every member the serializer reads the value from its holder (accessor
//! failures read as `undefined`), converts dates to ISO strings and custom
//! values through [`ToJson`](crate::ToJson), runs the transform if one is
//! configured, and then emits:
//!
//! | Value | Output |
//! |-------|--------|
//! | `undefined`, function | nothing (member dropped, `null` in arrays) |
//! | null | `null` |
//! | bool | `true` / `false` |
//! | finite number | ECMAScript number text |
//! | ±Infinity, NaN | `null` |
//! | string | quoted and escaped |
//! | array / object | recursive, after the cycle check |
//! | custom left over after conversion | `{}` |
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use serde_stringify::{value, Serializer, StringifyOptions};
//!
//! let options = StringifyOptions::pretty();
//! let mut serializer = Serializer::new(&options);
//!
//! let data = value!({ "a": [1, { "b": 2 }] });
//! let text = serializer.serialize_root(&data).unwrap().unwrap();
//! assert_eq!(
//!     text,
//!     "{\n  \"a\": [\n    1,\n    {\n      \"b\": 2\n    }\n  ]\n}"
//! );
//! ```

use crate::options::{Replacer, StringifyOptions};
use crate::quote::write_quoted;
use crate::value::{Array, Holder, Key, Number, Object, Value};
use crate::{Error, Members, Result};
use serde::{ser, Serialize};

/// Identities of the arrays and objects currently being serialized.
#[derive(Debug, Default)]
struct TraversalStack(Vec<*const ()>);

impl TraversalStack {
    fn contains(&self, identity: *const ()) -> bool {
        self.0.iter().rev().any(|&entry| entry == identity)
    }

    fn push(&mut self, identity: *const ()) {
        self.0.push(identity);
    }

    fn pop(&mut self) {
        self.0.pop();
    }

    fn depth(&self) -> usize {
        self.0.len()
    }
}

/// The JSON text serializer.
///
/// A serializer owns its traversal stack, so one instance must not be shared
/// between concurrent calls. [`crate::stringify`] creates a fresh one per
/// call.
pub struct Serializer<'a> {
    replacer: &'a Replacer,
    indent: String,
    stack: TraversalStack,
}

impl<'a> Serializer<'a> {
    pub fn new(options: &'a StringifyOptions) -> Self {
        Serializer {
            replacer: &options.replacer,
            indent: options.indent_unit(),
            stack: TraversalStack::default(),
        }
    }

    /// Serializes `value` as the top-level value.
    ///
    /// The root is placed under the empty key of a fresh holder object, so
    /// conversion hooks and transforms see it exactly like a nested member.
    /// Returns `Ok(None)` when the root has no textual representation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CyclicStructure`] if the graph contains a cycle.
    pub fn serialize_root(&mut self, value: &Value) -> Result<Option<String>> {
        let wrapper = Object::new();
        wrapper.insert("", value.clone());
        self.serialize_member(&Key::Name(String::new()), &Holder::Object(wrapper))
    }

    fn serialize_member(&mut self, key: &Key, holder: &Holder) -> Result<Option<String>> {
        let value = holder.get(key).unwrap_or_else(|err| {
            tracing::trace!(%key, error = %err, "member access failed, treating as undefined");
            Value::Undefined
        });

        let value = match value {
            Value::Date(date) => date.to_iso_string().map_or(Value::Null, Value::String),
            Value::Custom(custom) => custom.to_json(key),
            other => other,
        };

        let value = match self.replacer {
            Replacer::Transform(transform) => transform.call(holder, key, value),
            _ => value,
        };

        self.serialize_value(key, value)
    }

    fn serialize_value(&mut self, key: &Key, value: Value) -> Result<Option<String>> {
        let mut output = String::new();
        match value {
            Value::Undefined | Value::Function(_) => return Ok(None),
            Value::Null => output.push_str("null"),
            Value::Bool(b) => output.push_str(if b { "true" } else { "false" }),
            Value::Number(n) => write_number(&mut output, &n),
            Value::String(s) => write_quoted(&mut output, &s),
            Value::Date(date) => match date.to_iso_string() {
                Some(s) => write_quoted(&mut output, &s),
                None => output.push_str("null"),
            },
            Value::Array(array) => {
                self.enter(key, array.identity())?;
                let result = self.serialize_array(&array, &mut output);
                self.stack.pop();
                result?;
            }
            Value::Object(object) => {
                self.enter(key, object.identity())?;
                let result = self.serialize_object(&object, &mut output);
                self.stack.pop();
                result?;
            }
            // a hook that survived conversion has no enumerable members
            Value::Custom(custom) => {
                self.enter(key, custom.identity())?;
                self.write_body(&mut output, '{', '}', &[]);
                self.stack.pop();
            }
        }
        Ok(Some(output))
    }

    fn enter(&mut self, key: &Key, identity: *const ()) -> Result<()> {
        if self.stack.contains(identity) {
            tracing::debug!(%key, depth = self.stack.depth(), "cyclic structure detected");
            return Err(Error::cyclic(key));
        }
        self.stack.push(identity);
        Ok(())
    }

    fn serialize_array(&mut self, array: &Array, output: &mut String) -> Result<()> {
        let holder = Holder::Array(array.clone());
        let length = array.len();
        let mut elements = Vec::with_capacity(length);
        for index in 0..length {
            let element = self.serialize_member(&Key::Index(index), &holder)?;
            elements.push(element.unwrap_or_else(|| "null".to_string()));
        }
        self.write_body(output, '[', ']', &elements);
        Ok(())
    }

    fn serialize_object(&mut self, object: &Object, output: &mut String) -> Result<()> {
        let holder = Holder::Object(object.clone());
        let replacer = self.replacer;
        let names = match replacer {
            Replacer::AllowList(list) => list.names().to_vec(),
            _ => object.keys(),
        };
        let separator = if self.indent.is_empty() { ":" } else { ": " };

        let mut members = Vec::with_capacity(names.len());
        for name in names {
            let key = Key::Name(name.clone());
            if let Some(element) = self.serialize_member(&key, &holder)? {
                let mut member = String::with_capacity(name.len() + element.len() + 4);
                write_quoted(&mut member, &name);
                member.push_str(separator);
                member.push_str(&element);
                members.push(member);
            }
        }
        self.write_body(output, '{', '}', &members);
        Ok(())
    }

    /// Joins already-serialized parts inside `open`/`close`, one per line when
    /// indenting. Must be called while the container is still on the stack.
    fn write_body(&self, output: &mut String, open: char, close: char, parts: &[String]) {
        output.push(open);
        if parts.is_empty() {
            output.push(close);
            return;
        }

        if self.indent.is_empty() {
            output.push_str(&parts.join(","));
        } else {
            let depth = self.stack.depth();
            let inner = self.indent.repeat(depth);
            output.push('\n');
            output.push_str(&inner);
            output.push_str(&parts.join(&format!(",\n{}", inner)));
            output.push('\n');
            output.push_str(&self.indent.repeat(depth.saturating_sub(1)));
        }
        output.push(close);
    }
}

fn write_number(output: &mut String, number: &Number) {
    if number.is_finite() {
        output.push_str(&number.to_string());
    } else {
        output.push_str("null");
    }
}

/// A `serde::Serializer` producing a fresh, acyclic [`Value`] tree.
///
/// Structs and string-keyed maps become objects in field order, sequences and
/// tuples become arrays, `None` and unit become `null`, and enum variants use
/// the externally tagged layout (`{"Variant": ...}`).
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: Members,
    current_key: Option<String>,
}

pub struct SerializeStructVariant {
    variant: &'static str,
    map: Members,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(v.iter().map(|&b| Value::from(b)).collect::<Array>().into())
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let object = Object::new();
        object.insert(variant, to_value(value)?);
        Ok(Value::Object(object))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            variant,
            map: Members::with_capacity(len),
        })
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeMap {
    fn new(capacity: usize) -> Self {
        SerializeMap {
            map: Members::with_capacity(capacity),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::from(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let object = Object::new();
        object.insert(self.variant, Value::from(self.vec));
        Ok(Value::Object(object))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            Value::Number(n) => {
                self.current_key = Some(n.to_string());
                Ok(())
            }
            _ => Err(Error::custom("map keys must be strings or numbers")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value(value)?.into());
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::from(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?.into());
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::from(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?.into());
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let object = Object::new();
        object.insert(self.variant, Value::from(self.map));
        Ok(Value::Object(object))
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}
