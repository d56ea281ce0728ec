//! The in-memory value graph that gets stringified.
//!
//! [`Value`] models every kind of value the serializer can be handed: the JSON
//! scalars, `undefined`, shared arrays and objects, dates, functions, and
//! values that carry their own conversion hook ([`ToJson`]).
//!
//! ## Reference semantics
//!
//! [`Array`] and [`Object`] are handles to shared, interior-mutable storage.
//! Cloning a handle never copies the contents, and two handles are the same
//! value only if they point at the same storage. This is what makes cyclic
//! graphs expressible, and what the serializer's cycle check compares:
//!
//! ```rust
//! use serde_stringify::{Object, Value};
//!
//! let parent = Object::new();
//! let child = Object::new();
//! child.insert("parent", parent.clone());
//! parent.insert("child", child.clone());
//!
//! let back = child.get("parent").unwrap();
//! assert!(matches!(back, Value::Object(o) if o.ptr_eq(&parent)));
//! ```
//!
//! ## Creating values
//!
//! ```rust
//! use serde_stringify::{value, Value};
//!
//! let null = Value::Null;
//! let boolean = Value::from(true);
//! let number = Value::from(42);
//! let text = Value::from("hello");
//!
//! let obj = value!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! assert!(obj.is_object());
//! ```
//!
//! ## Accessors and conversion hooks
//!
//! ```rust
//! use serde_stringify::{stringify, AccessError, Custom, Key, Object, StringifyOptions, Value};
//!
//! let obj = Object::new();
//! obj.define_getter("broken", || Err(AccessError::new("boom")));
//! obj.insert("money", Custom::new(|_key: &Key| Value::from("12.50 EUR")));
//!
//! let text = stringify(&Value::Object(obj), &StringifyOptions::new()).unwrap();
//! assert_eq!(text.as_deref(), Some(r#"{"money":"12.50 EUR"}"#));
//! ```

use crate::date::Date;
use crate::error::AccessError;
use crate::map::Members;
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Any value the serializer can walk.
///
/// Equality follows strict-equality rules: scalars compare by value, while
/// arrays, objects, functions and custom values compare by identity.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Array),
    Object(Object),
    Date(Date),
    Function(Function),
    Custom(Custom),
}

/// A numeric value: an exact integer, a float, or one of the non-finite values.
///
/// Non-finite numbers have no JSON form and stringify as `null`. Finite
/// floats are written the way ECMAScript's `Number.prototype.toString` writes
/// them.
///
/// `Integer` values are printed exactly, digit for digit. Beyond ±2^53 this
/// differs from a host that holds every number as a double: `2^53 + 1`
/// prints as `9007199254740993` here, not `9007199254740992`. Store the value
/// as `Float` to get the double's text.
///
/// # Examples
///
/// ```rust
/// use serde_stringify::Number;
///
/// assert_eq!(Number::from(1.0).to_string(), "1");
/// assert_eq!(Number::from(1e21).to_string(), "1e+21");
/// assert_eq!(Number::from(0.000001).to_string(), "0.000001");
/// assert_eq!(Number::from(f64::NAN), Number::NaN);
/// assert!(!Number::Infinity.is_finite());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
    Infinity,
    NegativeInfinity,
    NaN,
}

impl Number {
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` unless this is ±Infinity or NaN.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Number::Integer(_) => true,
            Number::Float(f) => f.is_finite(),
            _ => false,
        }
    }

    /// Converts this number to an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
            Number::Infinity => f64::INFINITY,
            Number::NegativeInfinity => f64::NEG_INFINITY,
            Number::NaN => f64::NAN,
        }
    }
}

/// Writes a finite float in ECMAScript `Number::toString` form.
fn write_ecmascript_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value == 0.0 {
        return f.write_str("0");
    }
    if value < 0.0 {
        f.write_str("-")?;
    }

    // `{:e}` yields the shortest round-tripping digits, e.g. "1.2345e-7".
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();

    let k = digits.len() as i32;
    let n = exponent + 1;

    if k <= n && n <= 21 {
        write!(f, "{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (whole, fraction) = digits.split_at(n as usize);
        write!(f, "{}.{}", whole, fraction)
    } else if -6 < n && n <= 0 {
        write!(f, "0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let e = n - 1;
        let sign = if e < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            write!(f, "{}e{}{}", first, sign, e.abs())
        } else {
            write!(f, "{}.{}e{}{}", first, rest, sign, e.abs())
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) if fl.is_nan() => f.write_str("NaN"),
            Number::Float(fl) if fl.is_infinite() => {
                f.write_str(if *fl > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Number::Float(fl) => write_ecmascript_float(f, *fl),
            Number::Infinity => f.write_str("Infinity"),
            Number::NegativeInfinity => f.write_str("-Infinity"),
            Number::NaN => f.write_str("NaN"),
        }
    }
}

macro_rules! number_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::Integer(value as i64)
                }
            }
        )*
    };
}

number_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(Number::Integer)
            .unwrap_or(Number::Float(value as f64))
    }
}

impl From<usize> for Number {
    fn from(value: usize) -> Self {
        Number::from(value as u64)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        // keep the shortest f32 digits instead of the widened binary value
        let widened = value.to_string().parse::<f64>().unwrap_or(f64::from(value));
        Number::from(widened)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Number::NaN
        } else if value == f64::INFINITY {
            Number::Infinity
        } else if value == f64::NEG_INFINITY {
            Number::NegativeInfinity
        } else {
            Number::Float(value)
        }
    }
}

/// The name under which a value is found in its holder.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Name(String),
    Index(usize),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => f.write_str(name),
            Key::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Name(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Name(value)
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        Key::Index(value)
    }
}

/// The container a key is looked up in.
#[derive(Clone, Debug, PartialEq)]
pub enum Holder {
    Object(Object),
    Array(Array),
}

impl Holder {
    /// Reads the member at `key`; absent members are `undefined`.
    pub fn get(&self, key: &Key) -> Result<Value, AccessError> {
        match (self, key) {
            (Holder::Object(object), Key::Name(name)) => object.get(name),
            (Holder::Object(object), Key::Index(index)) => object.get(&index.to_string()),
            (Holder::Array(array), Key::Index(index)) => Ok(array.get(*index).unwrap_or_default()),
            (Holder::Array(array), Key::Name(name)) => Ok(name
                .parse::<usize>()
                .ok()
                .and_then(|index| array.get(index))
                .unwrap_or_default()),
        }
    }
}

/// Getter closure backing an accessor member.
#[derive(Clone)]
pub struct Getter(Rc<dyn Fn() -> Result<Value, AccessError>>);

impl Getter {
    pub fn new<F>(getter: F) -> Self
    where
        F: Fn() -> Result<Value, AccessError> + 'static,
    {
        Getter(Rc::new(getter))
    }

    pub fn get(&self) -> Result<Value, AccessError> {
        (self.0)()
    }
}

impl fmt::Debug for Getter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Getter(..)")
    }
}

/// An object member: stored data or a computed accessor.
#[derive(Clone, Debug)]
pub enum Property {
    Data(Value),
    Accessor(Getter),
}

impl Property {
    /// Produces the member's current value, running the getter if there is one.
    pub fn read(&self) -> Result<Value, AccessError> {
        match self {
            Property::Data(value) => Ok(value.clone()),
            Property::Accessor(getter) => getter.get(),
        }
    }
}

impl From<Value> for Property {
    fn from(value: Value) -> Self {
        Property::Data(value)
    }
}

/// Shared handle to an ordered list of values.
#[derive(Clone, Default)]
pub struct Array(Rc<RefCell<Vec<Value>>>);

impl Array {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Returns a copy of the element handle at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.0.borrow_mut().push(value.into());
    }

    /// Stores `value` at `index`, filling any gap with `undefined` holes.
    pub fn set(&self, index: usize, value: impl Into<Value>) {
        let mut elements = self.0.borrow_mut();
        if index >= elements.len() {
            elements.resize(index + 1, Value::Undefined);
        }
        elements[index] = value.into();
    }

    /// Returns a snapshot of the element handles.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    /// Returns `true` if both handles refer to the same array.
    #[must_use]
    pub fn ptr_eq(&self, other: &Array) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn identity(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("id", &self.identity())
            .field("len", &self.len())
            .finish()
    }
}

impl From<Vec<Value>> for Array {
    fn from(values: Vec<Value>) -> Self {
        Array(Rc::new(RefCell::new(values)))
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Array::from(iter.into_iter().collect::<Vec<_>>())
    }
}

/// Shared handle to an object's ordered members.
#[derive(Clone, Default)]
pub struct Object(Rc<RefCell<Members>>);

impl Object {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a data member, returning the previous property under that name.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Property> {
        self.0
            .borrow_mut()
            .insert(key.into(), Property::Data(value.into()))
    }

    /// Defines an accessor member whose getter runs on every read.
    pub fn define_getter<F>(&self, key: impl Into<String>, getter: F) -> Option<Property>
    where
        F: Fn() -> Result<Value, AccessError> + 'static,
    {
        self.0
            .borrow_mut()
            .insert(key.into(), Property::Accessor(Getter::new(getter)))
    }

    /// Reads a member. Missing members read as `undefined`; accessor failures
    /// are returned to the caller.
    ///
    /// The member map is only borrowed while the property is copied out, so a
    /// getter may freely read or modify this object.
    pub fn get(&self, key: &str) -> Result<Value, AccessError> {
        let property = self.0.borrow().get(key).cloned();
        match property {
            Some(property) => property.read(),
            None => Ok(Value::Undefined),
        }
    }

    pub fn remove(&self, key: &str) -> Option<Property> {
        self.0.borrow_mut().remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    /// Own member names in enumeration (insertion) order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Returns `true` if both handles refer to the same object.
    #[must_use]
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn identity(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("id", &self.identity())
            .field("keys", &self.keys())
            .finish()
    }
}

impl From<Members> for Object {
    fn from(members: Members) -> Self {
        Object(Rc::new(RefCell::new(members)))
    }
}

/// An opaque callable. Functions have no JSON form.
#[derive(Clone)]
pub struct Function(Rc<dyn Fn(&[Value]) -> Value>);

impl Function {
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Function(Rc::new(function))
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Function(..)")
    }
}

/// A custom conversion hook, consulted before a value is stringified.
///
/// `key` is the member name (or index) the value was found under; the root
/// value is found under the empty name.
pub trait ToJson {
    fn to_json(&self, key: &Key) -> Value;
}

impl<F> ToJson for F
where
    F: Fn(&Key) -> Value,
{
    fn to_json(&self, key: &Key) -> Value {
        self(key)
    }
}

/// A value that converts itself through [`ToJson`] before serialization.
///
/// The hook runs once per visit. A `Custom` that is still present after
/// conversion (returned by a transform or by another hook) is written as an
/// empty object.
#[derive(Clone)]
pub struct Custom(Rc<dyn ToJson>);

impl Custom {
    pub fn new<T: ToJson + 'static>(inner: T) -> Self {
        Custom(Rc::new(inner))
    }

    pub fn to_json(&self, key: &Key) -> Value {
        self.0.to_json(key)
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Custom) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn identity(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }
}

impl PartialEq for Custom {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Custom(..)")
    }
}

impl Value {
    /// Creates an empty array value.
    #[must_use]
    pub fn array() -> Self {
        Value::Array(Array::new())
    }

    /// Creates an empty object value.
    #[must_use]
    pub fn object() -> Self {
        Value::Object(Object::new())
    }

    #[inline]
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, Value::Date(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_stringify::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a number, returns it as an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_date(&self) -> Option<&Date> {
        match self {
            Value::Date(date) => Some(date),
            _ => None,
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Number(n) => Ok(n.as_f64()),
            _ => Err(crate::Error::custom(format!(
                "expected number, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected bool, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {:?}",
                value
            ))),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::from(value))
                }
            }
        )*
    };
}

value_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(Array::from(value))
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl From<Members> for Value {
    fn from(value: Members) -> Self {
        Value::Object(Object::from(value))
    }
}

impl From<Date> for Value {
    fn from(value: Date) -> Self {
        Value::Date(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Date(Date::from(value))
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Value::Function(value)
    }
}

impl From<Custom> for Value {
    fn from(value: Custom) -> Self {
        Value::Custom(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
