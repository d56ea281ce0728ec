//! Configuration options for stringification.
//!
//! This module provides types to customize the output:
//!
//! - [`StringifyOptions`]: Main configuration struct
//! - [`Indent`]: One level of pretty-printing indentation
//! - [`Replacer`]: A transform applied to every member, or an allow-list of
//!   member names
//!
//! Malformed settings are normalized rather than rejected: widths are
//! truncated and clamped to `0..=10`, indentation strings are cut to ten
//! characters, and allow-list entries that are neither strings nor numbers are
//! ignored.
//!
//! ## Examples
//!
//! ```rust
//! use serde_stringify::{stringify, value, StringifyOptions};
//!
//! let data = value!({ "a": 1, "b": 2 });
//!
//! let options = StringifyOptions::new().with_allow_list(["a"]);
//! assert_eq!(stringify(&data, &options).unwrap().as_deref(), Some(r#"{"a":1}"#));
//!
//! let options = StringifyOptions::new().with_indent("\t");
//! assert_eq!(
//!     stringify(&data, &options).unwrap().as_deref(),
//!     Some("{\n\t\"a\": 1,\n\t\"b\": 2\n}")
//! );
//! ```

use crate::value::{Function, Holder, Key, Number, Value};
use std::fmt;
use std::rc::Rc;

/// Longest indentation unit, in spaces or characters.
pub const MAX_INDENT: usize = 10;

/// One level of indentation for pretty-printed output.
///
/// # Examples
///
/// ```rust
/// use serde_stringify::Indent;
///
/// assert_eq!(Indent::from(2).unit(), "  ");
/// assert_eq!(Indent::from(3.9).unit(), "   ");
/// assert_eq!(Indent::from(40).unit().len(), 10);
/// assert_eq!(Indent::from(-1).unit(), "");
/// assert_eq!(Indent::from("--").unit(), "--");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Indent {
    /// A number of spaces; the fraction is dropped and the count is clamped
    /// to `0..=10`.
    Width(f64),
    /// A literal string, cut to its first ten characters.
    Text(String),
}

impl Indent {
    /// Returns the normalized indentation unit. An empty unit means compact
    /// output.
    #[must_use]
    pub fn unit(&self) -> String {
        match self {
            Indent::Width(width) => {
                let width = width.trunc();
                if width >= 1.0 {
                    " ".repeat(width.min(MAX_INDENT as f64) as usize)
                } else {
                    String::new()
                }
            }
            Indent::Text(text) => text.chars().take(MAX_INDENT).collect(),
        }
    }

    /// Interprets an arbitrary value as an indentation setting.
    ///
    /// Numbers become widths and strings become literal units; anything else
    /// means no indentation.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Indent> {
        match value {
            Value::Number(n) => Some(Indent::Width(n.as_f64())),
            Value::String(s) => Some(Indent::Text(s.clone())),
            _ => None,
        }
    }
}

impl From<usize> for Indent {
    fn from(value: usize) -> Self {
        Indent::Width(value as f64)
    }
}

impl From<i32> for Indent {
    fn from(value: i32) -> Self {
        Indent::Width(f64::from(value))
    }
}

impl From<u32> for Indent {
    fn from(value: u32) -> Self {
        Indent::Width(f64::from(value))
    }
}

impl From<f64> for Indent {
    fn from(value: f64) -> Self {
        Indent::Width(value)
    }
}

impl From<&str> for Indent {
    fn from(value: &str) -> Self {
        Indent::Text(value.to_string())
    }
}

impl From<String> for Indent {
    fn from(value: String) -> Self {
        Indent::Text(value)
    }
}

/// A function applied to every member before it is written.
///
/// It receives the holder, the key and the (already converted) value, and
/// returns the value to serialize instead. Returning [`Value::Undefined`]
/// drops an object member, or writes `null` for an array element.
#[derive(Clone)]
pub struct Transform(Rc<dyn Fn(&Holder, &Key, Value) -> Value>);

impl Transform {
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(&Holder, &Key, Value) -> Value + 'static,
    {
        Transform(Rc::new(transform))
    }

    pub fn call(&self, holder: &Holder, key: &Key, value: Value) -> Value {
        (self.0)(holder, key, value)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(..)")
    }
}

/// One allow-list entry: a member name, or a number naming a member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllowEntry(String);

impl AllowEntry {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AllowEntry {
    fn from(value: &str) -> Self {
        AllowEntry(value.to_string())
    }
}

impl From<String> for AllowEntry {
    fn from(value: String) -> Self {
        AllowEntry(value)
    }
}

impl From<Number> for AllowEntry {
    fn from(value: Number) -> Self {
        AllowEntry(value.to_string())
    }
}

macro_rules! allow_entry_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AllowEntry {
                fn from(value: $ty) -> Self {
                    AllowEntry::from(Number::from(value))
                }
            }
        )*
    };
}

allow_entry_from_number!(i32, i64, u32, u64, usize, f64);

/// The ordered set of member names an object may emit.
///
/// Names are visited in the order given; later duplicates are dropped.
///
/// # Examples
///
/// ```rust
/// use serde_stringify::AllowList;
///
/// let list = AllowList::new(["b", "a", "b"]);
/// assert_eq!(list.names(), ["b", "a"]);
///
/// let list = AllowList::new([1.0, 2.5]);
/// assert_eq!(list.names(), ["1", "2.5"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AllowList {
    names: Vec<String>,
}

impl AllowList {
    pub fn new<I, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<AllowEntry>,
    {
        let mut names: Vec<String> = Vec::new();
        for entry in entries {
            let AllowEntry(name) = entry.into();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        AllowList { names }
    }

    /// Builds an allow-list from arbitrary values, keeping strings and numbers.
    #[must_use]
    pub fn from_values(values: &[Value]) -> Self {
        AllowList::new(values.iter().filter_map(|value| match value {
            Value::String(s) => Some(AllowEntry::from(s.as_str())),
            Value::Number(n) => Some(AllowEntry::from(n.clone())),
            _ => None,
        }))
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// How members are filtered or replaced. At most one policy is active.
#[derive(Clone, Debug, Default)]
pub enum Replacer {
    #[default]
    None,
    Transform(Transform),
    AllowList(AllowList),
}

impl Replacer {
    pub fn transform<F>(transform: F) -> Self
    where
        F: Fn(&Holder, &Key, Value) -> Value + 'static,
    {
        Replacer::Transform(Transform::new(transform))
    }

    pub fn allow_list<I, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<AllowEntry>,
    {
        Replacer::AllowList(AllowList::new(entries))
    }

    /// Interprets an arbitrary value as a replacer.
    ///
    /// A function becomes a transform called with `[key, value, holder]`, an array
    /// becomes an allow-list of its string and number elements, and anything
    /// else is ignored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_stringify::{value, Replacer};
    ///
    /// let replacer = Replacer::from_value(&value!(["a", 1, true, null]));
    /// match replacer {
    ///     Replacer::AllowList(list) => assert_eq!(list.names(), ["a", "1"]),
    ///     _ => unreachable!(),
    /// }
    ///
    /// assert!(matches!(Replacer::from_value(&value!("a")), Replacer::None));
    /// ```
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Function(function) => {
                let function: Function = function.clone();
                Replacer::transform(move |holder, key, value| {
                    let holder = match holder {
                        Holder::Object(object) => Value::Object(object.clone()),
                        Holder::Array(array) => Value::Array(array.clone()),
                    };
                    function.call(&[Value::String(key.to_string()), value, holder])
                })
            }
            Value::Array(array) => Replacer::AllowList(AllowList::from_values(&array.to_vec())),
            _ => Replacer::None,
        }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Replacer::None)
    }
}

/// Configuration options for stringification.
///
/// # Examples
///
/// ```rust
/// use serde_stringify::{StringifyOptions, Value};
///
/// // Compact output, no replacer
/// let options = StringifyOptions::new();
///
/// // Two-space indentation
/// let options = StringifyOptions::pretty();
///
/// // Custom configuration
/// let options = StringifyOptions::new()
///     .with_indent(4)
///     .with_transform(|_holder, _key, value| match value {
///         Value::String(s) => Value::String(s.to_uppercase()),
///         other => other,
///     });
/// ```
#[derive(Clone, Debug, Default)]
pub struct StringifyOptions {
    pub replacer: Replacer,
    pub indent: Option<Indent>,
}

impl StringifyOptions {
    /// Creates default options (compact output, no replacer).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for output indented by two spaces per level.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_stringify::StringifyOptions;
    ///
    /// assert_eq!(StringifyOptions::pretty().indent_unit(), "  ");
    /// ```
    #[must_use]
    pub fn pretty() -> Self {
        StringifyOptions {
            indent: Some(Indent::Width(2.0)),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<Indent>) -> Self {
        self.indent = Some(indent.into());
        self
    }

    #[must_use]
    pub fn with_replacer(mut self, replacer: Replacer) -> Self {
        self.replacer = replacer;
        self
    }

    /// Replaces any active replacer with a transform.
    #[must_use]
    pub fn with_transform<F>(self, transform: F) -> Self
    where
        F: Fn(&Holder, &Key, Value) -> Value + 'static,
    {
        self.with_replacer(Replacer::transform(transform))
    }

    /// Replaces any active replacer with an allow-list.
    #[must_use]
    pub fn with_allow_list<I, E>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<AllowEntry>,
    {
        self.with_replacer(Replacer::allow_list(entries))
    }

    /// The normalized indentation unit; empty for compact output.
    #[must_use]
    pub fn indent_unit(&self) -> String {
        self.indent.as_ref().map(Indent::unit).unwrap_or_default()
    }
}
