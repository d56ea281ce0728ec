//! Error types for stringification.
//!
//! Stringifying a value graph has exactly one user-visible failure: revisiting
//! an array or object that is already being serialized. Everything else is
//! absorbed:
//!
//! - **Cyclic structures** abort the whole call with [`Error::CyclicStructure`]
//!   and no partial output.
//! - **Accessor failures** ([`AccessError`]) raised while reading a member are
//!   swallowed and the member is treated as `undefined`.
//! - **Malformed options** (odd indentation widths, non-string allow-list
//!   entries) are normalized, never rejected.
//!
//! The remaining variants belong to the Serde and I/O conveniences layered on
//! top of the core serializer.
//!
//! ## Examples
//!
//! ```rust
//! use serde_stringify::{stringify, value, Error, StringifyOptions, Value};
//!
//! let node = value!({ "name": "loop" });
//! if let Value::Object(obj) = &node {
//!     obj.insert("self", node.clone());
//! }
//!
//! let result = stringify(&node, &StringifyOptions::new());
//! assert!(matches!(result, Err(Error::CyclicStructure { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all errors that can surface from stringification.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// An array or object was reached again while it was still being serialized.
    #[error("Converting circular structure to JSON: cycle detected at key {key:?}")]
    CyclicStructure { key: String },

    /// IO error while writing the output
    #[error("IO error: {0}")]
    Io(String),

    /// The top-level value has no textual representation.
    #[error("Top-level value has no JSON representation")]
    Omitted,

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a cyclic structure error for the member at `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_stringify::Error;
    ///
    /// let err = Error::cyclic("self");
    /// assert!(err.to_string().contains("\"self\""));
    /// ```
    pub fn cyclic(key: impl fmt::Display) -> Self {
        Error::CyclicStructure {
            key: key.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_stringify::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` if this error was caused by a cyclic structure.
    #[must_use]
    pub const fn is_cyclic(&self) -> bool {
        matches!(self, Error::CyclicStructure { .. })
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

/// Failure raised by an accessor member while its value is being read.
///
/// The serializer never propagates this; the member is serialized as if it
/// were `undefined`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("member access failed: {0}")]
pub struct AccessError(pub String);

impl AccessError {
    pub fn new(msg: impl fmt::Display) -> Self {
        AccessError(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyclic_message_names_key() {
        let err = Error::cyclic(3);
        assert!(err.is_cyclic());
        assert_eq!(
            err.to_string(),
            "Converting circular structure to JSON: cycle detected at key \"3\""
        );
    }

    #[test]
    fn test_serde_custom() {
        let err = <Error as serde::ser::Error>::custom("bad key");
        assert_eq!(err, Error::Custom("bad key".to_string()));
        assert!(!err.is_cyclic());
    }

    #[test]
    fn test_access_error_display() {
        let err = AccessError::new("getter exploded");
        assert_eq!(err.to_string(), "member access failed: getter exploded");
    }
}
