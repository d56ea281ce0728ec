//! Ordered member storage for objects.
//!
//! [`Members`] wraps an [`IndexMap`] so that an object's own members are
//! enumerated in insertion order. That enumeration order is exactly the order
//! in which the serializer emits members, so it is part of the output format:
//! `{"b":2,"a":1}` stays `{"b":2,"a":1}`.
//!
//! Each entry is a [`Property`]: either a plain data value or an accessor
//! whose getter runs when the member is read.
//!
//! ## Examples
//!
//! ```rust
//! use serde_stringify::{Members, Property, Value};
//!
//! let mut members = Members::new();
//! members.insert("b".to_string(), Property::from(Value::from(2)));
//! members.insert("a".to_string(), Property::from(Value::from(1)));
//!
//! let keys: Vec<_> = members.keys().cloned().collect();
//! assert_eq!(keys, vec!["b", "a"]);
//! ```

use crate::value::{Property, Value};
use indexmap::IndexMap;

/// An insertion-ordered map of member names to properties.
#[derive(Debug, Clone, Default)]
pub struct Members(IndexMap<String, Property>);

impl Members {
    /// Creates an empty `Members`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_stringify::Members;
    ///
    /// let members = Members::new();
    /// assert!(members.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Members(IndexMap::new())
    }

    /// Creates an empty `Members` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Members(IndexMap::with_capacity(capacity))
    }

    /// Inserts a member, returning the previous property under that name.
    ///
    /// Re-inserting an existing name keeps its original position.
    pub fn insert(&mut self, key: String, property: Property) -> Option<Property> {
        self.0.insert(key, property)
    }

    /// Returns the property stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Property> {
        self.0.get(key)
    }

    /// Removes a member while preserving the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Property> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over member names, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Property> {
        self.0.keys()
    }

    /// Returns an iterator over properties, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Property> {
        self.0.values()
    }

    /// Returns an iterator over `(name, property)` pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Property> {
        self.0.iter()
    }
}

impl IntoIterator for Members {
    type Item = (String, Property);
    type IntoIter = indexmap::map::IntoIter<String, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, Property)> for Members {
    fn from_iter<T: IntoIterator<Item = (String, Property)>>(iter: T) -> Self {
        Members(IndexMap::from_iter(iter))
    }
}

impl FromIterator<(String, Value)> for Members {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(key, value)| (key, Property::from(value)))
            .collect()
    }
}
