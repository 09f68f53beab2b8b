//! Environment for top-level bindings

use super::{Mapping, Value};
use crate::util::{find_similar_name, suggestion_threshold};
use serde::Serialize;

/// Flat, ordered set of bindings built while parsing.
///
/// There is a single scope: references inside nested dictionaries resolve
/// against the same top-level bindings. A name keeps the position of its
/// first definition even when it is later redefined.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Environment {
    bindings: Mapping,
}

impl Environment {
    /// Create an empty environment
    pub fn new() -> Self {
        Environment {
            bindings: Mapping::new(),
        }
    }

    /// Bind `name`, returning the value it replaced if it was already bound
    pub fn define(&mut self, name: String, value: Value) -> Option<Value> {
        self.bindings.insert(name, value)
    }

    /// Look up a binding
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Bound names in output order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Closest bound name to an undefined `name`, for diagnostics
    pub fn suggest(&self, name: &str) -> Option<String> {
        find_similar_name(name, self.names(), suggestion_threshold(name)).map(str::to_string)
    }
}

impl<'a> IntoIterator for &'a Environment {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}
