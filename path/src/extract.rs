use crate::path::Path;
use serde_json::{Map, Value};

/// The outcome of walking a [Path] through a JSON value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extracted<'a> {
    Found(&'a Value),
    NotFound,
}

impl<'a> Extracted<'a> {
    pub fn found(self) -> Option<&'a Value> {
        match self {
            Extracted::Found(value) => Some(value),
            Extracted::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Extracted::Found(_))
    }

    /// Returns the object at the path, or `None` if nothing was found or the
    /// value there is not an object.
    pub fn as_object(self) -> Option<&'a Map<String, Value>> {
        self.found().and_then(Value::as_object)
    }

    /// Returns the elements of the array at the path, provided every element
    /// is an object. A single non-object element makes the whole result `None`.
    pub fn as_object_array(self) -> Option<Vec<&'a Map<String, Value>>> {
        self.found()?
            .as_array()?
            .iter()
            .map(Value::as_object)
            .collect()
    }
}

/// Walks `value` along `path`.
///
/// A missing or empty path returns the value itself. Each key descends one
/// level; as soon as the current value is not an object or lacks the key the
/// walk stops with [Extracted::NotFound], without looking at the remaining keys.
pub fn extract<'a>(value: &'a Value, path: Option<&Path>) -> Extracted<'a> {
    let Some(path) = path else {
        return Extracted::Found(value);
    };

    let mut current = value;
    for key in path {
        match current {
            Value::Object(fields) => match fields.get(key) {
                Some(next) => current = next,
                None => return Extracted::NotFound,
            },
            _ => return Extracted::NotFound,
        }
    }
    Extracted::Found(current)
}
