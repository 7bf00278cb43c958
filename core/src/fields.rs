//! Typed field access for [FromJson](crate::FromJson) implementations.
//!
//! ```
//! use serde_json::{json, Map, Value};
//! use stream_mapper_core::{fields, DecodeError, FromJson};
//!
//! struct User {
//!     name: String,
//!     nickname: Option<String>,
//! }
//!
//! impl FromJson for User {
//!     fn from_json(object: &Map<String, Value>) -> Result<Self, DecodeError> {
//!         Ok(User {
//!             name: fields::required(object, "name")?,
//!             nickname: fields::optional(object, "nickname")?,
//!         })
//!     }
//! }
//!
//! let value = json!({"name": "Alex"});
//! let user = User::from_json(value.as_object().unwrap()).unwrap();
//! assert_eq!(user.name, "Alex");
//! assert!(user.nickname.is_none());
//! ```

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use stream_mapper_path::Shape;

use crate::error::DecodeError;
use crate::serde_support::classify_serde_error;
use crate::traits::FromJson;

/// Reads `key` as a `T`. Fails with `MissingField` if the key is absent.
pub fn required<T: DeserializeOwned>(object: &Map<String, Value>, key: &str) -> Result<T, DecodeError> {
    let value = object.get(key).ok_or_else(|| DecodeError::missing_field(key))?;
    T::deserialize(value).map_err(|e| classify_serde_error(&e, key))
}

/// Reads `key` as a `T`, treating an absent key or `null` as `None`.
pub fn optional<T: DeserializeOwned>(object: &Map<String, Value>, key: &str) -> Result<Option<T>, DecodeError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => T::deserialize(value)
            .map(Some)
            .map_err(|e| classify_serde_error(&e, key)),
    }
}

/// Decodes the object stored under `key` with its own [FromJson] impl.
pub fn nested<T: FromJson>(object: &Map<String, Value>, key: &str) -> Result<T, DecodeError> {
    let value = object.get(key).ok_or_else(|| DecodeError::missing_field(key))?;
    let inner = value
        .as_object()
        .ok_or_else(|| DecodeError::type_mismatch(key, Shape::Object.name(), Shape::of(value).name()))?;
    T::from_json(inner).map_err(|e| e.within(key))
}

/// Decodes every object of the array stored under `key`. The first failing
/// element aborts, reported as `key[index]`.
pub fn nested_array<T: FromJson>(object: &Map<String, Value>, key: &str) -> Result<Vec<T>, DecodeError> {
    let value = object.get(key).ok_or_else(|| DecodeError::missing_field(key))?;
    let items = value
        .as_array()
        .ok_or_else(|| DecodeError::type_mismatch(key, Shape::Array.name(), Shape::of(value).name()))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let element = format!("{}[{}]", key, index);
            match item.as_object() {
                Some(inner) => T::from_json(inner).map_err(|e| e.within(&element)),
                None => Err(DecodeError::type_mismatch(
                    element,
                    Shape::Object.name(),
                    Shape::of(item).name(),
                )),
            }
        })
        .collect()
}
