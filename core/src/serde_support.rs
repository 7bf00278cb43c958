use std::marker::PhantomData;

use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::traits::Decoder;

lazy_static! {
    pub static ref MISSING_FIELD_RX: Regex = Regex::new(r"^missing field `([^`]*)`").unwrap();
    pub static ref INVALID_TYPE_RX:  Regex = Regex::new(r"^invalid type: (.+), expected (.+)$").unwrap();
    pub static ref INVALID_VALUE_RX: Regex = Regex::new(r"^invalid value: (.+), expected (.+)$").unwrap();
}

/// Translates a serde error into a [DecodeError].
///
/// `field` is the key being read when the error happened, or `""` when a whole
/// object was deserialized. A missing field reported by serde names its own
/// field, which is then qualified with `field`.
pub fn classify_serde_error(error: &serde_json::Error, field: &str) -> DecodeError {
    let message = error.to_string();

    if let Some(caps) = MISSING_FIELD_RX.captures(&message) {
        let missing = DecodeError::missing_field(&caps[1]);
        return if field.is_empty() { missing } else { missing.within(field) };
    }
    if let Some(caps) = INVALID_TYPE_RX.captures(&message) {
        return DecodeError::type_mismatch(field, &caps[2], &caps[1]);
    }
    if let Some(caps) = INVALID_VALUE_RX.captures(&message) {
        return DecodeError::invalid_value(field, &caps[1], format!("expected {}", &caps[2]));
    }
    DecodeError::custom(field, message)
}

impl From<serde_json::Error> for DecodeError {
    fn from(error: serde_json::Error) -> Self {
        classify_serde_error(&error, "")
    }
}

/// A [Decoder] for any type implementing `serde::Deserialize`.
pub struct SerdeDecoder<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> SerdeDecoder<T> {
    pub fn new() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<T> Default for SerdeDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SerdeDecoder<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SerdeDecoder<T> {}

impl<T: DeserializeOwned> Decoder<T> for SerdeDecoder<T> {
    type Error = DecodeError;

    fn decode(&self, object: &Map<String, Value>) -> Result<T, DecodeError> {
        serde_json::from_value(Value::Object(object.clone())).map_err(DecodeError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct User {
        name: String,
        age:  u8,
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        }
    }

    #[test]
    fn decodes_through_serde() {
        let decoder = SerdeDecoder::<User>::new();
        let user = decoder.decode(&object(json!({"name": "Alex", "age": 30}))).unwrap();
        assert_eq!(user, User { name: "Alex".into(), age: 30 });
    }

    #[test]
    fn missing_field_is_classified() {
        let decoder = SerdeDecoder::<User>::new();
        let err = decoder.decode(&object(json!({"age": 30}))).unwrap_err();
        assert_eq!(err, DecodeError::missing_field("name"));
    }

    #[test]
    fn type_and_value_errors_are_classified() {
        let decoder = SerdeDecoder::<User>::new();

        let err = decoder.decode(&object(json!({"name": 1, "age": 30}))).unwrap_err();
        assert!(matches!(err, DecodeError::TypeMismatch { ref expected, .. } if expected == "a string"));

        let err = decoder.decode(&object(json!({"name": "Alex", "age": 300}))).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidValue { .. }), "{:?}", err);
    }
}
