use crate::error::{BoxError, DecodeError};
use serde_json::{Map, Value};

/// Converts one JSON object into a `T`.
///
/// Any `Fn(&Map<String, Value>) -> Result<T, E>` is a decoder, which includes
/// `T::from_json` for every [FromJson] type. Errors of type [DecodeError] are
/// reported as decoding failures; anything else is passed through as an
/// underlying failure.
pub trait Decoder<T> {
    type Error: Into<BoxError>;

    fn decode(&self, object: &Map<String, Value>) -> Result<T, Self::Error>;
}

impl<T, E, F> Decoder<T> for F
where
    F: Fn(&Map<String, Value>) -> Result<T, E>,
    E: Into<BoxError>,
{
    type Error = E;

    fn decode(&self, object: &Map<String, Value>) -> Result<T, E> {
        self(object)
    }
}

/// Types that know how to build themselves from a JSON object.
pub trait FromJson: Sized {
    fn from_json(object: &Map<String, Value>) -> Result<Self, DecodeError>;
}

/// Types that can write themselves back out as a JSON object.
pub trait ToJson {
    fn to_json(&self) -> Map<String, Value>;
}

/// Encodes every item of `items`, preserving order.
pub fn to_json_array<T: ToJson>(items: &[T]) -> Vec<Map<String, Value>> {
    items.iter().map(ToJson::to_json).collect()
}
