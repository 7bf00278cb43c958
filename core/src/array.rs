use serde_json::Value;
use stream_mapper_path::{extract, Path, Shape};
use tracing::{debug, trace};

use crate::error::{BoxError, DecodeError, ExpectedShape, MapperError, ShapeError};
use crate::normalize;
use crate::options::MapOptions;
use crate::traits::Decoder;

/// Decodes an array of objects per event.
///
/// The array is found at the root path; each element is optionally narrowed
/// further by the inner path before decoding. Decoding is all-or-nothing: the
/// first element that fails aborts the event and no partial array is produced.
#[derive(Debug, Clone)]
pub struct ArrayMapper<D> {
    decoder: D,
    root:    Option<Path>,
    inner:   Option<Path>,
}

impl<D> ArrayMapper<D> {
    pub fn new(decoder: D) -> Self {
        Self {
            decoder,
            root: None,
            inner: None,
        }
    }

    pub fn from_options(decoder: D, options: &MapOptions) -> Self {
        Self {
            decoder,
            root: options.root.clone(),
            inner: options.inner.clone(),
        }
    }

    pub fn with_root(mut self, root: impl Into<Path>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_inner(mut self, inner: impl Into<Path>) -> Self {
        self.inner = Some(inner.into());
        self
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_ref()
    }

    pub fn inner(&self) -> Option<&Path> {
        self.inner.as_ref()
    }

    pub fn decode<T>(&self, value: &Value) -> Result<Vec<T>, MapperError>
    where
        D: Decoder<T>,
    {
        let extracted = extract(value, self.root.as_ref());
        let elements = match extracted.found() {
            Some(Value::Array(items)) if items.iter().all(Value::is_object) => items,
            found => {
                let error = normalize::shape(ShapeError {
                    expected: ExpectedShape::ObjectArray,
                    found:    found.map(Shape::of),
                    path:     self.root.clone(),
                });
                debug!(path = ?self.root, %error, "no object array at root path");
                return Err(error);
            }
        };

        let mut decoded = Vec::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            let item = self.decode_element(index, element).map_err(|error| {
                debug!(path = ?self.root, inner = ?self.inner, index, %error, "array element failed, dropping batch");
                error
            })?;
            decoded.push(item);
        }

        trace!(path = ?self.root, len = decoded.len(), "decoded array");
        Ok(decoded)
    }

    fn decode_element<T>(&self, index: usize, element: &Value) -> Result<T, MapperError>
    where
        D: Decoder<T>,
    {
        let Some(object) = extract(element, self.inner.as_ref()).as_object() else {
            let inner = self
                .inner
                .as_ref()
                .map(Path::to_string)
                .unwrap_or_else(|| "none".to_owned());
            return Err(MapperError::from(DecodeError::custom(
                "",
                format!(
                    "Could not parse inner object of array element {} with inner path: {}",
                    index, inner
                ),
            )));
        };

        normalize::decoded(self.decoder.decode(object))
    }

    /// Maps one stream event. Upstream failures pass through as `Underlying`.
    pub fn map_event<T, E>(&self, event: Result<Value, E>) -> Result<Vec<T>, MapperError>
    where
        D: Decoder<T>,
        E: Into<BoxError>,
    {
        match event {
            Ok(value) => self.decode(&value),
            Err(error) => {
                let error = normalize::upstream(error);
                debug!(%error, "upstream failure");
                Err(error)
            }
        }
    }
}
