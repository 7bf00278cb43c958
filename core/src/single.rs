use serde_json::Value;
use stream_mapper_path::{extract, Path, Shape};
use tracing::{debug, trace};

use crate::error::{BoxError, ExpectedShape, MapperError, ShapeError};
use crate::normalize;
use crate::options::MapOptions;
use crate::traits::Decoder;

/// Decodes one object per event, found at an optional root path.
#[derive(Debug, Clone)]
pub struct ObjectMapper<D> {
    decoder: D,
    root:    Option<Path>,
}

impl<D> ObjectMapper<D> {
    pub fn new(decoder: D) -> Self {
        Self { decoder, root: None }
    }

    /// Uses `options.root`; `options.inner` has no meaning for single objects.
    pub fn from_options(decoder: D, options: &MapOptions) -> Self {
        Self {
            decoder,
            root: options.root.clone(),
        }
    }

    pub fn with_root(mut self, root: impl Into<Path>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_ref()
    }

    /// Extracts the object at the root path and runs the decoder on it.
    pub fn decode<T>(&self, value: &Value) -> Result<T, MapperError>
    where
        D: Decoder<T>,
    {
        let extracted = extract(value, self.root.as_ref());
        let Some(object) = extracted.as_object() else {
            let error = normalize::shape(ShapeError {
                expected: ExpectedShape::Object,
                found:    extracted.found().map(Shape::of),
                path:     self.root.clone(),
            });
            debug!(path = ?self.root, %error, "no object at root path");
            return Err(error);
        };

        match normalize::decoded(self.decoder.decode(object)) {
            Ok(decoded) => {
                trace!(path = ?self.root, fields = object.len(), "decoded object");
                Ok(decoded)
            }
            Err(error) => {
                debug!(path = ?self.root, %error, decoding = error.is_decoding(), "decoder rejected object");
                Err(error)
            }
        }
    }

    /// Maps one stream event. Upstream failures pass through as `Underlying`.
    pub fn map_event<T, E>(&self, event: Result<Value, E>) -> Result<T, MapperError>
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::fields;
    use crate::test_log::capture;
    use serde_json::{json, Map};
    use std::io;

    #[derive(Debug, PartialEq)]
    struct User {
        name: String,
    }

    fn user(object: &Map<String, Value>) -> Result<User, DecodeError> {
        Ok(User { name: fields::required(object, "name")? })
    }

    #[test]
    fn decodes_top_level_object() {
        let mapper = ObjectMapper::new(user);
        let decoded = mapper.decode(&json!({"name": "Alex"})).unwrap();
        assert_eq!(decoded, User { name: "Alex".into() });
    }

    #[test]
    fn decodes_object_under_root_path() {
        let mapper = ObjectMapper::new(user).with_root(["user"]);
        let decoded = mapper.decode(&json!({"user": {"name": "Alex"}})).unwrap();
        assert_eq!(decoded.name, "Alex");
    }

    #[test]
    fn missing_root_is_underlying_shape_error() {
        let mapper = ObjectMapper::new(user).with_root(["missing"]);
        let err = mapper.decode(&json!({"user": {"name": "Alex"}})).unwrap_err();
        let shape = err.downcast_underlying_ref::<ShapeError>().unwrap();
        assert_eq!(shape.expected, ExpectedShape::Object);
        assert_eq!(shape.found, None);
        assert_eq!(shape.path, Some(Path::from(["missing"])));
    }

    #[test]
    fn non_object_value_is_underlying_shape_error() {
        let mapper = ObjectMapper::new(user);
        let err = mapper.decode(&json!([{"name": "Alex"}])).unwrap_err();
        let shape = err.downcast_underlying_ref::<ShapeError>().unwrap();
        assert_eq!(shape.found, Some(Shape::Array));
        assert_eq!(shape.path, None);
    }

    #[test]
    fn decoder_rejection_is_decoding_failed() {
        let mapper = ObjectMapper::new(user);
        let err = mapper.decode(&json!({"nam": "Alex"})).unwrap_err();
        assert_eq!(err.as_decode_error(), Some(&DecodeError::missing_field("name")));
    }

    #[test]
    fn foreign_decoder_error_is_underlying() {
        let mapper = ObjectMapper::new(|_: &Map<String, Value>| {
            Err::<User, _>(io::Error::new(io::ErrorKind::InvalidData, "corrupt"))
        });
        let err = mapper.decode(&json!({})).unwrap_err();
        assert!(err.downcast_underlying_ref::<io::Error>().is_some());
    }

    #[test]
    fn upstream_failure_passes_through() {
        let mapper = ObjectMapper::new(user);
        let event: Result<Value, io::Error> = Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
        match mapper.map_event(event) {
            Err(MapperError::Underlying(inner)) => {
                assert_eq!(
                    inner.downcast_ref::<io::Error>().map(io::Error::kind),
                    Some(io::ErrorKind::BrokenPipe)
                );
            }
            other => panic!("unexpected {:?}", other.map(|u: User| u.name)),
        }
    }

    #[test]
    fn options_supply_the_root() {
        let options = MapOptions::new().with_root(["user"]).with_inner(["ignored"]);
        let mapper = ObjectMapper::from_options(user, &options);
        assert_eq!(mapper.root(), Some(&Path::from(["user"])));
        assert!(mapper.decode(&json!({"user": {"name": "A"}})).is_ok());
    }

    #[test]
    fn failures_log_the_root_path() {
        let mapper = ObjectMapper::new(user).with_root(["missing"]);
        let (result, logged) = capture(|| mapper.decode(&json!({})));
        assert!(result.is_err());
        assert!(logged.contains("no object at root path"), "{}", logged);
        assert!(logged.contains(r#"path=Some(Path { keys: ["missing"] })"#), "{}", logged);

        let mapper = ObjectMapper::new(user).with_root(["user"]);
        let (_, logged) = capture(|| mapper.decode(&json!({"user": {}})));
        assert!(logged.contains("decoder rejected object"), "{}", logged);
        assert!(logged.contains(r#"path=Some(Path { keys: ["user"] })"#), "{}", logged);
    }
}
