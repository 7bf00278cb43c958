use std::error::Error as StdError;
use std::fmt;

use stream_mapper_path::{Path, Shape};
use thiserror::Error;

/// Opaque error currency for failures the mappers do not interpret.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A decoder rejected the content of a JSON object.
///
/// Every variant names the offending field; the field is empty when the
/// failure is not tied to one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Missing required field \"{field}\"")]
    MissingField { field: String },

    #[error("Field \"{field}\" has type {found}, expected {expected}")]
    TypeMismatch {
        field:    String,
        expected: String,
        found:    String,
    },

    #[error("Field \"{field}\" has invalid value {value}: {message}")]
    InvalidValue {
        field:   String,
        value:   String,
        message: String,
    },

    #[error("{message}")]
    Custom { field: String, message: String },
}

impl DecodeError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        DecodeError::MissingField { field: field.into() }
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        DecodeError::TypeMismatch {
            field:    field.into(),
            expected: expected.into(),
            found:    found.into(),
        }
    }

    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        DecodeError::InvalidValue {
            field:   field.into(),
            value:   value.into(),
            message: message.into(),
        }
    }

    pub fn custom(field: impl Into<String>, message: impl Into<String>) -> Self {
        DecodeError::Custom {
            field:   field.into(),
            message: message.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            DecodeError::MissingField { field }
            | DecodeError::TypeMismatch { field, .. }
            | DecodeError::InvalidValue { field, .. }
            | DecodeError::Custom { field, .. } => field,
        }
    }

    /// The human readable reason, without the field name for custom errors.
    pub fn message(&self) -> String {
        match self {
            DecodeError::Custom { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Qualifies the field with the key of the enclosing object, so a failure
    /// inside `user` on field `name` reports `user.name`.
    pub fn within(self, parent: &str) -> Self {
        let qualify = |field: String| {
            if field.is_empty() {
                parent.to_owned()
            } else {
                format!("{}.{}", parent, field)
            }
        };
        match self {
            DecodeError::MissingField { field } => DecodeError::MissingField {
                field: qualify(field),
            },
            DecodeError::TypeMismatch { field, expected, found } => DecodeError::TypeMismatch {
                field: qualify(field),
                expected,
                found,
            },
            DecodeError::InvalidValue { field, value, message } => DecodeError::InvalidValue {
                field: qualify(field),
                value,
                message,
            },
            DecodeError::Custom { field, message } => DecodeError::Custom {
                field: qualify(field),
                message,
            },
        }
    }
}

/// The shape a root path was expected to lead to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedShape {
    Object,
    ObjectArray,
}

impl fmt::Display for ExpectedShape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExpectedShape::Object => f.write_str("an object"),
            ExpectedShape::ObjectArray => f.write_str("an array of objects"),
        }
    }
}

/// The value at the root path was missing or had the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "The provided value could not be read as {expected} (found {}) or there is no value at the given root path: {}",
    describe_found(.found),
    describe_path(.path)
)]
pub struct ShapeError {
    pub expected: ExpectedShape,
    pub found:    Option<Shape>,
    pub path:     Option<Path>,
}

fn describe_found(found: &Option<Shape>) -> String {
    match found {
        Some(shape) => shape.to_string(),
        None => "nothing".to_owned(),
    }
}

fn describe_path(path: &Option<Path>) -> String {
    match path {
        Some(path) => path.to_string(),
        None => "none".to_owned(),
    }
}

/// Wraps a failure that is not a decoder rejection while keeping the original
/// error value reachable through [downcast_ref](UnderlyingError::downcast_ref).
#[derive(Debug)]
pub struct UnderlyingError {
    inner: BoxError,
}

impl UnderlyingError {
    pub fn new(error: impl Into<BoxError>) -> Self {
        Self { inner: error.into() }
    }

    pub fn get_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.inner.as_ref()
    }

    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }

    pub fn is<E: StdError + 'static>(&self) -> bool {
        self.inner.is::<E>()
    }

    pub fn into_inner(self) -> BoxError {
        self.inner
    }
}

impl fmt::Display for UnderlyingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl StdError for UnderlyingError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source()
    }
}

/// The single error type emitted by every mapper.
#[derive(Debug, Error)]
pub enum MapperError {
    #[error("Decoding failed: {0}")]
    DecodingFailed(#[from] DecodeError),

    #[error(transparent)]
    Underlying(#[from] UnderlyingError),
}

impl MapperError {
    pub fn underlying(error: impl Into<BoxError>) -> Self {
        MapperError::Underlying(UnderlyingError::new(error))
    }

    pub fn is_decoding(&self) -> bool {
        matches!(self, MapperError::DecodingFailed(_))
    }

    pub fn as_decode_error(&self) -> Option<&DecodeError> {
        match self {
            MapperError::DecodingFailed(error) => Some(error),
            MapperError::Underlying(_) => None,
        }
    }

    pub fn as_underlying(&self) -> Option<&UnderlyingError> {
        match self {
            MapperError::Underlying(error) => Some(error),
            MapperError::DecodingFailed(_) => None,
        }
    }

    /// Recovers the original failure wrapped by [MapperError::Underlying].
    pub fn downcast_underlying_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.as_underlying()?.downcast_ref::<E>()
    }
}

impl From<ShapeError> for MapperError {
    fn from(error: ShapeError) -> Self {
        MapperError::underlying(error)
    }
}
