//! Folding every failure source into [MapperError].

use crate::error::{BoxError, DecodeError, MapperError, ShapeError, UnderlyingError};

/// A failure delivered by the input stream. Always `Underlying`, whatever its
/// type: upstream errors are never reinterpreted as decoder rejections.
pub fn upstream<E: Into<BoxError>>(error: E) -> MapperError {
    MapperError::Underlying(UnderlyingError::new(error))
}

/// A failure returned by a decoder. A [DecodeError] becomes `DecodingFailed`
/// unchanged; any other error type is kept as `Underlying`.
pub fn decoder<E: Into<BoxError>>(error: E) -> MapperError {
    let error: BoxError = error.into();
    match error.downcast::<DecodeError>() {
        Ok(decode) => MapperError::DecodingFailed(*decode),
        Err(other) => MapperError::Underlying(UnderlyingError::new(other)),
    }
}

pub fn shape(error: ShapeError) -> MapperError {
    MapperError::from(error)
}

/// Applies [decoder] to the error side of a decoder result.
pub fn decoded<T, E: Into<BoxError>>(result: Result<T, E>) -> Result<T, MapperError> {
    result.map_err(decoder)
}
