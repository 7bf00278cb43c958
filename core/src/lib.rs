//! stream-mapper-core
//!
//! This crate implements:
//!  1) `Decoder` / `FromJson` / `ToJson`, the per-type decoding seams,
//!  2) `MapperError`, the unified error, and `normalize` which folds decoder,
//!     shape and upstream failures into it,
//!  3) `ObjectMapper` and `ArrayMapper`, the per-event transforms,
//!  4) `map_one` / `map_many` and `MapperStreamExt` for `futures::Stream`,
//!  5) serde integration (`SerdeDecoder`, `fields`).

pub mod array;
pub mod error;
pub mod fields;
pub mod normalize;
pub mod options;
pub mod serde_support;
pub mod single;
pub mod stream;
pub mod traits;

#[cfg(test)]
mod test_log;

pub use array::ArrayMapper;
pub use error::{BoxError, DecodeError, ExpectedShape, MapperError, ShapeError, UnderlyingError};
pub use options::MapOptions;
pub use serde_support::SerdeDecoder;
pub use single::ObjectMapper;
pub use stream::{map_many, map_one, MapperStreamExt};
pub use traits::{to_json_array, Decoder, FromJson, ToJson};

pub use stream_mapper_path::{extract, Extracted, Path, Shape};
