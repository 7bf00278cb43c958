//! stream-mapper
//!
//! Turns streams of JSON values into streams of typed domain objects.
//!
//! - `MapperStreamExt` (re-exported from core) for `futures::Stream`s
//! - `FromJson` / `Decoder` / `SerdeDecoder` for the per-type decoding
//! - `MapperError`, the one error type every mapper emits
//! - Sources: `from_values`, `ndjson`, and the one-shot `decode_str` helpers

use std::io::BufRead;

use futures::stream::{self, Stream};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub use stream_mapper_core::{
    fields, map_many, map_one, normalize, to_json_array, ArrayMapper, BoxError, DecodeError, Decoder,
    ExpectedShape, FromJson, MapOptions, MapperError, MapperStreamExt, ObjectMapper, SerdeDecoder,
    ShapeError, ToJson, UnderlyingError,
};
pub use stream_mapper_path::{extract, Extracted, Path, PathParseError, Shape};

/// Failures produced by the NDJSON source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {source}")]
    Parse {
        line:   usize,
        source: serde_json::Error,
    },
}

/// A stream that yields each value once, without failures.
pub fn from_values<I>(values: I) -> impl Stream<Item = Result<Value, SourceError>>
where
    I: IntoIterator<Item = Value>,
{
    stream::iter(values.into_iter().map(Ok))
}

/// Reads newline-delimited JSON lazily, one event per non-blank line.
///
/// Parse failures become error events and the stream goes on with the next
/// line. A read failure is yielded once and ends the stream. Reads block the
/// polling task, so hand this a reader that is already in memory or a local
/// file when running on an async executor.
pub fn ndjson<R: BufRead>(reader: R) -> impl Stream<Item = Result<Value, SourceError>> {
    let events = reader
        .lines()
        .enumerate()
        .scan(false, |broken, (index, line)| {
            if *broken {
                return None;
            }
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    debug!(line = index + 1, error = %e, "ndjson read failed, closing");
                    *broken = true;
                    return Some(Some(Err(SourceError::Io(e))));
                }
            };
            if line.trim().is_empty() {
                return Some(None);
            }
            Some(Some(serde_json::from_str::<Value>(&line).map_err(|source| {
                debug!(line = index + 1, %source, "unparsable ndjson line");
                SourceError::Parse { line: index + 1, source }
            })))
        })
        .flatten();
    stream::iter(events)
}

/// Parses `text` and decodes the object found at `root`.
pub fn decode_str<T: FromJson>(text: &str, root: Option<Path>) -> Result<T, MapperError> {
    let value: Value = serde_json::from_str(text).map_err(normalize::upstream)?;
    let mut mapper = ObjectMapper::new(T::from_json);
    if let Some(root) = root {
        mapper = mapper.with_root(root);
    }
    mapper.decode(&value)
}

/// Parses `text` and decodes the array of objects found at `root`, applying
/// `inner` to each element.
pub fn decode_array_str<T: FromJson>(
    text: &str,
    root: Option<Path>,
    inner: Option<Path>,
) -> Result<Vec<T>, MapperError> {
    let value: Value = serde_json::from_str(text).map_err(normalize::upstream)?;
    let options = MapOptions { root, inner };
    ArrayMapper::from_options(T::from_json, &options).decode(&value)
}
