//! Stream adapters: one output event per input event, in order.

use futures::{Stream, StreamExt};
use serde_json::Value;
use stream_mapper_path::Path;

use crate::array::ArrayMapper;
use crate::error::{BoxError, MapperError};
use crate::options::MapOptions;
use crate::single::ObjectMapper;
use crate::traits::{Decoder, FromJson};

/// Decodes one object per event of `stream`.
pub fn map_one<S, E, T, D>(
    stream: S,
    decoder: D,
    root: Option<Path>,
) -> impl Stream<Item = Result<T, MapperError>>
where
    S: Stream<Item = Result<Value, E>>,
    E: Into<BoxError>,
    D: Decoder<T>,
{
    let mut mapper = ObjectMapper::new(decoder);
    if let Some(root) = root {
        mapper = mapper.with_root(root);
    }
    stream.map(move |event| mapper.map_event::<T, E>(event))
}

/// Decodes an array of objects per event of `stream`.
pub fn map_many<S, E, T, D>(
    stream: S,
    decoder: D,
    root: Option<Path>,
    inner: Option<Path>,
) -> impl Stream<Item = Result<Vec<T>, MapperError>>
where
    S: Stream<Item = Result<Value, E>>,
    E: Into<BoxError>,
    D: Decoder<T>,
{
    let mut mapper = ArrayMapper::new(decoder);
    if let Some(root) = root {
        mapper = mapper.with_root(root);
    }
    if let Some(inner) = inner {
        mapper = mapper.with_inner(inner);
    }
    stream.map(move |event| mapper.map_event::<T, E>(event))
}

/// Mapping combinators for any stream of `Result<serde_json::Value, E>`.
///
/// ```
/// use futures::{executor::block_on, stream, StreamExt};
/// use serde_json::{json, Map, Value};
/// use stream_mapper_core::{fields, DecodeError, FromJson, MapperStreamExt};
/// use stream_mapper_path::Path;
///
/// struct User { name: String }
///
/// impl FromJson for User {
///     fn from_json(object: &Map<String, Value>) -> Result<Self, DecodeError> {
///         Ok(User { name: fields::required(object, "name")? })
///     }
/// }
///
/// let events = stream::iter(vec![Ok::<_, DecodeError>(json!({"user": {"name": "Alex"}}))]);
/// let users: Vec<_> = block_on(events.map_to_type::<User>(Some(Path::from(["user"]))).collect());
/// assert_eq!(users[0].as_ref().unwrap().name, "Alex");
/// ```
pub trait MapperStreamExt<E>: Stream<Item = Result<Value, E>> + Sized
where
    E: Into<BoxError>,
{
    fn map_to_type<T: FromJson>(self, root: Option<Path>) -> impl Stream<Item = Result<T, MapperError>> {
        map_one(self, T::from_json, root)
    }

    fn map_to_type_with<T, D: Decoder<T>>(
        self,
        decoder: D,
        root: Option<Path>,
    ) -> impl Stream<Item = Result<T, MapperError>> {
        map_one(self, decoder, root)
    }

    fn map_to_type_array<T: FromJson>(
        self,
        root: Option<Path>,
        inner: Option<Path>,
    ) -> impl Stream<Item = Result<Vec<T>, MapperError>> {
        map_many(self, T::from_json, root, inner)
    }

    fn map_to_type_array_with<T, D: Decoder<T>>(
        self,
        decoder: D,
        root: Option<Path>,
        inner: Option<Path>,
    ) -> impl Stream<Item = Result<Vec<T>, MapperError>> {
        map_many(self, decoder, root, inner)
    }

    /// [map_to_type](MapperStreamExt::map_to_type) configured from
    /// [MapOptions]; `options.inner` is ignored.
    fn map_with_options<T: FromJson>(self, options: MapOptions) -> impl Stream<Item = Result<T, MapperError>> {
        map_one(self, T::from_json, options.root)
    }

    fn map_array_with_options<T: FromJson>(
        self,
        options: MapOptions,
    ) -> impl Stream<Item = Result<Vec<T>, MapperError>> {
        map_many(self, T::from_json, options.root, options.inner)
    }
}

impl<S, E> MapperStreamExt<E> for S
where
    S: Stream<Item = Result<Value, E>>,
    E: Into<BoxError>,
{
}
