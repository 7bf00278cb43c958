use serde::{Deserialize, Serialize};
use stream_mapper_path::Path;

/// Where to find the objects to decode.
///
/// `root` is applied to each incoming value; `inner` is applied to every
/// element of the array found at `root` and is ignored by single-object
/// mapping. Either may be omitted, in which case the value is used as is.
///
/// ```
/// use stream_mapper_core::MapOptions;
///
/// let options: MapOptions =
///     serde_json::from_str(r#"{"root": ["taskList", "tasks"], "inner": ["task"]}"#).unwrap();
/// assert_eq!(options, MapOptions::new().with_root(["taskList", "tasks"]).with_inner(["task"]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root:  Option<Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner: Option<Path>,
}

impl MapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: impl Into<Path>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_inner(mut self, inner: impl Into<Path>) -> Self {
        self.inner = Some(inner.into());
        self
    }

    /// Fills in whatever `self` leaves unset from `fallback`.
    pub fn or(self, fallback: MapOptions) -> MapOptions {
        MapOptions {
            root:  self.root.or(fallback.root),
            inner: self.inner.or(fallback.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_identity() {
        let options: MapOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, MapOptions::default());
        assert_eq!(serde_json::to_string(&options).unwrap(), "{}");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_json::from_str::<MapOptions>(r#"{"rootKeys": []}"#).is_err());
    }

    #[test]
    fn explicit_values_win_over_fallback() {
        let file = MapOptions::new().with_root(["a"]).with_inner(["b"]);
        let flags = MapOptions::new().with_root(["c"]);
        assert_eq!(flags.or(file), MapOptions::new().with_root(["c"]).with_inner(["b"]));
    }
}
