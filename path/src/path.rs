use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An ordered list of object keys identifying a location inside a JSON tree.
///
/// An empty path points at the value itself. Paths serialize as a JSON array of
/// strings and display the same way, e.g. `["taskList", "tasks"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathParseError {
    #[error("Empty key at position {position} in path \"{text}\"")]
    EmptyKey { text: String, position: usize },
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn push(&mut self, key: impl Into<String>) {
        self.keys.push(key.into());
    }

    /// Returns a new path with `key` appended.
    pub fn join(&self, key: impl Into<String>) -> Path {
        let mut path = self.clone();
        path.push(key);
        path
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.keys.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("[")?;
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let quoted = serde_json::to_string(key).map_err(|_| fmt::Error)?;
            f.write_str(&quoted)?;
        }
        f.write_str("]")
    }
}

/// Parses dotted notation: `taskList.tasks` is `["taskList", "tasks"]` and the
/// empty string is the empty path.
impl FromStr for Path {
    type Err = PathParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty() {
            return Ok(Path::new());
        }

        let mut keys = Vec::new();
        for (position, key) in text.split('.').enumerate() {
            if key.is_empty() {
                return Err(PathParseError::EmptyKey {
                    text: text.to_owned(),
                    position,
                });
            }
            keys.push(key.to_owned());
        }
        Ok(Path { keys })
    }
}

impl From<Vec<String>> for Path {
    fn from(keys: Vec<String>) -> Self {
        Path { keys }
    }
}

impl From<&[&str]> for Path {
    fn from(keys: &[&str]) -> Self {
        Path::from_keys(keys.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Path {
    fn from(keys: [&str; N]) -> Self {
        Path::from_keys(keys)
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dotted_paths() {
        let path: Path = "taskList.tasks".parse().unwrap();
        assert_eq!(path, Path::from(["taskList", "tasks"]));

        let empty: Path = "".parse().unwrap();
        assert!(empty.is_empty());

        let err = "a..b".parse::<Path>().unwrap_err();
        assert_eq!(
            err,
            PathParseError::EmptyKey {
                text: "a..b".to_owned(),
                position: 1
            }
        );
    }

    #[test]
    fn displays_as_quoted_key_list() {
        assert_eq!(Path::new().to_string(), "[]");
        assert_eq!(Path::from(["user"]).to_string(), r#"["user"]"#);
        assert_eq!(
            Path::from(["a\"b", "c"]).to_string(),
            r#"["a\"b", "c"]"#
        );
    }

    #[test]
    fn serializes_as_string_array() {
        let path = Path::from(["task", "t"]);
        let text = serde_json::to_string(&path).unwrap();
        assert_eq!(text, r#"["task","t"]"#);

        let back: Path = serde_json::from_str(&text).unwrap();
        assert_eq!(back, path);
    }

    #[test]
    fn join_leaves_original_untouched() {
        let root = Path::from(["taskList"]);
        let tasks = root.join("tasks");
        assert_eq!(root.len(), 1);
        assert_eq!(tasks.keys(), ["taskList", "tasks"]);
    }
}
