//! Key paths into JSON values.
//!
//! A [Path] is an ordered list of object keys. [extract] walks a
//! `serde_json::Value` along a path and reports either the value found there or
//! [Extracted::NotFound], which is distinct from a JSON `null`.
//!
//! ```
//! use serde_json::json;
//! use stream_mapper_path::*;
//!
//! let value = json!({"taskList": {"tasks": [{"name": "A"}]}});
//! let path = Path::from(["taskList", "tasks"]);
//!
//! let tasks = extract(&value, Some(&path));
//! assert_eq!(tasks.as_object_array().map(|tasks| tasks.len()), Some(1));
//! assert_eq!(extract(&value, Some(&Path::from(["missing"]))), Extracted::NotFound);
//! assert_eq!(format!("{}", path), r#"["taskList", "tasks"]"#);
//! ```

pub mod extract;
pub mod path;
pub mod shape;

pub use extract::*;
pub use path::*;
pub use shape::*;
