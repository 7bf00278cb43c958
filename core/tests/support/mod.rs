//! Models and fixture loading shared by the integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use futures::stream::{self, Stream};
use serde_json::{Map, Value};
use stream_mapper_core::{fields, DecodeError, FromJson, ToJson};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub name: String,
}

impl FromJson for User {
    fn from_json(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        Ok(User { name: fields::required(object, "name")? })
    }
}

impl ToJson for User {
    fn to_json(&self) -> Map<String, Value> {
        let mut object = Map::new();
        object.insert("name".to_owned(), Value::String(self.name.clone()));
        object
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub name: String,
}

impl FromJson for Task {
    fn from_json(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        Ok(Task { name: fields::required(object, "name")? })
    }
}

impl ToJson for Task {
    fn to_json(&self) -> Map<String, Value> {
        let mut object = Map::new();
        object.insert("name".to_owned(), Value::String(self.name.clone()));
        object
    }
}

/// Stands in for whatever transport error a real source would produce.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{domain} failed with code {code}")]
pub struct UpstreamError {
    pub domain: String,
    pub code:   i32,
}

impl UpstreamError {
    pub fn new(domain: &str, code: i32) -> Self {
        Self { domain: domain.to_owned(), code }
    }
}

pub fn load(name: &str) -> Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.json", name));
    let text = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("reading {}: {}", path.display(), e));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("parsing {}: {}", path.display(), e))
}

/// A one-event stream carrying the object fixture `name`.
pub fn dictionary(name: &str) -> impl Stream<Item = Result<Value, UpstreamError>> {
    let value = load(name);
    assert!(value.is_object(), "fixture {} is not an object", name);
    stream::iter(vec![Ok(value)])
}

/// A one-event stream carrying the array fixture `name`.
pub fn array(name: &str) -> impl Stream<Item = Result<Value, UpstreamError>> {
    let value = load(name);
    assert!(value.is_array(), "fixture {} is not an array", name);
    stream::iter(vec![Ok(value)])
}

pub fn task_names(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.name.as_str()).collect()
}
