use serde::Deserialize;
use serde_json::{Map, Value};
use stream_mapper::{fields, DecodeError, FromJson, ToJson};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub name:  String,
    pub email: Option<String>,
}

impl FromJson for User {
    fn from_json(object: &Map<String, Value>) -> Result<Self, DecodeError> {
        Ok(User {
            name:  fields::required(object, "name")?,
            email: fields::optional(object, "email")?,
        })
    }
}

impl ToJson for User {
    fn to_json(&self) -> Map<String, Value> {
        let mut object = Map::new();
        object.insert("name".to_owned(), Value::from(self.name.as_str()));
        object.insert(
            "email".to_owned(),
            self.email.as_deref().map_or(Value::Null, Value::from),
        );
        object
    }
}

/// Decoded through serde rather than a hand-written `FromJson`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Task {
    pub name: String,
    #[serde(default)]
    pub done: bool,
}
