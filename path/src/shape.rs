use serde_json::Value;
use std::fmt;

/// The variant tag of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Object,
    Array,
    String,
    Number,
    Bool,
    Null,
}

impl Shape {
    pub fn of(value: &Value) -> Shape {
        match *value {
            Value::Object(_) => Shape::Object,
            Value::Array(_) => Shape::Array,
            Value::String(_) => Shape::String,
            Value::Number(_) => Shape::Number,
            Value::Bool(_) => Shape::Bool,
            Value::Null => Shape::Null,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::Object => "object",
            Shape::Array => "array",
            Shape::String => "string",
            Shape::Number => "number",
            Shape::Bool => "bool",
            Shape::Null => "null",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_every_variant() {
        assert_eq!(Shape::of(&json!({})), Shape::Object);
        assert_eq!(Shape::of(&json!([1])), Shape::Array);
        assert_eq!(Shape::of(&json!("a")), Shape::String);
        assert_eq!(Shape::of(&json!(1.5)), Shape::Number);
        assert_eq!(Shape::of(&json!(false)), Shape::Bool);
        assert_eq!(Shape::of(&Value::Null), Shape::Null);
        assert_eq!(Shape::Array.to_string(), "array");
    }
}
