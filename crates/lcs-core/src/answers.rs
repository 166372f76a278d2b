//! Flat answer mapping produced by a prompt session.
//!
//! Keys are dotted paths, values are the raw answers exactly as the prompt
//! backend produced them. `Value::Null` marks an unanswered field.

use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Ordered mapping from dotted path to raw answer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answers {
    values: Map<String, Value>,
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a flat JSON object of `path -> raw answer`
    pub fn from_json_str(json: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(values) => Ok(Self { values }),
            other => Err(Error::invalid_answers(format!(
                "answers must be a JSON object, got {}",
                other
            ))),
        }
    }

    /// Record an answer, replacing any earlier answer for the same path
    pub fn insert(&mut self, path: impl Into<String>, value: Value) {
        self.values.insert(path.into(), value);
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.values.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.values.contains_key(path)
    }

    /// Answer as text, if it is a string
    pub fn text(&self, path: &str) -> Option<&str> {
        self.values.get(path).and_then(Value::as_str)
    }

    /// Answer as a boolean, if it is one
    pub fn flag(&self, path: &str) -> Option<bool> {
        self.values.get(path).and_then(Value::as_bool)
    }

    /// Whether the answer at `path` exists and is truthy
    pub fn is_truthy(&self, path: &str) -> bool {
        self.values.get(path).is_some_and(is_truthy)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate answers in the order they were recorded
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}

impl From<Map<String, Value>> for Answers {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Answers {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Loose truthiness: `false`, `null`, `0`, `NaN` and `""` are falsy,
/// everything else (including empty arrays and objects) is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
