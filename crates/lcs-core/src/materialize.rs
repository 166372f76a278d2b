//! Response materialization.
//!
//! Turns the flat `path -> raw answer` mapping collected by a session back
//! into a nested configuration object shaped like the schema:
//!
//! 1. every leaf default declared in the schema is seeded at its path,
//! 2. each answer is coerced according to its leaf kind and written over
//!    the seeded value,
//! 3. every object level is reordered to follow schema declaration order.
//!
//! Fields with neither a default nor an answer are omitted. Paths that do
//! not resolve to a schema leaf are written through unchanged and placed
//! after the declared keys of their level.

use crate::answers::{is_truthy, Answers};
use crate::schema::{SchemaKind, SchemaNode};
use serde_json::{Map, Number, Value};
use tracing::{debug, warn};

/// Largest integral float that is written as a JSON integer
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Nested configuration produced by [`materialize`]
pub type ConfigObject = Map<String, Value>;

/// Build the configuration object for `answers` against `schema`
pub fn materialize(answers: &Answers, schema: &SchemaNode) -> ConfigObject {
    let seeded = seed_defaults(schema);

    let config = answers
        .iter()
        .filter(|(_, raw)| !raw.is_null())
        .fold(seeded, |mut config, (path, raw)| {
            let leaf = schema.resolve(path);
            if leaf.is_none() {
                debug!("No schema leaf for '{}', passing answer through", path);
            }
            match coerce(raw, leaf) {
                Some(value) => set_path(&mut config, path, value),
                None => warn!("Discarding answer for '{}': {} is not a valid number", path, raw),
            }
            config
        });

    order_like_schema(config, schema)
}

/// Reorder `config` so declared properties come first, in schema order.
///
/// Undeclared keys keep their relative order after the declared ones.
fn order_like_schema(config: ConfigObject, schema: &SchemaNode) -> ConfigObject {
    let position = |key: &str| {
        schema
            .properties
            .iter()
            .position(|(name, _)| name == key)
            .unwrap_or(usize::MAX)
    };

    let mut entries: Vec<(String, Value)> = config.into_iter().collect();
    entries.sort_by_key(|(key, _)| position(key));

    entries
        .into_iter()
        .map(|(key, value)| {
            let value = match (value, schema.property(&key)) {
                (Value::Object(nested), Some(child)) if !child.is_leaf() => {
                    Value::Object(order_like_schema(nested, child))
                }
                (value, _) => value,
            };
            (key, value)
        })
        .collect()
}

/// Collect every declared leaf default into a nested object.
///
/// Containers are only created when at least one descendant has a default.
pub fn seed_defaults(schema: &SchemaNode) -> ConfigObject {
    schema
        .properties
        .iter()
        .fold(Map::new(), |mut config, (key, child)| {
            if !child.is_leaf() {
                let nested = seed_defaults(child);
                if !nested.is_empty() {
                    config.insert(key.clone(), Value::Object(nested));
                }
            } else if let Some(default) = &child.default {
                config.insert(key.clone(), default.clone());
            }
            config
        })
}

/// Coerce a raw answer for the given schema leaf.
///
/// An unresolved leaf is treated as `unknown` and passed through. Returns
/// `None` only for numeric leaves whose answer cannot be read as a number.
pub fn coerce(raw: &Value, leaf: Option<&SchemaNode>) -> Option<Value> {
    let kind = match leaf {
        Some(node) if node.is_leaf() => node.kind,
        _ => SchemaKind::Unknown,
    };

    match kind {
        SchemaKind::Array => Some(match raw {
            Value::String(text) => Value::Array(split_list(text)),
            other => other.clone(),
        }),
        SchemaKind::Number | SchemaKind::Integer => {
            to_number(raw, kind == SchemaKind::Integer).map(Value::Number)
        }
        SchemaKind::Boolean => Some(Value::Bool(is_truthy(raw))),
        SchemaKind::String | SchemaKind::Object | SchemaKind::Unknown => Some(raw.clone()),
    }
}

/// Write `value` at a dotted path, creating or merging intermediate objects.
///
/// Existing siblings along the path are kept. An intermediate that holds a
/// non-object value is replaced by an empty object.
pub fn set_path(config: &mut ConfigObject, path: &str, value: Value) {
    let mut segments: Vec<&str> = path.split('.').collect();
    let Some(last) = segments.pop() else {
        return;
    };

    let mut current = config;
    for segment in segments {
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else {
            return;
        };
        current = next;
    }

    current.insert(last.to_string(), value);
}

fn split_list(text: &str) -> Vec<Value> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| Value::String(item.to_string()))
        .collect()
}

fn to_number(raw: &Value, integer: bool) -> Option<Number> {
    let value = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => return None,
    };

    if let Value::Number(n) = raw {
        if !integer || n.is_i64() || n.is_u64() {
            return Some(n.clone());
        }
    }

    if value.fract() == 0.0 && value.abs() < MAX_SAFE_INTEGER {
        return Some(Number::from(value as i64));
    }
    Number::from_f64(value)
}
