//! Conversion between `Value` and `serde_json::Value`.

use ember_core::Value;
use serde_json::{Map, Number};
use std::collections::HashMap;

/// Convert a JSON document to a Value.
///
/// Integers that fit in `i64` stay integral; larger numbers become Float.
pub fn value_from_json(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
        },
        serde_json::Value::String(s) => Value::from(s.as_str()),
        serde_json::Value::Array(items) => Value::list(items.iter().map(value_from_json).collect()),
        serde_json::Value::Object(obj) => {
            let map: HashMap<String, Value> = obj
                .iter()
                .map(|(k, v)| (k.clone(), value_from_json(v)))
                .collect();
            Value::map(map)
        }
    }
}

/// Convert a Value to JSON.
///
/// Non-finite floats become `null`. Errors become `{"error": message}`;
/// builtins and futures are rendered as their `inspect()` string.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(n) => serde_json::Value::Number(Number::from(*n)),
        Value::Float(f) => Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.to_string()),
        Value::List(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
        Value::Map(m) => {
            let obj: Map<String, serde_json::Value> = m
                .iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect();
            serde_json::Value::Object(obj)
        }
        Value::Error(msg) => {
            let mut obj = Map::new();
            obj.insert("error".to_string(), serde_json::Value::String(msg.to_string()));
            serde_json::Value::Object(obj)
        }
        Value::Builtin(_) | Value::Future(_) => serde_json::Value::String(value.inspect()),
    }
}
