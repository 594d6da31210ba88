//! Mapping builtins. Keys are always strings; results that list keys, values
//! or entries come back in no particular order.

use ember_core::{Args, Arity, Builtin, BuiltinError, Value};
use std::collections::HashMap;
use std::sync::Arc;

pub const BUILTINS: &[Builtin] = &[
    Builtin::new("map_get", Arity::Exact(2), map_get),
    Builtin::new("MapGet", Arity::Exact(2), map_get),
    Builtin::new("map_set", Arity::Exact(3), map_set),
    Builtin::new("MapSet", Arity::Exact(3), map_set),
    Builtin::new("map_has", Arity::Exact(2), map_has),
    Builtin::new("MapHas", Arity::Exact(2), map_has),
    Builtin::new("map_keys", Arity::Exact(1), map_keys),
    Builtin::new("MapKeys", Arity::Exact(1), map_keys),
    Builtin::new("map_values", Arity::Exact(1), map_values),
    Builtin::new("MapValues", Arity::Exact(1), map_values),
    Builtin::new("map_delete", Arity::Exact(2), map_delete),
    Builtin::new("MapDelete", Arity::Exact(2), map_delete),
    Builtin::new("map_clear", Arity::Exact(1), map_clear),
    Builtin::new("map_entries", Arity::Exact(1), map_entries),
    Builtin::new("map_size", Arity::Exact(1), map_size),
];

/// Missing keys read as `null`.
fn map_get(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let map = args.map(0)?;
    let key = args.string(1)?;
    Ok(map.get(key).cloned().unwrap_or(Value::Null))
}

fn map_set(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let map = args.map(0)?;
    let key = args.string(1)?;
    let value = args.value(2)?.clone();
    let mut copy = Arc::clone(map);
    Arc::make_mut(&mut copy).insert(key.to_string(), value);
    Ok(Value::Map(copy))
}

fn map_has(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let map = args.map(0)?;
    let key = args.string(1)?;
    Ok(Value::Bool(map.contains_key(key)))
}

fn map_keys(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let map = args.map(0)?;
    Ok(Value::list(map.keys().map(|k| Value::from(k.as_str())).collect()))
}

fn map_values(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let map = args.map(0)?;
    Ok(Value::list(map.values().cloned().collect()))
}

/// Deleting an absent key returns an equivalent mapping.
fn map_delete(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let map = args.map(0)?;
    let key = args.string(1)?;
    if !map.contains_key(key) {
        return Ok(Value::Map(Arc::clone(map)));
    }
    let mut copy = Arc::clone(map);
    Arc::make_mut(&mut copy).remove(key);
    Ok(Value::Map(copy))
}

fn map_clear(args: &Args<'_>) -> Result<Value, BuiltinError> {
    args.map(0)?;
    Ok(Value::map(HashMap::new()))
}

/// Entries as two-element `[key, value]` lists.
fn map_entries(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let map = args.map(0)?;
    let entries = map
        .iter()
        .map(|(k, v)| Value::list(vec![Value::from(k.as_str()), v.clone()]))
        .collect();
    Ok(Value::list(entries))
}

fn map_size(args: &Args<'_>) -> Result<Value, BuiltinError> {
    Ok(Value::Int(args.map(0)?.len() as i64))
}
