//! List builtins.
//!
//! None of these touch the list they are given. Each one clones the `Arc`
//! and edits through `Arc::make_mut`, which copies the backing vector because
//! the caller still holds a reference to it.

use ember_core::{Args, Arity, Builtin, BuiltinError, Value};
use std::sync::Arc;

pub const BUILTINS: &[Builtin] = &[
    Builtin::new("len", Arity::Exact(1), len),
    Builtin::new("append", Arity::Exact(2), append),
    Builtin::new("push", Arity::Exact(2), append),
    Builtin::new("prepend", Arity::Exact(2), prepend),
    Builtin::new("unshift", Arity::Exact(2), prepend),
    Builtin::new("pop", Arity::Exact(1), pop),
    Builtin::new("shift", Arity::Exact(1), shift),
    Builtin::new("slice", Arity::Exact(3), slice),
    Builtin::new("ListSlice", Arity::Exact(3), list_slice),
    Builtin::new("sort", Arity::Exact(1), sort),
    Builtin::new("reverse", Arity::Exact(1), reverse),
    Builtin::new("concat", Arity::Exact(2), concat),
    Builtin::new("indexOf", Arity::Exact(2), index_of),
    Builtin::new("includes", Arity::Exact(2), includes),
    Builtin::new("get", Arity::Exact(2), get),
    Builtin::new("first", Arity::Exact(1), first),
    Builtin::new("last", Arity::Exact(1), last),
];

fn edited(list: &Arc<Vec<Value>>, edit: impl FnOnce(&mut Vec<Value>)) -> Value {
    let mut copy = Arc::clone(list);
    edit(Arc::make_mut(&mut copy));
    Value::List(copy)
}

/// `len(x)` for strings (in characters), lists and mappings.
fn len(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let n = match args.value(0)? {
        Value::String(s) => s.chars().count(),
        Value::List(l) => l.len(),
        Value::Map(m) => m.len(),
        _ => return Err(args.type_error(0, "String, List or Mapping")),
    };
    Ok(Value::Int(n as i64))
}

fn append(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let list = args.list(0)?;
    let item = args.value(1)?.clone();
    Ok(edited(list, |items| items.push(item)))
}

fn prepend(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let list = args.list(0)?;
    let item = args.value(1)?.clone();
    Ok(edited(list, |items| items.insert(0, item)))
}

/// `pop(list)`: the list without its last element.
fn pop(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let list = args.list(0)?;
    if list.is_empty() {
        return Err(BuiltinError::EmptyList {
            name: args.name().to_string(),
        });
    }
    Ok(Value::list(list[..list.len() - 1].to_vec()))
}

/// `shift(list)`: the list without its first element.
fn shift(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let list = args.list(0)?;
    if list.is_empty() {
        return Err(BuiltinError::EmptyList {
            name: args.name().to_string(),
        });
    }
    Ok(Value::list(list[1..].to_vec()))
}

/// `slice(list, start, end)`. Requires `0 <= start <= end <= len`.
fn slice(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let list = args.list(0)?;
    let start = args.int(1)?;
    let end = args.int(2)?;
    let len = list.len();
    if start < 0 || start > end || end as u64 > len as u64 {
        return Err(BuiltinError::Bounds {
            name: args.name().to_string(),
            start,
            end,
            len,
        });
    }
    Ok(Value::list(list[start as usize..end as usize].to_vec()))
}

/// `ListSlice(list, start, end)`. Bounds are clamped into `[0, len]`; an
/// inverted range gives an empty list.
fn list_slice(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let list = args.list(0)?;
    let start = args.int(1)?;
    let end = args.int(2)?;
    let len = list.len() as i64;
    let start = start.clamp(0, len) as usize;
    let end = end.clamp(0, len) as usize;
    if start >= end {
        return Ok(Value::list(Vec::new()));
    }
    Ok(Value::list(list[start..end].to_vec()))
}

/// Stable sort by the lexical order of each element's rendering.
fn sort(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let list = args.list(0)?;
    let mut keyed: Vec<(String, Value)> = list.iter().map(|v| (v.inspect(), v.clone())).collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(Value::list(keyed.into_iter().map(|(_, v)| v).collect()))
}

fn reverse(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let list = args.list(0)?;
    Ok(edited(list, |items| items.reverse()))
}

fn concat(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let head = args.list(0)?;
    let tail = args.list(1)?;
    Ok(edited(head, |items| items.extend(tail.iter().cloned())))
}

fn index_of(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let list = args.list(0)?;
    let needle = args.value(1)?;
    let index = list
        .iter()
        .position(|v| v.equals(needle))
        .map(|i| i as i64)
        .unwrap_or(-1);
    Ok(Value::Int(index))
}

fn includes(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let list = args.list(0)?;
    let needle = args.value(1)?;
    Ok(Value::Bool(list.iter().any(|v| v.equals(needle))))
}

/// `get(list, index)` with strict bounds.
fn get(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let list = args.list(0)?;
    let index = args.int(1)?;
    usize::try_from(index)
        .ok()
        .and_then(|i| list.get(i))
        .cloned()
        .ok_or_else(|| BuiltinError::Index {
            name: args.name().to_string(),
            index,
            len: list.len(),
        })
}

fn first(args: &Args<'_>) -> Result<Value, BuiltinError> {
    Ok(args.list(0)?.first().cloned().unwrap_or(Value::Null))
}

fn last(args: &Args<'_>) -> Result<Value, BuiltinError> {
    Ok(args.list(0)?.last().cloned().unwrap_or(Value::Null))
}
