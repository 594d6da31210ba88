//! String builtins. Indices count Unicode scalar values, not bytes.

use ember_core::{Args, Arity, Builtin, BuiltinError, Value};

pub const BUILTINS: &[Builtin] = &[
    Builtin::new("split", Arity::Exact(2), split),
    Builtin::new("join", Arity::Exact(2), join),
    Builtin::new("substring", Arity::Exact(3), substring),
    Builtin::new("replace", Arity::Exact(3), replace),
    Builtin::new("trim", Arity::Exact(1), trim),
    Builtin::new("to_upper", Arity::Exact(1), to_upper),
    Builtin::new("to_lower", Arity::Exact(1), to_lower),
    Builtin::new("contains", Arity::Exact(2), contains),
    Builtin::new("starts_with", Arity::Exact(2), starts_with),
    Builtin::new("ends_with", Arity::Exact(2), ends_with),
];

/// `split(s, sep)`. An empty separator splits into single characters.
fn split(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let s = args.string(0)?;
    let sep = args.string(1)?;
    let parts: Vec<Value> = if sep.is_empty() {
        s.chars().map(|c| Value::from(c.to_string())).collect()
    } else {
        s.split(sep).map(Value::from).collect()
    };
    Ok(Value::list(parts))
}

/// `join(list, sep)`. Elements are rendered with `inspect`.
fn join(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let list = args.list(0)?;
    let sep = args.string(1)?;
    let joined = list
        .iter()
        .map(Value::inspect)
        .collect::<Vec<_>>()
        .join(sep);
    Ok(Value::from(joined))
}

/// `substring(s, start, end)` over the half-open range `[start, end)`.
fn substring(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let s = args.string(0)?;
    let start = args.int(1)?;
    let end = args.int(2)?;
    let len = s.chars().count();
    if start < 0 || start > end || end as u64 > len as u64 {
        return Err(BuiltinError::Bounds {
            name: args.name().to_string(),
            start,
            end,
            len,
        });
    }
    let taken: String = s
        .chars()
        .skip(start as usize)
        .take((end - start) as usize)
        .collect();
    Ok(Value::from(taken))
}

/// `replace(s, from, to)` replaces every occurrence.
fn replace(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let s = args.string(0)?;
    let from = args.string(1)?;
    let to = args.string(2)?;
    Ok(Value::from(s.replace(from, to)))
}

fn trim(args: &Args<'_>) -> Result<Value, BuiltinError> {
    Ok(Value::from(args.string(0)?.trim()))
}

fn to_upper(args: &Args<'_>) -> Result<Value, BuiltinError> {
    Ok(Value::from(args.string(0)?.to_uppercase()))
}

fn to_lower(args: &Args<'_>) -> Result<Value, BuiltinError> {
    Ok(Value::from(args.string(0)?.to_lowercase()))
}

fn contains(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let s = args.string(0)?;
    let needle = args.string(1)?;
    Ok(Value::Bool(s.contains(needle)))
}

fn starts_with(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let s = args.string(0)?;
    let prefix = args.string(1)?;
    Ok(Value::Bool(s.starts_with(prefix)))
}

fn ends_with(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let s = args.string(0)?;
    let suffix = args.string(1)?;
    Ok(Value::Bool(s.ends_with(suffix)))
}
