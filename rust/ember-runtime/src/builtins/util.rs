//! Introspection and output.

use ember_core::{Args, Arity, Builtin, BuiltinError, Value};
use std::io::Write;

pub const BUILTINS: &[Builtin] = &[
    Builtin::new("TypeOf", Arity::Exact(1), type_of),
    Builtin::new("IsNull", Arity::Exact(1), is_null),
    Builtin::new("IsEmpty", Arity::Exact(1), is_empty),
    Builtin::new("print", Arity::AtLeast(0), print),
];

fn type_of(args: &Args<'_>) -> Result<Value, BuiltinError> {
    Ok(Value::from(args.value(0)?.type_of().name()))
}

fn is_null(args: &Args<'_>) -> Result<Value, BuiltinError> {
    Ok(Value::Bool(args.value(0)?.is_null()))
}

/// `null` counts as empty; strings, lists and mappings by length.
fn is_empty(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let empty = match args.value(0)? {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::List(l) => l.is_empty(),
        Value::Map(m) => m.is_empty(),
        _ => return Err(args.type_error(0, "String, List, Mapping or Null")),
    };
    Ok(Value::Bool(empty))
}

/// Prints the renderings separated by spaces, then a newline.
fn print(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let line = args
        .values()
        .iter()
        .map(Value::inspect)
        .collect::<Vec<_>>()
        .join(" ");
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", line)
        .map_err(|e| BuiltinError::io(args.name(), format!("cannot write stdout: {}", e)))?;
    Ok(Value::Null)
}
