//! Console and file I/O. These touch external state, so repeated calls with
//! the same arguments may return different values.

use ember_core::{Args, Arity, Builtin, BuiltinError, Value};
use std::io::BufRead;
use tracing::debug;

pub const BUILTINS: &[Builtin] = &[
    Builtin::new("ReadLine", Arity::Exact(0), read_line),
    Builtin::new("ReadFile", Arity::Exact(1), read_file),
    Builtin::new("WriteFile", Arity::Exact(2), write_file),
];

/// One line from stdin without its line terminator; `null` at end of input.
fn read_line(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let mut line = String::new();
    let read = std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| BuiltinError::io(args.name(), format!("cannot read stdin: {}", e)))?;
    if read == 0 {
        return Ok(Value::Null);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']);
    Ok(Value::from(trimmed))
}

fn read_file(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let path = args.string(0)?;
    debug!(path, "reading file");
    std::fs::read_to_string(path)
        .map(Value::from)
        .map_err(|e| BuiltinError::io(args.name(), format!("cannot read '{}': {}", path, e)))
}

/// `WriteFile(path, content)` creates or truncates the file. Returns `null`.
fn write_file(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let path = args.string(0)?;
    let content = args.string(1)?;
    debug!(path, bytes = content.len(), "writing file");
    std::fs::write(path, content)
        .map(|_| Value::Null)
        .map_err(|e| BuiltinError::io(args.name(), format!("cannot write '{}': {}", path, e)))
}
