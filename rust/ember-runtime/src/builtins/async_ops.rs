//! `Spawn` and `Await`.
//!
//! The value layer has no executor of its own, so `Spawn` always reports
//! that nothing can run the work. `Await` blocks on a future produced by the
//! host.

use ember_core::{Args, Arity, Builtin, BuiltinError, Value};

pub const BUILTINS: &[Builtin] = &[
    Builtin::new("Spawn", Arity::Exact(1), spawn),
    Builtin::new("Await", Arity::Exact(1), await_future),
];

fn spawn(args: &Args<'_>) -> Result<Value, BuiltinError> {
    match args.value(0)? {
        Value::Builtin(_) => Err(BuiltinError::Unsupported {
            name: args.name().to_string(),
            message: "no execution context is available to run spawned work".to_string(),
        }),
        _ => Err(args.type_error(0, "Builtin")),
    }
}

/// Blocks until the future resolves. No timeout.
fn await_future(args: &Args<'_>) -> Result<Value, BuiltinError> {
    Ok(args.future(0)?.await_value())
}
