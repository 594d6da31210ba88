//! Process-wide builtin registry.
//!
//! Built on first use and read-only afterwards. Resolving an unknown name is
//! the interpreter's concern, so lookups return `Option`.

use crate::builtins;
use ember_core::{Builtin, Value};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::debug;

static REGISTRY: Lazy<HashMap<&'static str, Builtin>> = Lazy::new(|| {
    let table: HashMap<&'static str, Builtin> =
        builtins::all().map(|b| (b.name(), *b)).collect();
    debug!(count = table.len(), "builtin registry initialised");
    table
});

pub fn lookup(name: &str) -> Option<&'static Builtin> {
    REGISTRY.get(name)
}

/// The builtin as a first-class value.
pub fn value(name: &str) -> Option<Value> {
    lookup(name).map(|b| Value::Builtin(*b))
}

/// Look up and call in one step. `None` when the name is unknown.
pub fn call(name: &str, args: &[Value]) -> Option<Value> {
    lookup(name).map(|b| b.call(args))
}

/// All registered names, sorted.
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = REGISTRY.keys().copied().collect();
    names.sort_unstable();
    names
}
