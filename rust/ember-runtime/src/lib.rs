//! Ember Runtime
//!
//! The builtin library and the runtime services around it: the process-wide
//! builtin registry, the fault guard used by the interpreter loop, the JSON
//! bridge, and `ember.toml` configuration.
#![warn(clippy::all)]

pub mod builtins;
pub mod config;
pub mod guard;
pub mod json;
pub mod registry;

// Re-export the object model so hosts only need one dependency.
pub use ember_core::{
    coerce, deferred, Args, Arity, BinaryOp, Builtin, BuiltinError, Coerced, FutureHandle,
    Promise, Value, ValueType,
};
