//! Errors reported by builtins.
//!
//! A builtin never fails through a side channel: every `BuiltinError` is
//! rendered into a [`Value::Error`] before it leaves the call. The message
//! always starts with the builtin's name, followed by what was expected and
//! what was received.

use crate::builtin::Arity;
use crate::values::{Value, ValueType};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuiltinError {
    #[error("{name}: expects {expected}, got {got}")]
    Arity {
        name: String,
        expected: Arity,
        got: usize,
    },
    #[error("{name}: argument {position} must be {expected}, got {actual}")]
    Type {
        name: String,
        position: usize,
        expected: &'static str,
        actual: ValueType,
    },
    #[error("{name}: range [{start}, {end}) out of bounds for length {len}")]
    Bounds {
        name: String,
        start: i64,
        end: i64,
        len: usize,
    },
    #[error("{name}: index {index} out of bounds for length {len}")]
    Index { name: String, index: i64, len: usize },
    #[error("{name}: division by zero")]
    DivisionByZero { name: String },
    #[error("{name}: modulo by zero")]
    ModuloByZero { name: String },
    #[error("{name}: cannot parse {input:?} as {target}")]
    Parse {
        name: String,
        input: String,
        target: &'static str,
    },
    #[error("{name}: integer overflow")]
    Overflow { name: String },
    #[error("{name}: {message}")]
    Domain { name: String, message: String },
    #[error("{name}: list is empty")]
    EmptyList { name: String },
    #[error("{name}: {message}")]
    Io { name: String, message: String },
    #[error("{name}: {message}")]
    Unsupported { name: String, message: String },
}

impl BuiltinError {
    pub fn division_by_zero(name: &str) -> Self {
        BuiltinError::DivisionByZero {
            name: name.to_string(),
        }
    }

    pub fn modulo_by_zero(name: &str) -> Self {
        BuiltinError::ModuloByZero {
            name: name.to_string(),
        }
    }

    pub fn overflow(name: &str) -> Self {
        BuiltinError::Overflow {
            name: name.to_string(),
        }
    }

    pub fn domain(name: &str, message: impl Into<String>) -> Self {
        BuiltinError::Domain {
            name: name.to_string(),
            message: message.into(),
        }
    }

    pub fn parse(name: &str, input: &str, target: &'static str) -> Self {
        BuiltinError::Parse {
            name: name.to_string(),
            input: input.to_string(),
            target,
        }
    }

    pub fn io(name: &str, message: impl Into<String>) -> Self {
        BuiltinError::Io {
            name: name.to_string(),
            message: message.into(),
        }
    }

    /// The builtin that produced this error.
    pub fn builtin_name(&self) -> &str {
        match self {
            BuiltinError::Arity { name, .. }
            | BuiltinError::Type { name, .. }
            | BuiltinError::Bounds { name, .. }
            | BuiltinError::Index { name, .. }
            | BuiltinError::DivisionByZero { name }
            | BuiltinError::ModuloByZero { name }
            | BuiltinError::Parse { name, .. }
            | BuiltinError::Overflow { name }
            | BuiltinError::Domain { name, .. }
            | BuiltinError::EmptyList { name }
            | BuiltinError::Io { name, .. }
            | BuiltinError::Unsupported { name, .. } => name,
        }
    }

    pub fn into_value(self) -> Value {
        Value::error(self.to_string())
    }
}

impl From<BuiltinError> for Value {
    fn from(err: BuiltinError) -> Self {
        err.into_value()
    }
}
