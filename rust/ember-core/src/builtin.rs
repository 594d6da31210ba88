//! The calling convention shared by every builtin.
//!
//! A call goes through three stages in a fixed order:
//!
//! 1. [`Builtin::call`] checks the argument count against the declared
//!    [`Arity`] before the native function is entered.
//! 2. The native function pulls its arguments out positionally through the
//!    typed accessors on [`Args`], each of which reports a type error naming
//!    the position, the expected type and the actual type.
//! 3. Only then does the operation run.
//!
//! Because stage 1 happens outside the native function, a call with both the
//! wrong number of arguments and wrongly-typed arguments always reports the
//! arity error.

use crate::error::BuiltinError;
use crate::future::FutureHandle;
use crate::values::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Signature of a native builtin implementation.
pub type NativeFn = fn(&Args<'_>) -> Result<Value, BuiltinError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (prefix, n) = match self {
            Arity::Exact(n) => ("", *n),
            Arity::AtLeast(n) => ("at least ", *n),
        };
        let noun = if n == 1 { "argument" } else { "arguments" };
        write!(f, "{}{} {}", prefix, n, noun)
    }
}

/// A named primitive operation. Cheap to copy; the registry hands out
/// `&'static` references and `Value::Builtin` carries a copy.
#[derive(Clone, Copy)]
pub struct Builtin {
    name: &'static str,
    arity: Arity,
    func: NativeFn,
}

impl Builtin {
    pub const fn new(name: &'static str, arity: Arity, func: NativeFn) -> Self {
        Self { name, arity, func }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Invoke the builtin. Failures come back as `Value::Error`.
    pub fn call(&self, args: &[Value]) -> Value {
        self.try_call(args).unwrap_or_else(BuiltinError::into_value)
    }

    /// Invoke the builtin, keeping the structured error.
    pub fn try_call(&self, args: &[Value]) -> Result<Value, BuiltinError> {
        if !self.arity.accepts(args.len()) {
            return Err(BuiltinError::Arity {
                name: self.name.to_string(),
                expected: self.arity,
                got: args.len(),
            });
        }
        (self.func)(&Args::new(self.name, args))
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Positional view over a builtin's arguments.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    name: &'a str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    pub fn new(name: &'a str, values: &'a [Value]) -> Self {
        Self { name, values }
    }

    /// Name of the builtin being called, for error messages.
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &'a [Value] {
        self.values
    }

    /// Argument at `index`. A missing argument is reported as an arity error
    /// rather than a panic.
    pub fn value(&self, index: usize) -> Result<&'a Value, BuiltinError> {
        self.values.get(index).ok_or_else(|| BuiltinError::Arity {
            name: self.name.to_string(),
            expected: Arity::AtLeast(index + 1),
            got: self.values.len(),
        })
    }

    /// Type error for the argument at `index` (reported 1-based).
    pub fn type_error(&self, index: usize, expected: &'static str) -> BuiltinError {
        let actual = self
            .values
            .get(index)
            .map(Value::type_of)
            .unwrap_or(crate::values::ValueType::Null);
        BuiltinError::Type {
            name: self.name.to_string(),
            position: index + 1,
            expected,
            actual,
        }
    }

    pub fn int(&self, index: usize) -> Result<i64, BuiltinError> {
        match self.value(index)? {
            Value::Int(n) => Ok(*n),
            _ => Err(self.type_error(index, "Integer")),
        }
    }

    /// An `Int` or `Float` argument, returned as-is.
    pub fn number(&self, index: usize) -> Result<&'a Value, BuiltinError> {
        let v = self.value(index)?;
        if v.is_numeric() {
            Ok(v)
        } else {
            Err(self.type_error(index, "Integer or Float"))
        }
    }

    pub fn string(&self, index: usize) -> Result<&'a str, BuiltinError> {
        match self.value(index)? {
            Value::String(s) => Ok(&**s),
            _ => Err(self.type_error(index, "String")),
        }
    }

    pub fn boolean(&self, index: usize) -> Result<bool, BuiltinError> {
        match self.value(index)? {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.type_error(index, "Bool")),
        }
    }

    pub fn list(&self, index: usize) -> Result<&'a Arc<Vec<Value>>, BuiltinError> {
        match self.value(index)? {
            Value::List(l) => Ok(l),
            _ => Err(self.type_error(index, "List")),
        }
    }

    pub fn map(&self, index: usize) -> Result<&'a Arc<HashMap<String, Value>>, BuiltinError> {
        match self.value(index)? {
            Value::Map(m) => Ok(m),
            _ => Err(self.type_error(index, "Mapping")),
        }
    }

    pub fn future(&self, index: usize) -> Result<&'a FutureHandle, BuiltinError> {
        match self.value(index)? {
            Value::Future(f) => Ok(f),
            _ => Err(self.type_error(index, "Future")),
        }
    }
}
