//! Tagged value representation for the Ember runtime.

use crate::builtin::Builtin;
use crate::future::FutureHandle;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Discriminant of a [`Value`], as reported by `TypeOf` and in type errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Integer,
    Float,
    String,
    Bool,
    Null,
    List,
    Mapping,
    Error,
    Builtin,
    Future,
}

impl ValueType {
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Integer => "Integer",
            ValueType::Float => "Float",
            ValueType::String => "String",
            ValueType::Bool => "Bool",
            ValueType::Null => "Null",
            ValueType::List => "List",
            ValueType::Mapping => "Mapping",
            ValueType::Error => "Error",
            ValueType::Builtin => "Builtin",
            ValueType::Future => "Future",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime values in the Ember interpreter.
///
/// Lists and mappings sit behind an [`Arc`]. Operations that "modify" a
/// container clone the handle and go through [`Arc::make_mut`], so the
/// backing storage is only copied while somebody else still holds it and a
/// caller never observes another value's mutation.
#[derive(Debug, Clone, Default)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(Arc<str>),
    Bool(bool),
    #[default]
    Null,
    List(Arc<Vec<Value>>),
    Map(Arc<HashMap<String, Value>>),
    Error(Arc<str>),
    Builtin(Builtin),
    Future(FutureHandle),
}

impl Value {
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Arc::new(items))
    }

    pub fn map(entries: HashMap<String, Value>) -> Self {
        Value::Map(Arc::new(entries))
    }

    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::String(s.into())
    }

    pub fn error(message: impl Into<Arc<str>>) -> Self {
        Value::Error(message.into())
    }

    pub fn type_of(&self) -> ValueType {
        match self {
            Value::Int(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
            Value::String(_) => ValueType::String,
            Value::Bool(_) => ValueType::Bool,
            Value::Null => ValueType::Null,
            Value::List(_) => ValueType::List,
            Value::Map(_) => ValueType::Mapping,
            Value::Error(_) => ValueType::Error,
            Value::Builtin(_) => ValueType::Builtin,
            Value::Future(_) => ValueType::Future,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::List(l) => !l.is_empty(),
            Value::Map(m) => !m.is_empty(),
            Value::Error(_) | Value::Builtin(_) | Value::Future(_) => true,
        }
    }

    /// Language-level equality.
    ///
    /// Scalars compare by payload and `null` equals `null`. Lists, mappings,
    /// errors, builtins and futures are never equal to anything, themselves
    /// included. Values of different types are never equal, so `1` and `1.0`
    /// are distinct until coerced.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(&**s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Map(m) => Some(&**m),
            _ => None,
        }
    }

    /// Message carried by an error value.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Value::Error(msg) => Some(&**msg),
            _ => None,
        }
    }

    /// Canonical rendering. Never fails; used for string coercion, container
    /// rendering and `sort` ordering.
    pub fn inspect(&self) -> String {
        match self {
            Value::Int(n) => n.to_string(),
            Value::Float(f) => format_float(*f),
            Value::String(s) => s.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => "null".to_string(),
            Value::List(l) => {
                let items: Vec<String> = l.iter().map(Value::inspect).collect();
                format!("[{}]", items.join(", "))
            }
            Value::Map(m) => {
                let mut sorted: Vec<(&String, &Value)> = m.iter().collect();
                sorted.sort_by(|a, b| a.0.cmp(b.0));
                let entries: Vec<String> = sorted
                    .into_iter()
                    .map(|(k, v)| format!("{}: {}", k, v.inspect()))
                    .collect();
                format!("{{{}}}", entries.join(", "))
            }
            Value::Error(msg) => format!("ERROR: {}", msg),
            Value::Builtin(b) => format!("<builtin {}>", b.name()),
            Value::Future(f) => {
                if f.is_resolved() {
                    "<future resolved>".to_string()
                } else {
                    "<future pending>".to_string()
                }
            }
        }
    }
}

/// Shortest rendering, except that whole numbers keep one decimal place.
fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        let sign = if f > 0.0 { "" } else { "-" };
        format!("{}inf", sign)
    } else if f == f.trunc() && f.abs() < 1e15 {
        format!("{:.1}", f)
    } else {
        format!("{}", f)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inspect())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(entries: HashMap<String, Value>) -> Self {
        Value::map(entries)
    }
}

impl From<Builtin> for Value {
    fn from(b: Builtin) -> Self {
        Value::Builtin(b)
    }
}

impl From<FutureHandle> for Value {
    fn from(f: FutureHandle) -> Self {
        Value::Future(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{Args, Arity};
    use crate::error::BuiltinError;

    fn noop(_: &Args<'_>) -> Result<Value, BuiltinError> {
        Ok(Value::Null)
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Int(1).type_of(), ValueType::Integer);
        assert_eq!(Value::from("x").type_of().to_string(), "String");
        assert_eq!(Value::map(HashMap::new()).type_of().name(), "Mapping");
        assert_eq!(Value::Null.type_of(), ValueType::Null);
    }

    #[test]
    fn test_inspect_scalars() {
        assert_eq!(Value::Int(-7).inspect(), "-7");
        assert_eq!(Value::Float(5.5).inspect(), "5.5");
        assert_eq!(Value::Float(3.0).inspect(), "3.0");
        assert_eq!(Value::Float(f64::NAN).inspect(), "NaN");
        assert_eq!(Value::Float(f64::NEG_INFINITY).inspect(), "-inf");
        assert_eq!(Value::from("hi").inspect(), "hi");
        assert_eq!(Value::Bool(false).inspect(), "false");
        assert_eq!(Value::Null.inspect(), "null");
    }

    #[test]
    fn test_inspect_containers() {
        let v = Value::list(vec![Value::Int(1), Value::from("a"), Value::Null]);
        assert_eq!(v.inspect(), "[1, a, null]");

        let mut m = HashMap::new();
        m.insert("b".to_string(), Value::Int(2));
        m.insert("a".to_string(), Value::list(vec![]));
        assert_eq!(Value::map(m).inspect(), "{a: [], b: 2}");
    }

    #[test]
    fn test_inspect_error_and_builtin() {
        assert_eq!(Value::error("boom").inspect(), "ERROR: boom");
        let b = Builtin::new("noop", Arity::Exact(0), noop);
        assert_eq!(Value::Builtin(b).inspect(), "<builtin noop>");
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(!Value::Float(0.0).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::list(vec![]).is_truthy());
        assert!(!Value::map(HashMap::new()).is_truthy());

        assert!(Value::Int(-1).is_truthy());
        assert!(Value::from("0").is_truthy());
        assert!(Value::list(vec![Value::Null]).is_truthy());
        assert!(Value::error("x").is_truthy());
        assert!(Value::Builtin(Builtin::new("noop", Arity::Exact(0), noop)).is_truthy());
    }

    #[test]
    fn test_scalar_equality() {
        assert!(Value::Int(3).equals(&Value::Int(3)));
        assert!(!Value::Int(3).equals(&Value::Float(3.0)));
        assert!(Value::from("a").equals(&Value::from("a")));
        assert!(Value::Null.equals(&Value::Null));
        assert!(!Value::Float(f64::NAN).equals(&Value::Float(f64::NAN)));
        assert!(!Value::Bool(true).equals(&Value::Int(1)));
    }

    #[test]
    fn test_reference_kinds_never_equal() {
        let l = Value::list(vec![Value::Int(1)]);
        assert!(!l.equals(&l.clone()));
        let m = Value::map(HashMap::new());
        assert!(!m.equals(&m));
        let e = Value::error("x");
        assert!(!e.equals(&e));
        let b = Value::Builtin(Builtin::new("noop", Arity::Exact(0), noop));
        assert!(!b.equals(&b));
    }

    #[test]
    fn test_clone_shares_list_storage() {
        let original = Value::list(vec![Value::Int(1), Value::Int(2)]);
        let mut copy = original.clone();
        if let Value::List(items) = &mut copy {
            Arc::make_mut(items).push(Value::Int(3));
        }
        assert_eq!(original.inspect(), "[1, 2]");
        assert_eq!(copy.inspect(), "[1, 2, 3]");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int(4).as_float(), Some(4.0));
        assert_eq!(Value::from("s").as_str(), Some("s"));
        assert_eq!(Value::error("bad").error_message(), Some("bad"));
        assert!(Value::Float(1.5).is_numeric());
        assert!(!Value::from("1").is_numeric());
    }
}
