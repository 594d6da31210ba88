//! Conversions between scalar kinds.

use ember_core::{Args, Arity, Builtin, BuiltinError, Value};

pub const BUILTINS: &[Builtin] = &[
    Builtin::new("ToString", Arity::Exact(1), to_string),
    Builtin::new("ToNumber", Arity::Exact(1), to_number),
    Builtin::new("ToInt", Arity::Exact(1), to_int),
    Builtin::new("ToBool", Arity::Exact(1), to_bool),
];

fn to_string(args: &Args<'_>) -> Result<Value, BuiltinError> {
    Ok(Value::from(args.value(0)?.inspect()))
}

/// Integers win over floats when a string parses as both.
fn to_number(args: &Args<'_>) -> Result<Value, BuiltinError> {
    match args.value(0)? {
        v @ (Value::Int(_) | Value::Float(_)) => Ok(v.clone()),
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        Value::String(s) => {
            let text = s.trim();
            if let Ok(n) = text.parse::<i64>() {
                Ok(Value::Int(n))
            } else if let Ok(f) = text.parse::<f64>() {
                Ok(Value::Float(f))
            } else {
                Err(BuiltinError::parse(args.name(), s, "a number"))
            }
        }
        _ => Err(args.type_error(0, "Integer, Float, Bool or String")),
    }
}

fn to_int(args: &Args<'_>) -> Result<Value, BuiltinError> {
    match args.value(0)? {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Float(f) => truncate(args.name(), *f),
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        Value::String(s) => {
            let text = s.trim();
            if let Ok(n) = text.parse::<i64>() {
                Ok(Value::Int(n))
            } else if let Ok(f) = text.parse::<f64>() {
                truncate(args.name(), f)
            } else {
                Err(BuiltinError::parse(args.name(), s, "an integer"))
            }
        }
        _ => Err(args.type_error(0, "Integer, Float, Bool or String")),
    }
}

fn to_bool(args: &Args<'_>) -> Result<Value, BuiltinError> {
    Ok(Value::Bool(args.value(0)?.is_truthy()))
}

/// Truncate toward zero, rejecting values an `i64` cannot hold.
pub(crate) fn truncate(name: &str, f: f64) -> Result<Value, BuiltinError> {
    float_to_int(name, f.trunc())
}

pub(crate) fn float_to_int(name: &str, f: f64) -> Result<Value, BuiltinError> {
    // i64::MAX is not representable as f64; 2^63 is the first value past it.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.is_finite() && (-LIMIT..LIMIT).contains(&f) {
        Ok(Value::Int(f as i64))
    } else {
        Err(BuiltinError::overflow(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, arg: Value) -> Value {
        BUILTINS
            .iter()
            .find(|b| b.name() == name)
            .unwrap()
            .call(&[arg])
    }

    #[test]
    fn to_string_uses_rendering() {
        assert_eq!(call("ToString", Value::Float(2.0)).as_str(), Some("2.0"));
        assert_eq!(call("ToString", Value::Null).as_str(), Some("null"));
        let l = Value::list(vec![Value::Int(1), Value::Bool(true)]);
        assert_eq!(call("ToString", l).as_str(), Some("[1, true]"));
    }

    #[test]
    fn to_number_parses_strings() {
        assert_eq!(call("ToNumber", Value::from("42")), Value::Int(42));
        assert_eq!(call("ToNumber", Value::from(" 4.5 ")), Value::Float(4.5));
        assert_eq!(call("ToNumber", Value::Bool(true)), Value::Int(1));
        assert_eq!(
            call("ToNumber", Value::from("abc")).error_message(),
            Some("ToNumber: cannot parse \"abc\" as a number")
        );
        assert!(call("ToNumber", Value::Null).is_error());
    }

    #[test]
    fn to_int_truncates() {
        assert_eq!(call("ToInt", Value::Float(-3.9)), Value::Int(-3));
        assert_eq!(call("ToInt", Value::from("7.8")), Value::Int(7));
        assert_eq!(call("ToInt", Value::from("12")), Value::Int(12));
        assert!(call("ToInt", Value::Float(f64::NAN)).is_error());
        assert!(call("ToInt", Value::Float(1e300)).is_error());
        assert!(call("ToInt", Value::from("x1")).is_error());
    }

    #[test]
    fn to_bool_follows_truthiness() {
        assert_eq!(call("ToBool", Value::Int(0)), Value::Bool(false));
        assert_eq!(call("ToBool", Value::from("no")), Value::Bool(true));
        assert_eq!(call("ToBool", Value::error("e")), Value::Bool(true));
    }
}
