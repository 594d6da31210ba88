//! Arithmetic builtins.
//!
//! Binary operators run their operands through [`coerce`] first. After that
//! an `Int`/`Int` pair stays integral (with checked arithmetic), any pair
//! involving a `Float` is computed in floating point, and `Add` concatenates
//! two strings.

use super::convert::float_to_int;
use ember_core::{coerce, Args, Arity, BinaryOp, Builtin, BuiltinError, Value};
use tracing::trace;

pub const BUILTINS: &[Builtin] = &[
    Builtin::new("Add", Arity::Exact(2), add),
    Builtin::new("Subtract", Arity::Exact(2), subtract),
    Builtin::new("Multiply", Arity::Exact(2), multiply),
    Builtin::new("Divide", Arity::Exact(2), divide),
    Builtin::new("Power", Arity::Exact(2), power),
    Builtin::new("mod", Arity::Exact(2), modulo),
    Builtin::new("Sqrt", Arity::Exact(1), sqrt),
    Builtin::new("Abs", Arity::Exact(1), abs),
    Builtin::new("Round", Arity::Exact(1), round),
    Builtin::new("floor", Arity::Exact(1), floor),
    Builtin::new("ceil", Arity::Exact(1), ceil),
    Builtin::new("Min", Arity::Exact(2), min),
    Builtin::new("Max", Arity::Exact(2), max),
];

fn add(args: &Args<'_>) -> Result<Value, BuiltinError> {
    arithmetic(args, BinaryOp::Add)
}

fn subtract(args: &Args<'_>) -> Result<Value, BuiltinError> {
    arithmetic(args, BinaryOp::Sub)
}

fn multiply(args: &Args<'_>) -> Result<Value, BuiltinError> {
    arithmetic(args, BinaryOp::Mul)
}

fn divide(args: &Args<'_>) -> Result<Value, BuiltinError> {
    arithmetic(args, BinaryOp::Div)
}

fn power(args: &Args<'_>) -> Result<Value, BuiltinError> {
    arithmetic(args, BinaryOp::Pow)
}

fn modulo(args: &Args<'_>) -> Result<Value, BuiltinError> {
    arithmetic(args, BinaryOp::Mod)
}

fn arithmetic(args: &Args<'_>, op: BinaryOp) -> Result<Value, BuiltinError> {
    let name = args.name();
    let coerced = coerce(args.value(0)?, args.value(1)?, op);
    if coerced.changed {
        trace!(builtin = name, op = %op, "coerced operands");
    }
    match (&coerced.left, &coerced.right) {
        (Value::Int(a), Value::Int(b)) => int_op(name, op, *a, *b),
        (Value::Float(a), Value::Float(b)) => float_op(name, op, *a, *b),
        (Value::String(a), Value::String(b)) if op == BinaryOp::Add => {
            Ok(Value::from(format!("{}{}", a, b)))
        }
        _ => Err(operand_error(args, op)),
    }
}

/// Blame the first argument the operator cannot accept.
fn operand_error(args: &Args<'_>, op: BinaryOp) -> BuiltinError {
    let accepted = |v: &Value| v.is_numeric() || (op == BinaryOp::Add && v.as_str().is_some());
    let expected = if op == BinaryOp::Add {
        "Integer, Float or String"
    } else {
        "Integer or Float"
    };
    let position = match args.values() {
        [left, _] if !accepted(left) => 0,
        _ => 1,
    };
    args.type_error(position, expected)
}

fn int_op(name: &str, op: BinaryOp, a: i64, b: i64) -> Result<Value, BuiltinError> {
    let result = match op {
        BinaryOp::Add => a.checked_add(b),
        BinaryOp::Sub => a.checked_sub(b),
        BinaryOp::Mul => a.checked_mul(b),
        BinaryOp::Div => {
            if b == 0 {
                return Err(BuiltinError::division_by_zero(name));
            }
            a.checked_div(b)
        }
        BinaryOp::Mod => {
            if b == 0 {
                return Err(BuiltinError::modulo_by_zero(name));
            }
            a.checked_rem(b)
        }
        BinaryOp::Pow => {
            if b < 0 {
                return Err(BuiltinError::domain(
                    name,
                    format!("negative exponent {} requires a Float operand", b),
                ));
            }
            u32::try_from(b).ok().and_then(|e| a.checked_pow(e))
        }
    };
    result
        .map(Value::Int)
        .ok_or_else(|| BuiltinError::overflow(name))
}

fn float_op(name: &str, op: BinaryOp, a: f64, b: f64) -> Result<Value, BuiltinError> {
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(BuiltinError::division_by_zero(name));
            }
            a / b
        }
        BinaryOp::Mod => {
            if b == 0.0 {
                return Err(BuiltinError::modulo_by_zero(name));
            }
            a % b
        }
        BinaryOp::Pow => a.powf(b),
    };
    Ok(Value::Float(result))
}

fn sqrt(args: &Args<'_>) -> Result<Value, BuiltinError> {
    let v = args.number(0)?;
    let x = v.as_float().unwrap_or(f64::NAN);
    if x < 0.0 {
        return Err(BuiltinError::domain(
            args.name(),
            format!("cannot take the square root of negative number {}", v),
        ));
    }
    Ok(Value::Float(x.sqrt()))
}

fn abs(args: &Args<'_>) -> Result<Value, BuiltinError> {
    match args.number(0)? {
        Value::Int(n) => n
            .checked_abs()
            .map(Value::Int)
            .ok_or_else(|| BuiltinError::overflow(args.name())),
        v => Ok(Value::Float(v.as_float().unwrap_or(f64::NAN).abs())),
    }
}

/// Shared body of `Round`, `floor` and `ceil`: integers pass through, floats
/// are rounded and converted to an integer.
fn to_integral(args: &Args<'_>, round: fn(f64) -> f64) -> Result<Value, BuiltinError> {
    match args.number(0)? {
        Value::Int(n) => Ok(Value::Int(*n)),
        v => float_to_int(args.name(), round(v.as_float().unwrap_or(f64::NAN))),
    }
}

fn round(args: &Args<'_>) -> Result<Value, BuiltinError> {
    to_integral(args, f64::round)
}

fn floor(args: &Args<'_>) -> Result<Value, BuiltinError> {
    to_integral(args, f64::floor)
}

fn ceil(args: &Args<'_>) -> Result<Value, BuiltinError> {
    to_integral(args, f64::ceil)
}

fn min(args: &Args<'_>) -> Result<Value, BuiltinError> {
    pick(args, |left_wins| left_wins)
}

fn max(args: &Args<'_>) -> Result<Value, BuiltinError> {
    pick(args, |left_wins| !left_wins)
}

/// Compare two numbers after coercion. `choose_left` receives whether
/// `left <= right` and returns whether to keep the left operand.
fn pick(args: &Args<'_>, choose_left: fn(bool) -> bool) -> Result<Value, BuiltinError> {
    let left = args.number(0)?;
    let right = args.number(1)?;
    let coerced = coerce(left, right, BinaryOp::Sub);
    let left_le = match (&coerced.left, &coerced.right) {
        (Value::Int(a), Value::Int(b)) => a <= b,
        (a, b) => a.as_float() <= b.as_float(),
    };
    Ok(if choose_left(left_le) {
        coerced.left
    } else {
        coerced.right
    })
}
