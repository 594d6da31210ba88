//! Operand coercion for binary operators.
//!
//! Mixed `Int`/`Float` pairs are widened to `Float`. For `+` only, a string
//! paired with a displayable scalar turns the scalar into its rendering so the
//! operator concatenates. Anything else passes through untouched and the
//! operator decides whether the pair is legal.

use crate::values::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Result of [`coerce`]. `changed` is informational; `left`/`right` are
/// what the operator must use.
#[derive(Debug, Clone)]
pub struct Coerced {
    pub left: Value,
    pub right: Value,
    pub changed: bool,
}

/// Scalars that `+` will render into a string when paired with one.
fn is_displayable_scalar(v: &Value) -> bool {
    matches!(
        v,
        Value::Int(_) | Value::Float(_) | Value::Bool(_) | Value::Null
    )
}

pub fn coerce(left: &Value, right: &Value, op: BinaryOp) -> Coerced {
    let (left, right, changed) = match (left, right) {
        (Value::Int(a), Value::Float(_)) => (Value::Float(*a as f64), right.clone(), true),
        (Value::Float(_), Value::Int(b)) => (left.clone(), Value::Float(*b as f64), true),
        (Value::String(_), other) if op == BinaryOp::Add && is_displayable_scalar(other) => {
            (left.clone(), Value::from(other.inspect()), true)
        }
        (other, Value::String(_)) if op == BinaryOp::Add && is_displayable_scalar(other) => {
            (Value::from(other.inspect()), right.clone(), true)
        }
        _ => (left.clone(), right.clone(), false),
    };
    Coerced {
        left,
        right,
        changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_float_promotes_int() {
        let c = coerce(&Value::Int(2), &Value::Float(3.5), BinaryOp::Add);
        assert!(c.changed);
        assert!(matches!(c.left, Value::Float(f) if f == 2.0));
        assert!(matches!(c.right, Value::Float(f) if f == 3.5));

        let c = coerce(&Value::Float(1.5), &Value::Int(4), BinaryOp::Mul);
        assert!(c.changed);
        assert!(matches!(c.right, Value::Float(f) if f == 4.0));
    }

    #[test]
    fn same_variant_numbers_unchanged() {
        let c = coerce(&Value::Int(1), &Value::Int(2), BinaryOp::Sub);
        assert!(!c.changed);
        assert!(matches!((c.left, c.right), (Value::Int(1), Value::Int(2))));

        let c = coerce(&Value::Float(1.0), &Value::Float(2.0), BinaryOp::Div);
        assert!(!c.changed);
    }

    #[test]
    fn add_renders_scalar_next_to_string() {
        let c = coerce(&Value::from("n="), &Value::Int(5), BinaryOp::Add);
        assert!(c.changed);
        assert_eq!(c.right.as_str(), Some("5"));

        let c = coerce(&Value::Null, &Value::from("!"), BinaryOp::Add);
        assert_eq!(c.left.as_str(), Some("null"));

        let c = coerce(&Value::Float(2.0), &Value::from("x"), BinaryOp::Add);
        assert_eq!(c.left.as_str(), Some("2.0"));
    }

    #[test]
    fn string_coercion_only_for_add() {
        let c = coerce(&Value::from("3"), &Value::Int(1), BinaryOp::Sub);
        assert!(!c.changed);
        assert!(matches!(c.right, Value::Int(1)));
    }

    #[test]
    fn two_strings_or_containers_untouched() {
        let c = coerce(&Value::from("a"), &Value::from("b"), BinaryOp::Add);
        assert!(!c.changed);

        let c = coerce(&Value::from("a"), &Value::list(vec![]), BinaryOp::Add);
        assert!(!c.changed);
        assert!(matches!(c.right, Value::List(_)));
    }

    #[test]
    fn coercion_is_idempotent() {
        let first = coerce(&Value::Int(7), &Value::Float(0.5), BinaryOp::Add);
        let second = coerce(&first.left, &first.right, BinaryOp::Add);
        assert!(!second.changed);
        assert_eq!(second.left, first.left);
        assert_eq!(second.right, first.right);

        let first = coerce(&Value::Bool(true), &Value::from("!"), BinaryOp::Add);
        let second = coerce(&first.left, &first.right, BinaryOp::Add);
        assert!(!second.changed);
        assert_eq!(second.left.as_str(), Some("true"));
    }
}
