//! Binary operators. Both operands are always evaluated before any of these run.

use super::Value;

use crate::ast::BinaryOperator;
use crate::error::RuntimeError;

use std::cmp::Ordering;

pub fn apply_binary(op: BinaryOperator, left: Value, right: Value) -> Result<Value, RuntimeError> {
    use BinaryOperator as B;

    match op {
        B::Sum | B::Sub | B::Mul => arithmetic(op, left, right),
        B::Div => divide(left, right),
        B::Equal => Ok(Value::Boolean(values_equal(&left, &right))),
        B::NotEqual => Ok(Value::Boolean(!values_equal(&left, &right))),
        B::Greater | B::Less | B::GreaterEqual | B::LessEqual => {
            let ordering = compare(op, &left, &right)?;

            Ok(Value::Boolean(match (op, ordering) {
                (_, None) => false,
                (B::Greater, Some(ordering)) => ordering == Ordering::Greater,
                (B::Less, Some(ordering)) => ordering == Ordering::Less,
                (B::GreaterEqual, Some(ordering)) => ordering != Ordering::Less,
                (_, Some(ordering)) => ordering != Ordering::Greater,
            }))
        }
        B::And | B::Or => match (&left, &right) {
            (Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(if op == B::And { *a && *b } else { *a || *b })),
            _ => Err(RuntimeError::Logical(format!(
                "Cannot apply '{}' to {} '{left}' and {} '{right}'",
                op.symbol(),
                left.type_name(),
                right.type_name()
            ))),
        },
    }
}

fn operand_types(op: BinaryOperator, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::OperandTypes { operator: op.symbol(), left: left.to_string(), right: right.to_string() }
}

/// `+ - *`. Integers stay integers, anything mixed with a float becomes a float. `+` also joins strings.
fn arithmetic(op: BinaryOperator, left: Value, right: Value) -> Result<Value, RuntimeError> {
    use BinaryOperator as B;

    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => {
            let result = match op {
                B::Sum => a.checked_add(b),
                B::Sub => a.checked_sub(b),
                _ => a.checked_mul(b),
            };

            result.map(Value::Integer).ok_or(RuntimeError::IntegerOverflow { operator: op.symbol() })
        }
        (Value::String(a), Value::String(b)) if op == B::Sum => Ok(Value::String(a + &b)),
        (left, right) => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => Ok(Value::Float(match op {
                B::Sum => a + b,
                B::Sub => a - b,
                _ => a * b,
            })),
            _ => Err(operand_types(op, &left, &right)),
        },
    }
}

/// `/` always produces a float.
fn divide(left: Value, right: Value) -> Result<Value, RuntimeError> {
    match (left.as_f64(), right.as_f64()) {
        (Some(_), Some(b)) if b == 0.0 => Err(RuntimeError::DivisionByZero),
        (Some(a), Some(b)) => Ok(Value::Float(a / b)),
        _ => Err(operand_types(BinaryOperator::Div, &left, &right)),
    }
}

/// Numbers compare by value across integer and float. Anything else must be the same variant and equal.
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (left, right) if left.is_number() && right.is_number() => left.as_f64() == right.as_f64(),
        (left, right) => left == right,
    }
}

/// `None` when the operands are numbers that do not compare (NaN).
fn compare(op: BinaryOperator, left: &Value, right: &Value) -> Result<Option<Ordering>, RuntimeError> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Some(a.cmp(b))),
        (Value::String(a), Value::String(b)) => Ok(Some(a.cmp(b))),
        (left, right) => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => Ok(a.partial_cmp(&b)),
            _ => Err(operand_types(op, left, right)),
        },
    }
}
