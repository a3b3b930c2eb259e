//! The builtin math functions and console input conversion.

use super::Value;

use crate::error::RuntimeError;

/// Digits kept by the trigonometric functions.
const TRIG_DIGITS: usize = 10;

/// Whether text has the shape of a plain number: an optional `-`, digits, and optionally `.` and more digits.
pub fn looks_numeric(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);

    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|byte| byte.is_ascii_digit());

    all_digits(whole) && fraction.map_or(true, all_digits)
}

/// Checks that a builtin's operand is a number that prints as one. Non-finite floats and floats printed in
/// exponent form are rejected along with strings and booleans.
pub fn numeric_operand(function: &'static str, value: &Value) -> Result<f64, RuntimeError> {
    match value.as_f64() {
        Some(number) if looks_numeric(&value.to_string()) => Ok(number),
        _ => Err(RuntimeError::NotNumeric { function, value: value.to_string() }),
    }
}

pub fn absolute(value: &Value) -> Result<Value, RuntimeError> {
    let number = numeric_operand("abs", value)?;

    match value {
        Value::Integer(int) => {
            int.checked_abs().map(Value::Integer).ok_or(RuntimeError::IntegerOverflow { operator: "abs" })
        }
        _ => Ok(Value::Float(number.abs())),
    }
}

pub fn sin(value: &Value) -> Result<Value, RuntimeError> {
    Ok(Value::Float(round_trig(numeric_operand("sin", value)?.sin())))
}

pub fn cos(value: &Value) -> Result<Value, RuntimeError> {
    Ok(Value::Float(round_trig(numeric_operand("cos", value)?.cos())))
}

pub fn tan(value: &Value) -> Result<Value, RuntimeError> {
    Ok(Value::Float(round_trig(numeric_operand("tan", value)?.tan())))
}

/// Always float exponentiation.
pub fn power(base: &Value, exponent: &Value) -> Result<Value, RuntimeError> {
    let base = numeric_operand("pow", base)?;
    let exponent = numeric_operand("pow", exponent)?;

    Ok(Value::Float(base.powf(exponent)))
}

/// Rounds to [`TRIG_DIGITS`] decimal places.
fn round_trig(value: f64) -> f64 {
    format!("{value:.digits$}", digits = TRIG_DIGITS).parse().unwrap_or(value)
}

/// Console input that looks like a number becomes a float. Everything else stays text.
pub fn interpret_input(text: String) -> Value {
    if looks_numeric(&text) {
        if let Ok(number) = text.parse() {
            return Value::Float(number);
        }
    }

    Value::String(text)
}
