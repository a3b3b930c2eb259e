//! Runtime values.

use serde::{Serialize, Serializer};

use std::collections::BTreeMap;
use std::fmt::Display;
use std::rc::Rc;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// The result of statements that produce nothing, e.g. `print()`.
    #[default]
    Unit,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    /// A snapshot of the variable table, which is what `let` evaluates to. Shared with the program state.
    Bindings(Rc<BTreeMap<String, Value>>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "nothing",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::String(_) => "string",
            Value::Bindings(_) => "bindings",
        }
    }

    /// Integers and floats as a float, everything else as `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(int) => Some(*int as f64),
            Value::Float(float) => Some(*float),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Unit => f.write_str("None"),
            Value::Integer(int) => write!(f, "{int}"),
            Value::Float(float) => f.write_str(&float_repr(*float)),
            Value::Boolean(true) => f.write_str("True"),
            Value::Boolean(false) => f.write_str("False"),
            Value::String(string) => f.write_str(string),
            Value::Bindings(bindings) => {
                f.write_str("{")?;
                for (index, (name, value)) in bindings.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Floats print like Python's `repr`: whole numbers keep `.0`, and exponents carry a sign and at least two
/// digits (`1e-05`, `1.5e+16`).
fn float_repr(float: f64) -> String {
    if float.is_nan() {
        return "nan".to_string();
    }

    // Debug keeps the trailing `.0`, and switches to exponent form at the same magnitudes Python does.
    let debug = format!("{float:?}");

    let Some((mantissa, exponent)) = debug.split_once('e') else {
        return debug;
    };

    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };

    format!("{mantissa}e{sign}{digits:0>2}")
}

/// Values serialize as the closest JSON value. `Unit` becomes `null` and bindings become an object.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Unit => serializer.serialize_unit(),
            Value::Integer(int) => serializer.serialize_i64(*int),
            Value::Float(float) => serializer.serialize_f64(*float),
            Value::Boolean(boolean) => serializer.serialize_bool(*boolean),
            Value::String(string) => serializer.serialize_str(string),
            Value::Bindings(bindings) => serializer.collect_map(bindings.iter()),
        }
    }
}
