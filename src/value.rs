use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A raw or mapped record: insertion-ordered keys to scalar values.
pub type Record = IndexMap<String, Value>;

/// Builds a [`Record`] from key/value pairs, keeping their order.
pub fn record<K, V, I>(pairs: I) -> Record
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

/// Bit pattern used for float equality and hashing: `-0.0` folds into `0.0`
/// and every NaN into one canonical NaN.
fn float_key(f: f64) -> u64 {
    if f == 0.0 {
        0.0f64.to_bits()
    } else if f.is_nan() {
        f64::NAN.to_bits()
    } else {
        f.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => float_key(*a) == float_key(*b),
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Boolean(b) => b.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => float_key(*f).hash(state),
            Value::String(s) => s.hash(state),
        }
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Null and the empty string both count as "no value".
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view used by aggregates. Booleans are not numbers here.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
        }
    }

    pub fn as_display(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => {
                if f.fract() == 0.0 && f.is_finite() {
                    format!("{f:.1}")
                } else {
                    f.to_string()
                }
            }
            Value::String(s) => s.clone(),
        }
    }

    /// Total ordering used for sorting: null first, then booleans, numbers
    /// (integers and floats compared numerically), then strings.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        fn rank(value: &Value) -> u8 {
            match value {
                Value::Null => 0,
                Value::Boolean(_) => 1,
                Value::Integer(_) | Value::Float(_) => 2,
                Value::String(_) => 3,
            }
        }
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (left, right) => match (left.as_f64(), right.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => rank(left).cmp(&rank(right)),
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    /// Accepts any scalar unchanged.
    Any,
}

// Whole floats in this half-open range convert to i64 exactly.
const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;
const I64_END_F64: f64 = 9_223_372_036_854_775_808.0;

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::Any => "any",
        }
    }

    pub fn variants() -> &'static [&'static str] {
        &["string", "integer", "float", "boolean", "any"]
    }

    /// Coerces a scalar into this type. Empty strings become null for every
    /// non-string type so that mapper placeholders validate uniformly.
    pub fn coerce(&self, value: Value) -> Result<Value, String> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        match self {
            FieldType::Any => Ok(value),
            FieldType::String => match value {
                Value::String(_) => Ok(value),
                Value::Boolean(_) | Value::Integer(_) | Value::Float(_) => {
                    Ok(Value::String(value.as_display()))
                }
                Value::Null => Ok(Value::Null),
            },
            _ if value.is_blank() => Ok(Value::Null),
            FieldType::Integer => match value {
                Value::Integer(_) => Ok(value),
                Value::Float(f) if f.fract() == 0.0 && (I64_MIN_F64..I64_END_F64).contains(&f) => {
                    Ok(Value::Integer(f as i64))
                }
                Value::String(ref s) => s
                    .trim()
                    .parse::<i64>()
                    .map(Value::Integer)
                    .map_err(|_| format!("expected integer but found '{s}'")),
                other => Err(format!("expected integer but found {}", other.kind())),
            },
            FieldType::Float => match value {
                Value::Float(_) => Ok(value),
                Value::Integer(i) => Ok(Value::Float(i as f64)),
                Value::String(ref s) => s
                    .trim()
                    .parse::<f64>()
                    .map(Value::Float)
                    .map_err(|_| format!("expected float but found '{s}'")),
                other => Err(format!("expected float but found {}", other.kind())),
            },
            FieldType::Boolean => match value {
                Value::Boolean(_) => Ok(value),
                Value::Integer(0) => Ok(Value::Boolean(false)),
                Value::Integer(1) => Ok(Value::Boolean(true)),
                Value::String(ref s) => match s.trim().to_ascii_lowercase().as_str() {
                    "true" | "t" | "yes" | "y" | "1" => Ok(Value::Boolean(true)),
                    "false" | "f" | "no" | "n" | "0" => Ok(Value::Boolean(false)),
                    _ => Err(format!("expected boolean but found '{s}'")),
                },
                other => Err(format!("expected boolean but found {}", other.as_display())),
            },
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "string" | "str" => Ok(FieldType::String),
            "integer" | "int" => Ok(FieldType::Integer),
            "float" | "double" => Ok(FieldType::Float),
            "boolean" | "bool" => Ok(FieldType::Boolean),
            "any" => Ok(FieldType::Any),
            _ => Err(format!(
                "Unknown field type '{value}'. Supported types: {}",
                FieldType::variants().join(", ")
            )),
        }
    }
}
