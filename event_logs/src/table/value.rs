use chrono::{DateTime, FixedOffset};
use ordered_float::OrderedFloat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::hash::{Hash, Hasher};

///
/// A single cell of tabular event data
///
/// Case identifiers are plain [`Value`]s, which is why [`Value`] implements [`Eq`] and [`Hash`]
/// (floats are compared and hashed through [`OrderedFloat`]).
///
/// Tip: If you know the expected `Value` type, make use of the `try_as_xxx` functions (e.g., [`Value::try_as_string`])
///
/// ```rust
/// use event_logs::table::Value;
/// let v = Value::from(42);
///
/// assert_eq!(v.try_as_int(), Some(&42));
/// assert_eq!(v.to_string(), "42");
/// ````
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "content")]
pub enum Value {
    /// String values
    String(String),
    /// `DateTime` values
    Date(DateTime<FixedOffset>),
    /// Integer values
    Int(i64),
    /// Float values
    Float(f64),
    /// Boolean values
    Boolean(bool),
    /// Missing cell
    None(),
}

impl Display for Value {
    /// Get String representation of a [`Value`]
    ///
    /// For missing cells, the String `"None"` is returned.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Date(d) => write!(f, "{}", d.to_rfc3339()),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::None() => write!(f, "None"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => OrderedFloat(*a) == OrderedFloat(*b),
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::None(), Value::None()) => true,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::String(value) => value.hash(state),
            Value::Date(value) => value.hash(state),
            Value::Int(value) => value.hash(state),
            Value::Float(value) => OrderedFloat::from(*value).hash(state),
            Value::Boolean(value) => value.hash(state),
            Value::None() => {}
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T> From<DateTime<T>> for Value
where
    T: chrono::TimeZone,
{
    fn from(value: DateTime<T>) -> Self {
        Self::Date(value.fixed_offset())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None(), Into::into)
    }
}

impl Value {
    ///
    /// Try to get value as String
    ///
    /// Returns `Some()` of inner value if value is of variant [`Value::String`] and `None` otherwise
    ///
    pub fn try_as_string(&self) -> Option<&String> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }
    ///
    /// Try to get value as date
    ///
    /// Returns `Some()` of inner value if value is of variant [`Value::Date`] and `None` otherwise
    ///
    pub fn try_as_date(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Value::Date(v) => Some(v),
            _ => None,
        }
    }
    ///
    /// Try to get value as int
    ///
    /// Returns `Some()` of inner value if value is of variant [`Value::Int`] and `None` otherwise
    ///
    pub fn try_as_int(&self) -> Option<&i64> {
        match self {
            Value::Int(v) => Some(v),
            _ => None,
        }
    }
    ///
    /// Try to get value as float
    ///
    /// Returns `Some()` of inner value if value is of variant [`Value::Float`] and `None` otherwise
    ///
    pub fn try_as_float(&self) -> Option<&f64> {
        match self {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }
    ///
    /// Try to get value as bool
    ///
    /// Returns `Some()` of inner value if value is of variant [`Value::Boolean`] and `None` otherwise
    ///
    pub fn try_as_bool(&self) -> Option<&bool> {
        match self {
            Value::Boolean(v) => Some(v),
            _ => None,
        }
    }

    /// Whether this is a missing cell
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None())
    }

    /// Short name of the value type, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Date(_) => "datetime",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Boolean(_) => "bool",
            Value::None() => "none",
        }
    }
}
