//! Host value representation and setter input validation.
//!
//! Attribute setters receive a dynamically typed [`Value`] (or none, for a
//! delete). The functions here turn it into the native parameter type or a
//! typed error, so that nothing invalid ever reaches the driver.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::traits::{CameraError, Result};

/// A dynamically typed value supplied by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Text value.
    Str(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// Parses command-line text: integers first, then floats, otherwise text.
impl FromStr for Value {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if let Ok(v) = s.parse::<i64>() {
            return Ok(Self::Int(v));
        }
        if let Ok(v) = s.parse::<f64>() {
            return Ok(Self::Float(v));
        }
        Ok(Self::Str(s.to_owned()))
    }
}

/// Rejects a delete (no value supplied) for the named attribute.
pub fn require_present<'a>(name: &str, value: Option<&'a Value>) -> Result<&'a Value> {
    value.ok_or_else(|| CameraError::Type(format!("Cannot delete attribute '{name}'")))
}

/// Accepts only integer values; `message` describes the expected type.
pub fn expect_int(value: &Value, message: &str) -> Result<i64> {
    match value {
        Value::Int(v) => Ok(*v),
        Value::Float(_) | Value::Str(_) => Err(CameraError::Type(message.to_owned())),
    }
}

/// Converts any numeric value, or numeric text, to a float.
pub fn expect_float(value: &Value) -> Result<f64> {
    match value {
        #[allow(clippy::cast_precision_loss)]
        Value::Int(v) => Ok(*v as f64),
        Value::Float(v) => Ok(*v),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| CameraError::Type("Could not convert value to a float.".to_owned())),
    }
}

/// Rejects negative integers with a value error.
pub fn non_negative(value: i64, message: &str) -> Result<i64> {
    if value < 0 {
        return Err(CameraError::Value(message.to_owned()));
    }
    Ok(value)
}

/// Narrows an integer to the native parameter width.
///
/// Values that do not fit are reported as out of range with `message`.
pub fn narrow<T: TryFrom<i64>>(value: i64, message: &str) -> Result<T> {
    T::try_from(value).map_err(|_| CameraError::Value(message.to_owned()))
}
