// this_file: src/value.rs

//! The materialized JSON value tree produced by [`crate::builder::ObjectBuilder`]
//! and [`crate::selector::items`].

use bigdecimal::BigDecimal;
use rustc_hash::FxHashMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A JSON number, preserving the distinction between values that parsed
/// cleanly as an `i64` and values that needed arbitrary-precision decimal
/// representation.
///
/// The choice is value-preserving, not syntax-preserving: `1` becomes
/// [`Number::Integer`], while `1.0` and `1e2` become [`Number::Decimal`],
/// matching the reference parser's `Decimal(number) if '.' in number else
/// int(number)` rule.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Number {
    /// An integer value that fits in an `i64`.
    Integer(i64),
    /// An arbitrary-precision decimal value.
    Decimal(BigDecimal),
}

impl Number {
    /// Returns this number as an `f64`, losing precision for values that
    /// cannot be represented exactly.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Number::Integer(i) => Some(*i as f64),
            Number::Decimal(d) => {
                use bigdecimal::ToPrimitive;
                d.to_f64()
            }
        }
    }

    /// If this number is an integer, returns it as an `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Decimal(_) => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{i}"),
            Number::Decimal(d) => write!(f, "{d}"),
        }
    }
}

/// Any JSON value, as reconstructed by [`crate::builder::ObjectBuilder`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// `null`.
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// A JSON number.
    Number(Number),
    /// A JSON string.
    String(String),
    /// A JSON array.
    Array(Vec<Value>),
    /// A JSON object. Duplicate keys within one object resolve to
    /// "last value wins", inherited from [`crate::builder::ObjectBuilder`].
    Object(FxHashMap<String, Value>),
}

impl Value {
    /// Returns `true` if this is `Value::Null`.
    #[inline(always)]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// If this is a `Value::Bool`, returns the bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If this is a `Value::Number`, returns a reference to it.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// If this is a `Value::String`, returns it as a `&str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If this is a `Value::Array`, returns a reference to the vector.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// If this is a `Value::Object`, returns a reference to the map.
    pub fn as_object(&self) -> Option<&FxHashMap<String, Value>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }
}
