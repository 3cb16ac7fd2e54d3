//! Cell value types for database-agnostic fixture data.
//!
//! [`Value`] is the unit of data every table exposes. It carries a
//! distinguished [`Value::NoValue`] sentinel meaning "this row never had a
//! value recorded for this column", which is distinct from an explicit SQL
//! NULL and must survive every decorator unchanged.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::kind::DataKind;

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// No value was recorded for this cell. Distinct from [`Value::Null`].
    NoValue,

    /// Explicit SQL NULL.
    Null,

    /// Boolean value.
    Bool(bool),

    /// 16-bit signed integer (smallint).
    I16(i16),

    /// 32-bit signed integer (int).
    I32(i32),

    /// 64-bit signed integer (bigint).
    I64(i64),

    /// 32-bit floating point (real/float4).
    F32(f32),

    /// 64-bit floating point (double precision/float8).
    F64(f64),

    /// Text/string data.
    Text(String),

    /// Binary data.
    Bytes(Vec<u8>),

    /// UUID/GUID value.
    Uuid(Uuid),

    /// Decimal value with arbitrary precision.
    Decimal(Decimal),

    /// Date without time component.
    Date(NaiveDate),

    /// Time without date component.
    Time(NaiveTime),

    /// Timestamp without timezone.
    DateTime(NaiveDateTime),

    /// Timestamp with timezone offset.
    DateTimeTz(DateTime<FixedOffset>),
}

impl Value {
    /// Check if this value is an explicit NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is the "no value recorded" sentinel.
    #[must_use]
    pub fn is_no_value(&self) -> bool {
        matches!(self, Value::NoValue)
    }

    /// Check if this value is NULL or the no-value sentinel.
    ///
    /// Both sort before every concrete value; they are still distinct for
    /// equality purposes.
    #[must_use]
    pub fn is_null_like(&self) -> bool {
        matches!(self, Value::Null | Value::NoValue)
    }

    /// Get the semantic kind of this value's payload.
    ///
    /// `Null` and `NoValue` carry no payload and report [`DataKind::Unknown`].
    #[must_use]
    pub fn kind(&self) -> DataKind {
        match self {
            Value::NoValue | Value::Null => DataKind::Unknown,
            Value::Bool(_) => DataKind::Boolean,
            Value::I16(_) | Value::I32(_) | Value::I64(_) => DataKind::Integer,
            Value::F32(_) | Value::F64(_) => DataKind::Float,
            Value::Text(_) => DataKind::Text,
            Value::Bytes(_) => DataKind::Bytes,
            Value::Uuid(_) => DataKind::Uuid,
            Value::Decimal(_) => DataKind::Decimal,
            Value::Date(_) => DataKind::Date,
            Value::Time(_) => DataKind::Time,
            Value::DateTime(_) => DataKind::DateTime,
            Value::DateTimeTz(_) => DataKind::DateTimeTz,
        }
    }

    /// Canonical text form, used for lexical ordering and diff reporting.
    ///
    /// The rules match cross-database normalization conventions: NULL and
    /// no-value use explicit markers, booleans become `0`/`1`, temporals use
    /// ISO 8601, UUIDs are lowercased, and binary data is hex encoded.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Value::NoValue => "[no value]".to_string(),
            Value::Null => "NULL".to_string(),
            Value::Bool(v) => (if *v { "1" } else { "0" }).to_string(),
            Value::I16(v) => v.to_string(),
            Value::I32(v) => v.to_string(),
            Value::I64(v) => v.to_string(),
            Value::F32(v) => v.to_string(),
            Value::F64(v) => v.to_string(),
            Value::Text(v) => v.clone(),
            Value::Bytes(v) => hex_encode(v),
            Value::Uuid(v) => v.to_string(),
            Value::Decimal(v) => v.to_string(),
            Value::Date(v) => v.format("%Y-%m-%d").to_string(),
            Value::Time(v) => v.format("%H:%M:%S%.3f").to_string(),
            Value::DateTime(v) => v.format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
            Value::DateTimeTz(v) => v.to_rfc3339(),
        }
    }

    /// Get the value as an i64 if it is any integer width.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I16(v) => Some(i64::from(*v)),
            Value::I32(v) => Some(i64::from(*v)),
            Value::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as an f64 if it is any numeric type.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F32(v) => Some(f64::from(*v)),
            Value::F64(v) => Some(*v),
            Value::I16(v) => Some(f64::from(*v)),
            Value::I32(v) => Some(f64::from(*v)),
            Value::I64(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Get the value as a Decimal if it is a decimal or integer.
    #[must_use]
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Decimal(v) => Some(*v),
            Value::I16(v) => Some(Decimal::from(*v)),
            Value::I32(v) => Some(Decimal::from(*v)),
            Value::I64(v) => Some(Decimal::from(*v)),
            _ => None,
        }
    }

    /// Get the value as a bool if it is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

// From implementations for common types
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::I16(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::I32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::I64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::F32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Value::Time(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Value::DateTimeTz(v)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_and_no_value_are_distinct() {
        assert!(Value::Null.is_null());
        assert!(!Value::Null.is_no_value());
        assert!(Value::NoValue.is_no_value());
        assert!(!Value::NoValue.is_null());
        assert!(Value::Null.is_null_like());
        assert!(Value::NoValue.is_null_like());
        assert_ne!(Value::Null, Value::NoValue);
    }

    #[test]
    fn test_kind_reporting() {
        assert_eq!(Value::I32(1).kind(), DataKind::Integer);
        assert_eq!(Value::Text("a".to_string()).kind(), DataKind::Text);
        assert_eq!(Value::Null.kind(), DataKind::Unknown);
        assert_eq!(Value::Bool(true).kind(), DataKind::Boolean);
    }

    #[test]
    fn test_to_text_normalization() {
        assert_eq!(Value::Null.to_text(), "NULL");
        assert_eq!(Value::Bool(true).to_text(), "1");
        assert_eq!(Value::Bool(false).to_text(), "0");
        assert_eq!(Value::Bytes(vec![0xde, 0xad]).to_text(), "dead");
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(Value::Date(date).to_text(), "2024-03-07");
    }

    #[test]
    fn test_numeric_coercions() {
        assert_eq!(Value::I16(7).as_i64(), Some(7));
        assert_eq!(Value::I64(7).as_f64(), Some(7.0));
        assert_eq!(Value::Text("7".to_string()).as_i64(), None);
        assert_eq!(Value::I32(3).as_decimal(), Some(Decimal::from(3)));
    }

    #[test]
    fn test_from_implementations() {
        let v: Value = 42i32.into();
        assert_eq!(v, Value::I32(42));

        let v: Value = "hello".into();
        assert_eq!(v, Value::Text("hello".to_string()));

        let v: Value = Option::<i64>::None.into();
        assert_eq!(v, Value::Null);
    }
}
