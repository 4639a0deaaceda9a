use indexmap::IndexMap;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::ser::Error;
use serde::{Serialize, Serializer};

/// A single value in a flat record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Decimal(Decimal),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<FieldValue>),
    Map(IndexMap<String, FieldValue>)
}

impl FieldValue {
    pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(value.into())
    }

    pub fn list<T: Into<FieldValue>>(values: impl IntoIterator<Item = T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::UInt(value) => i64::try_from(*value).ok(),
            _ => None
        }
    }

    /// Replaces every byte value, however deeply nested, with its lowercase hex string.
    pub fn hex_encode_bytes(&mut self) {
        match self {
            Self::Bytes(bytes) => *self = Self::Str(hex::encode(bytes)),
            Self::List(values) => values.iter_mut().for_each(FieldValue::hex_encode_bytes),
            Self::Map(entries) => entries.values_mut().for_each(FieldValue::hex_encode_bytes),
            _ => {}
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::UInt(value) => serializer.serialize_u64(*value),
            Self::Decimal(value) if value.fract().is_zero() => {
                let whole = value.to_i64().ok_or_else(|| S::Error::custom(format!("decimal [{value}] out of range")))?;
                serializer.serialize_i64(whole)
            }
            Self::Decimal(value) => {
                let float = value.to_f64().ok_or_else(|| S::Error::custom(format!("decimal [{value}] out of range")))?;
                serializer.serialize_f64(float)
            }
            Self::Str(value) => serializer.serialize_str(value),
            Self::Bytes(value) => serializer.serialize_str(&hex::encode(value)),
            Self::List(values) => serializer.collect_seq(values),
            Self::Map(entries) => serializer.collect_map(entries)
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        Self::UInt(value as u64)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<IndexMap<String, FieldValue>> for FieldValue {
    fn from(value: IndexMap<String, FieldValue>) -> Self {
        Self::Map(value)
    }
}
