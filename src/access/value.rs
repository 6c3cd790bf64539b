//! The closed sum type over runtime field values.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::metadata::EnumDescription;

use super::record::Record;

/// An enum field value carrying its own enum description.
///
/// Keeping the description next to the number lets every consumer resolve
/// the bitmask-aware display form without a side channel.
#[derive(Debug, Clone)]
pub struct EnumValue {
    /// The canonical enum integer.
    pub number: i32,
    /// The enum type this value belongs to.
    pub description: Arc<EnumDescription>,
}

impl EnumValue {
    /// Creates an enum value of the given enum type.
    #[must_use]
    pub fn new(number: i32, description: Arc<EnumDescription>) -> Self {
        EnumValue {
            number,
            description,
        }
    }

    /// Resolves the display text, bitmask-aware.
    #[must_use]
    pub fn display(&self) -> String {
        self.description.display_value(self.number)
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number && self.description.full_name == other.description.full_name
    }
}

/// A runtime field value.
///
/// This is the closed tagged union every engine dispatches on: scalars,
/// enum values, nested records, lists and string-keyed maps. Collections
/// hold further `Value`s, so arbitrarily nested records flow through the
/// same representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean.
    Bool(bool),
    /// 32-bit signed integer.
    Int32(i32),
    /// 64-bit signed integer.
    Int64(i64),
    /// 32-bit unsigned integer.
    Uint32(u32),
    /// 64-bit unsigned integer.
    Uint64(u64),
    /// 32-bit float.
    Float32(f32),
    /// 64-bit float.
    Float64(f64),
    /// UTF-8 string.
    String(String),
    /// Raw byte sequence.
    Bytes(Vec<u8>),
    /// Enum value with its description attached.
    Enum(EnumValue),
    /// Nested record.
    Record(Record),
    /// Repeated values.
    List(Vec<Value>),
    /// String-keyed map.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Stable name of the value's kind, for error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::Uint32(_) => "uint32",
            Value::Uint64(_) => "uint64",
            Value::Float32(_) => "float32",
            Value::Float64(_) => "float64",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Enum(_) => "enum",
            Value::Record(_) => "message",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Whether the value equals its kind's default for presence purposes.
    ///
    /// Empty strings, byte sequences, lists and maps are defaults. Numeric
    /// zero, `false` and enum zero are **not** defaults: a present number
    /// counts as set regardless of its value. A present nested record
    /// is never a default, even with no fields.
    #[must_use]
    pub fn is_default(&self) -> bool {
        match self {
            Value::String(v) => v.is_empty(),
            Value::Bytes(v) => v.is_empty(),
            Value::List(v) => v.is_empty(),
            Value::Map(v) => v.is_empty(),
            Value::Bool(_)
            | Value::Int32(_)
            | Value::Int64(_)
            | Value::Uint32(_)
            | Value::Uint64(_)
            | Value::Float32(_)
            | Value::Float64(_)
            | Value::Enum(_)
            | Value::Record(_) => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Uint32(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<EnumValue> for Value {
    fn from(v: EnumValue) -> Self {
        Value::Enum(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Map(v)
    }
}
