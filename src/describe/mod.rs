//! Human-readable record description.
//!
//! The describer converts a record into an ordered, display-keyed map that
//! an outer layer can render as text. Nested records expand in place,
//! in contrast with the tabular extractor, which collapses anything nested
//! into compact placeholders.

mod text;

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Serialize;

use crate::access::{FieldAccessor, Value};
use crate::metadata::display_name;

/// Ordered display map: keys sort lexicographically, which is the order
/// the textual rendering uses regardless of field declaration order.
pub type DescribeMap = BTreeMap<String, DescribeValue>;

/// A resolved display value.
///
/// 64-bit integers are already rendered to decimal strings so downstream
/// consumers cannot lose precision; bytes are base64; enum values are
/// display strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DescribeValue {
    /// Boolean, rendered as `true`/`false`.
    Bool(bool),
    /// 32-bit signed integer, kept numeric.
    Int32(i32),
    /// 32-bit unsigned integer, kept numeric.
    Uint32(u32),
    /// 32-bit float, kept numeric.
    Float32(f32),
    /// 64-bit float, kept numeric.
    Float64(f64),
    /// String form: strings, 64-bit integers, base64 bytes, enum displays.
    String(String),
    /// Repeated values.
    List(Vec<DescribeValue>),
    /// Nested display map.
    Map(DescribeMap),
}

impl DescribeValue {
    fn is_empty_string(&self) -> bool {
        matches!(self, DescribeValue::String(s) if s.is_empty())
    }
}

/// Converts records into ordered, human-readable display maps.
///
/// Stateless; enum display resolution travels with the enum values
/// themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordDescriber;

/// Maximum number of elements shown for a repeated scalar field.
const MAX_LIST_DISPLAY: usize = 8;

impl RecordDescriber {
    /// Describes a record as an ordered display map.
    ///
    /// Fields are walked in the record's intrinsic order; keys come from
    /// the display override or the derived display name. Empty strings,
    /// empty collections and empty nested results are omitted; zero and
    /// `false` scalars are kept. A 1-element repeated scalar unwraps to
    /// the bare scalar, longer lists display at most 8 elements, and
    /// repeated nested records are collected without unwrapping.
    #[must_use]
    pub fn to_map<R>(record: &R) -> DescribeMap
    where
        R: FieldAccessor + ?Sized,
    {
        let mut out = DescribeMap::new();
        for name in record.field_names() {
            let Some(value) = record.get(name) else {
                continue;
            };
            let key = match record.display_override(name) {
                Some(display) => display.to_string(),
                None => display_name(name),
            };
            let Some(resolved) = Self::field_value(value) else {
                continue;
            };
            if resolved.is_empty_string() {
                continue;
            }
            out.insert(key, resolved);
        }
        out
    }

    /// Resolves one field value, applying the omission and unwrap rules.
    fn field_value(value: &Value) -> Option<DescribeValue> {
        match value {
            Value::Record(rec) => {
                let nested = Self::to_map(rec);
                if nested.is_empty() {
                    None
                } else {
                    Some(DescribeValue::Map(nested))
                }
            }
            Value::List(items) => {
                if items.is_empty() {
                    return None;
                }
                if matches!(items.first(), Some(Value::Record(_))) {
                    let elements: Vec<DescribeValue> = items
                        .iter()
                        .filter_map(|item| match item {
                            Value::Record(rec) => {
                                let nested = Self::to_map(rec);
                                if nested.is_empty() {
                                    None
                                } else {
                                    Some(DescribeValue::Map(nested))
                                }
                            }
                            other => Some(Self::element_value(other)),
                        })
                        .collect();
                    if elements.is_empty() {
                        None
                    } else {
                        Some(DescribeValue::List(elements))
                    }
                } else {
                    if items.len() == 1 {
                        return Some(Self::element_value(&items[0]));
                    }
                    let elements: Vec<DescribeValue> = items
                        .iter()
                        .map(Self::element_value)
                        .filter(|dv| !dv.is_empty_string())
                        .take(MAX_LIST_DISPLAY)
                        .collect();
                    Some(DescribeValue::List(elements))
                }
            }
            Value::Map(entries) => {
                if entries.is_empty() {
                    return None;
                }
                let map: DescribeMap = entries
                    .iter()
                    .map(|(key, item)| (key.clone(), Self::element_value(item)))
                    .collect();
                Some(DescribeValue::Map(map))
            }
            other => Some(Self::element_value(other)),
        }
    }

    /// Resolves a single element with the scalar rendering rules.
    fn element_value(value: &Value) -> DescribeValue {
        match value {
            Value::Bool(v) => DescribeValue::Bool(*v),
            Value::Int32(v) => DescribeValue::Int32(*v),
            Value::Int64(v) => DescribeValue::String(v.to_string()),
            Value::Uint32(v) => DescribeValue::Uint32(*v),
            Value::Uint64(v) => DescribeValue::String(v.to_string()),
            Value::Float32(v) => DescribeValue::Float32(*v),
            Value::Float64(v) => DescribeValue::Float64(*v),
            Value::String(v) => DescribeValue::String(v.clone()),
            Value::Bytes(v) => DescribeValue::String(BASE64.encode(v)),
            Value::Enum(v) => DescribeValue::String(v.display()),
            Value::Record(rec) => DescribeValue::Map(Self::to_map(rec)),
            Value::List(items) => {
                DescribeValue::List(items.iter().map(Self::element_value).collect())
            }
            Value::Map(entries) => DescribeValue::Map(
                entries
                    .iter()
                    .map(|(key, item)| (key.clone(), Self::element_value(item)))
                    .collect(),
            ),
        }
    }
}
