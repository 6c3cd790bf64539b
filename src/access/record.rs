//! A general-purpose dynamic record.

use super::accessor::FieldAccessor;
use super::value::Value;

/// An ordered, dynamically typed record.
///
/// Fields keep their insertion order, which becomes the record's intrinsic
/// order for description walks. Lookups are linear: records model request
/// and response messages with a handful of fields, not bulk data.
///
/// # Example
///
/// ```rust
/// use fieldscope::access::{Record, Value};
///
/// let record = Record::new()
///     .with("Name", "test")
///     .with("Limit", 100i32);
/// assert_eq!(record.get("Name"), Some(&Value::String("test".to_string())));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
    displays: Vec<(String, String)>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Record::default()
    }

    /// Inserts a field, replacing any existing value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    /// Builder-style [`insert`](Record::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Attaches an explicit display annotation to a field.
    #[must_use]
    pub fn with_display(mut self, name: impl Into<String>, display: impl Into<String>) -> Self {
        self.displays.push((name.into(), display.into()));
        self
    }

    /// The field's value, or `None` when absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in intrinsic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl FieldAccessor for Record {
    fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(n, _)| n.as_str()).collect()
    }

    fn get(&self, name: &str) -> Option<&Value> {
        Record::get(self, name)
    }

    fn display_override(&self, name: &str) -> Option<&str> {
        self.displays
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d.as_str())
    }
}
