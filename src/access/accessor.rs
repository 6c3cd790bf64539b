//! The field-accessor capability consumed by every engine.

use super::value::Value;

/// Read access to a record's fields.
///
/// The validator, describer and tabular extractor depend only on this
/// trait, never on a concrete record representation. The crate ships
/// [`Record`](super::Record) as the general-purpose implementation;
/// callers with a native record type implement the trait themselves.
///
/// Nested records, lists and maps are reached through the [`Value`] sum
/// type returned by [`get`](FieldAccessor::get).
pub trait FieldAccessor {
    /// Field names in the record's intrinsic order.
    fn field_names(&self) -> Vec<&str>;

    /// Explicit presence signal for the field, when the backing
    /// representation tracks one.
    ///
    /// The default reports `false`, which makes presence fall back to the
    /// per-kind default-value rules: empty strings, bytes and collections
    /// count as absent, while numeric zero and `false` count as present.
    /// Representations with genuine presence tracking (optional fields,
    /// wire formats with field tags) should override this.
    fn is_set(&self, name: &str) -> bool {
        let _ = name;
        false
    }

    /// The field's value, or `None` when the field is absent.
    fn get(&self, name: &str) -> Option<&Value>;

    /// Explicit display annotation for the field, if any.
    ///
    /// When `None`, consumers derive the display name from the field name.
    fn display_override(&self, name: &str) -> Option<&str> {
        let _ = name;
        None
    }
}
