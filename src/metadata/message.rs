//! Message descriptions: the per-record-type schema consumed by the engines.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::sync::Arc;

use super::displayname::display_name;
use super::fields::{filter_printable, FieldMeta};

/// Declarative description of one structured record type.
///
/// Built once by the generation stage, registered with a
/// [`MetadataRegistry`](crate::metadata::MetadataRegistry) and shared
/// read-only behind [`Arc`] for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MessageDescription {
    /// Short type name, e.g. `ListAnnotationsRequest`.
    pub name: String,
    /// Explicit display annotation; empty means "derive from the name".
    pub display: String,
    /// Fully qualified type name, e.g. `es.ListAnnotationsRequest`.
    pub full_name: String,
    /// Documentation text attached to the message.
    pub documentation: String,
    /// The message is deprecated.
    pub deprecated: bool,
    /// Ordered field metadata, in schema declaration order.
    pub fields: Vec<Arc<FieldMeta>>,
    /// Names of fields eligible for independent tabular projection.
    pub list_sources: Vec<String>,
}

impl MessageDescription {
    /// Creates a message description with the given names.
    #[must_use]
    pub fn new(name: &str, full_name: &str) -> Self {
        MessageDescription {
            name: name.to_string(),
            full_name: full_name.to_string(),
            ..MessageDescription::default()
        }
    }

    /// Sets the explicit display annotation.
    #[must_use]
    pub fn display(mut self, display: &str) -> Self {
        self.display = display.to_string();
        self
    }

    /// Sets the documentation text.
    #[must_use]
    pub fn documentation(mut self, documentation: &str) -> Self {
        self.documentation = documentation.to_string();
        self
    }

    /// Marks the message deprecated.
    #[must_use]
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Appends a field, preserving declaration order.
    #[must_use]
    pub fn field(mut self, field: FieldMeta) -> Self {
        self.fields.push(Arc::new(field));
        self
    }

    /// Declares the fields eligible for independent tabular projection.
    #[must_use]
    pub fn list_sources<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_sources = names.into_iter().map(Into::into).collect();
        self
    }

    /// The display name: the explicit annotation, or derived from the name.
    #[must_use]
    pub fn display_name(&self) -> Cow<'_, str> {
        if self.display.is_empty() {
            Cow::Owned(display_name(&self.name))
        } else {
            Cow::Borrowed(self.display.as_str())
        }
    }

    /// Looks up a field by name or fully qualified name.
    #[must_use]
    pub fn find_field(&self, name: &str) -> Option<&Arc<FieldMeta>> {
        self.fields
            .iter()
            .find(|f| f.name == name || f.full_name == name)
    }

    /// Fields that can flatten into a table cell.
    #[must_use]
    pub fn printable_fields(&self) -> Vec<Arc<FieldMeta>> {
        filter_printable(&self.fields)
    }

    /// Renders the schema as human-readable documentation.
    ///
    /// The output starts with the display name, followed by the message
    /// documentation and one entry per field with its kind tag, declared
    /// enum members, and field documentation. `indent` is the per-level
    /// indentation unit (e.g. `"  "`).
    #[must_use]
    pub fn document(&self, indent: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}:", self.display_name());
        write_text(&mut out, &self.documentation, indent, false);

        let next_indent = format!("{indent}{indent}");
        let field_doc_indent = format!("{next_indent}{indent}");

        let _ = writeln!(out, "{indent}Fields:");
        for field in &self.fields {
            let _ = writeln!(out, "{next_indent}- Field: {}", field.name);
            let _ = writeln!(out, "{next_indent}  Type: {}", field.kind);
            if let Some(descr) = &field.enum_description {
                let members = descr
                    .enums
                    .iter()
                    .map(|m| format!("{} ({})", m.display_name(), m.value))
                    .collect::<Vec<_>>()
                    .join(", ");
                let _ = writeln!(out, "{next_indent}  Enum values: {members}");
            }
            if !field.documentation.is_empty() {
                let _ = write!(out, "{next_indent}  Documentation: ");
                write_text(&mut out, &field.documentation, &field_doc_indent, true);
            }
        }
        out.push('\n');
        out
    }
}

/// Writes multi-line text with each line indented, dropping trailing blank
/// lines. With `no_first_indent`, the first line continues the current
/// output line.
fn write_text(out: &mut String, text: &str, indent: &str, no_first_indent: bool) {
    if text.is_empty() {
        return;
    }
    let parts: Vec<&str> = text.split('\n').collect();
    let mut last = parts.len() - 1;
    while last > 0 && parts[last].is_empty() {
        last -= 1;
    }
    for (idx, part) in parts.iter().enumerate() {
        if idx > last {
            break;
        }
        if idx > 0 || !no_first_indent {
            out.push_str(indent);
        }
        out.push_str(part);
        out.push('\n');
    }
}
