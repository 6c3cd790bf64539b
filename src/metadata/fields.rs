//! Field metadata: kind tags, constraint annotations and presentation flags.
//!
//! [`FieldKind`] is a closed sum type over every field shape the engines
//! understand; each engine dispatches on it with one exhaustive `match`, so
//! adding a kind cannot silently fall through unhandled. [`FieldMeta`]
//! bundles the kind with the declarative constraints (`required`,
//! `required_or`, bounds, counts) and the presentation metadata consumed by
//! the describer and the tabular extractor.

use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, OnceLock};

use bitflags::bitflags;

use super::displayname::display_name;
use super::enums::EnumDescription;

bitflags! {
    /// Presentation and indexing flags attached to a field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SearchOptions: u32 {
        /// The field is not indexed for search.
        const NO_INDEX = 1;
        /// The field is excluded from search results.
        const EXCLUDE = 1 << 1;
        /// The field may be used as a sort key.
        const SORTABLE = 1 << 2;
        /// The field may be used as a facet.
        const FACET = 1 << 3;
        /// The field is hidden from default presentation.
        const HIDDEN = 1 << 4;
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions::empty()
    }
}

/// Whether a field may serve as an independent tabular projection source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum ListOption {
    /// No explicit annotation; the field follows the default rules.
    #[default]
    Unspecified,
    /// The field is explicitly enabled as a projection source.
    Enable,
    /// The field must not be projected into its own table.
    Disable,
}

/// Terminal kinds: everything that can appear on its own or as a list
/// element or map value. Collections do not nest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ElementKind {
    /// Boolean.
    Bool,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit unsigned integer.
    Uint32,
    /// 64-bit unsigned integer.
    Uint64,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
    /// UTF-8 string.
    String,
    /// Raw byte sequence.
    Bytes,
    /// Enum value resolved through an [`EnumDescription`].
    Enum,
    /// Nested record.
    Message,
}

impl ElementKind {
    /// The singular [`FieldKind`] corresponding to this element kind.
    #[must_use]
    pub fn as_kind(self) -> FieldKind {
        match self {
            ElementKind::Bool => FieldKind::Bool,
            ElementKind::Int32 => FieldKind::Int32,
            ElementKind::Int64 => FieldKind::Int64,
            ElementKind::Uint32 => FieldKind::Uint32,
            ElementKind::Uint64 => FieldKind::Uint64,
            ElementKind::Float32 => FieldKind::Float32,
            ElementKind::Float64 => FieldKind::Float64,
            ElementKind::String => FieldKind::String,
            ElementKind::Bytes => FieldKind::Bytes,
            ElementKind::Enum => FieldKind::Enum,
            ElementKind::Message => FieldKind::Message,
        }
    }
}

/// Closed kind tag of a field.
///
/// The scalar arms mirror [`ElementKind`]; `List` and `Map` carry their
/// element kind. Map keys are always strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Boolean.
    Bool,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit unsigned integer.
    Uint32,
    /// 64-bit unsigned integer.
    Uint64,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
    /// UTF-8 string.
    String,
    /// Raw byte sequence.
    Bytes,
    /// Enum value resolved through an [`EnumDescription`].
    Enum,
    /// Singular nested record.
    Message,
    /// Repeated field with the given element kind.
    List(ElementKind),
    /// String-keyed map with the given value kind.
    Map(ElementKind),
}

impl FieldKind {
    /// Whether values of this kind can flatten into a single table cell.
    ///
    /// Singular nested records and raw byte sequences cannot; everything
    /// else renders as text (collections collapse to an item count).
    #[must_use]
    pub fn is_printable(&self) -> bool {
        !matches!(self, FieldKind::Message | FieldKind::Bytes)
    }

    /// Whether this kind is a list or a map.
    #[must_use]
    pub fn is_collection(&self) -> bool {
        matches!(self, FieldKind::List(_) | FieldKind::Map(_))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Bool => write!(f, "bool"),
            FieldKind::Int32 => write!(f, "int32"),
            FieldKind::Int64 => write!(f, "int64"),
            FieldKind::Uint32 => write!(f, "uint32"),
            FieldKind::Uint64 => write!(f, "uint64"),
            FieldKind::Float32 => write!(f, "float32"),
            FieldKind::Float64 => write!(f, "float64"),
            FieldKind::String => write!(f, "string"),
            FieldKind::Bytes => write!(f, "bytes"),
            FieldKind::Enum => write!(f, "enum"),
            FieldKind::Message => write!(f, "message"),
            FieldKind::List(elem) => write!(f, "[]{elem}"),
            FieldKind::Map(elem) => write!(f, "map<string,{elem}>"),
        }
    }
}

/// Metadata for a single field of a message description.
///
/// Instances are built once by the generation stage and shared read-only
/// behind [`Arc`]; the nested-field slot is the only lazily populated part
/// and is write-once (see
/// [`MetadataRegistry`](crate::metadata::MetadataRegistry)).
#[derive(Debug)]
pub struct FieldMeta {
    /// Field name as declared in the schema.
    pub name: String,
    /// Fully qualified field name.
    pub full_name: String,
    /// Explicit display annotation; empty means "derive from the name".
    pub display: String,
    /// Documentation text attached to the field.
    pub documentation: String,
    /// Closed kind tag.
    pub kind: FieldKind,
    /// The field must be present.
    pub required: bool,
    /// The field or one of these sibling fields must be present.
    pub required_or: Vec<String>,
    /// Minimum length for strings/bytes, minimum value for numbers.
    pub min: i32,
    /// Maximum length for strings/bytes, maximum value for numbers.
    pub max: i32,
    /// Minimum element count for collections.
    pub min_count: i32,
    /// Maximum element count for collections.
    pub max_count: i32,
    /// Presentation and indexing flags.
    pub search_options: SearchOptions,
    /// Projection-source annotation.
    pub list_option: ListOption,
    /// Fully qualified name of the nested record type, for message-kind
    /// fields whose metadata is resolved by the registry linking pass.
    pub struct_name: String,
    /// Enum description for enum-kind fields.
    pub enum_description: Option<Arc<EnumDescription>>,
    nested: OnceLock<Vec<Arc<FieldMeta>>>,
}

impl FieldMeta {
    /// Creates a field with the given name and kind.
    #[must_use]
    pub fn new(name: &str, kind: FieldKind) -> Self {
        FieldMeta {
            name: name.to_string(),
            full_name: String::new(),
            display: String::new(),
            documentation: String::new(),
            kind,
            required: false,
            required_or: Vec::new(),
            min: 0,
            max: 0,
            min_count: 0,
            max_count: 0,
            search_options: SearchOptions::empty(),
            list_option: ListOption::Unspecified,
            struct_name: String::new(),
            enum_description: None,
            nested: OnceLock::new(),
        }
    }

    /// Sets the fully qualified name.
    #[must_use]
    pub fn full_name(mut self, full_name: &str) -> Self {
        self.full_name = full_name.to_string();
        self
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

    /// Marks the field required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Declares the alternative sibling fields for presence checking.
    #[must_use]
    pub fn required_or<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_or = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the minimum length/value bound.
    #[must_use]
    pub fn min(mut self, min: i32) -> Self {
        self.min = min;
        self
    }

    /// Sets the maximum length/value bound.
    #[must_use]
    pub fn max(mut self, max: i32) -> Self {
        self.max = max;
        self
    }

    /// Sets the minimum element count.
    #[must_use]
    pub fn min_count(mut self, min_count: i32) -> Self {
        self.min_count = min_count;
        self
    }

    /// Sets the maximum element count.
    #[must_use]
    pub fn max_count(mut self, max_count: i32) -> Self {
        self.max_count = max_count;
        self
    }

    /// Sets the presentation and indexing flags.
    #[must_use]
    pub fn search(mut self, options: SearchOptions) -> Self {
        self.search_options = options;
        self
    }

    /// Sets the projection-source annotation.
    #[must_use]
    pub fn list_option(mut self, option: ListOption) -> Self {
        self.list_option = option;
        self
    }

    /// Sets the fully qualified nested record type name, to be resolved by
    /// the registry linking pass.
    #[must_use]
    pub fn struct_name(mut self, struct_name: &str) -> Self {
        self.struct_name = struct_name.to_string();
        self
    }

    /// Attaches the enum description for an enum-kind field.
    #[must_use]
    pub fn enumeration(mut self, descr: Arc<EnumDescription>) -> Self {
        self.enum_description = Some(descr);
        self
    }

    /// Sets the nested field metadata inline, when it is known at
    /// construction time.
    #[must_use]
    pub fn fields(self, fields: Vec<FieldMeta>) -> Self {
        let _ = self.nested.set(fields.into_iter().map(Arc::new).collect());
        self
    }

    /// The display name: the explicit annotation, or derived from the
    /// field name.
    #[must_use]
    pub fn display_name(&self) -> Cow<'_, str> {
        if self.display.is_empty() {
            Cow::Owned(display_name(&self.name))
        } else {
            Cow::Borrowed(self.display.as_str())
        }
    }

    /// Nested field metadata, empty until construction or linking provides it.
    #[must_use]
    pub fn nested_fields(&self) -> &[Arc<FieldMeta>] {
        self.nested.get().map_or(&[], Vec::as_slice)
    }

    /// Whether the nested-field slot has been populated.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.nested.get().is_some()
    }

    /// Whether this field refers to a nested record type, singularly or as
    /// a collection element.
    #[must_use]
    pub fn references_message(&self) -> bool {
        matches!(
            self.kind,
            FieldKind::Message
                | FieldKind::List(ElementKind::Message)
                | FieldKind::Map(ElementKind::Message)
        )
    }

    /// Whether values of this field can flatten into a single table cell.
    #[must_use]
    pub fn is_printable(&self) -> bool {
        self.kind.is_printable()
    }

    pub(crate) fn link_nested(&self, fields: Vec<Arc<FieldMeta>>) {
        // Write-once; a second link attempt is a no-op.
        let _ = self.nested.set(fields);
    }
}

/// Filters fields down to those that can flatten into a table cell.
#[must_use]
pub fn filter_printable(fields: &[Arc<FieldMeta>]) -> Vec<Arc<FieldMeta>> {
    fields
        .iter()
        .filter(|f| f.is_printable())
        .cloned()
        .collect()
}
