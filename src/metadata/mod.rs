//! Schema metadata: the declarative model driving every engine.
//!
//! All metadata is produced by an out-of-scope generation stage from schema
//! annotations; this crate only consumes the finished, immutable structure.
//! The model is built once at process start via [`RegistryBuilder`] and
//! shared read-only from then on. The only lazily populated part is nested
//! field metadata, resolved exactly once by the registry's one-shot linking
//! pass (forward references between sibling message descriptions cannot be
//! resolved at construction time).
//!
//! # Key Types
//!
//! - [`MessageDescription`] - the per-record-type schema
//! - [`FieldMeta`] / [`FieldKind`] - per-field kinds and constraints
//! - [`EnumDescription`] / [`EnumMeta`] - enum semantics and the enum codec
//! - [`MetadataRegistry`] / [`RegistryBuilder`] - immutable shared storage
//! - [`display_name`] - identifier → display-name derivation

mod displayname;
mod enums;
mod fields;
mod message;
mod registry;

pub use displayname::display_name;
pub use enums::{EnumDescription, EnumMeta};
pub use fields::{filter_printable, ElementKind, FieldKind, FieldMeta, ListOption, SearchOptions};
pub use message::MessageDescription;
pub use registry::{MetadataRegistry, RegistryBuilder};
