//! # fieldscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used
//! types and traits, allowing for ergonomic glob imports.
//!
//! # Example
//!
//! ```rust
//! use fieldscope::prelude::*;
//!
//! let descr = MessageDescription::new("Annotation", "es.Annotation")
//!     .field(FieldMeta::new("ID", FieldKind::String).required());
//! let record = Record::new().with("ID", "1");
//! assert!(Validator::default().validate(Some(&record), Some(&descr)).is_ok());
//! ```

pub use crate::access::{EnumValue, FieldAccessor, Record, Value};
pub use crate::describe::{DescribeMap, DescribeValue, RecordDescriber};
pub use crate::metadata::{
    display_name, ElementKind, EnumDescription, EnumMeta, FieldKind, FieldMeta, ListOption,
    MessageDescription, MetadataRegistry, RegistryBuilder, SearchOptions,
};
pub use crate::tabular::{Table, TableRow, TabularData, TabularExtractor};
pub use crate::validation::{FaultMode, ValidationConfig, Validator};
pub use crate::{Error, Result};
