//! Textual rendering of describe maps.

use crate::access::FieldAccessor;
use crate::{Error, Result};

use super::{DescribeMap, RecordDescriber};

impl RecordDescriber {
    /// Describes a record and renders the map as YAML.
    ///
    /// Keys appear in lexicographic order. 64-bit integers were already
    /// resolved to strings by the map conversion, so the YAML output quotes
    /// them and consumers cannot mistake them for lossy floats.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rendering`] when serialization fails.
    pub fn to_yaml<R>(record: &R) -> Result<String>
    where
        R: FieldAccessor + ?Sized,
    {
        Self::render_yaml(&Self::to_map(record))
    }

    /// Renders an already-built describe map as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rendering`] when serialization fails.
    pub fn render_yaml(map: &DescribeMap) -> Result<String> {
        serde_yaml::to_string(map).map_err(|err| Error::Rendering(err.to_string()))
    }
}
