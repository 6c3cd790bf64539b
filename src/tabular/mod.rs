//! Tabular projection of records.
//!
//! The extractor flattens a record into one or more tables. Unlike the
//! describer it never expands nested structure: collections collapse to an
//! item count and a present nested record to an `<object>` placeholder.
//! Fields declared as list sources project into their own tables, one row
//! per element.

mod render;

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::access::{FieldAccessor, Value};
use crate::metadata::{filter_printable, ElementKind, FieldKind, FieldMeta, ListOption, MessageDescription};
use crate::{Error, Result};

/// An individual row in a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    /// Cell text, as wide as the table header.
    pub cells: Vec<String>,
}

/// One flat table projected from a record.
#[derive(Debug, Clone)]
pub struct Table {
    /// Identifier shown above the rendered table.
    pub id: String,
    /// Header fields, in declaration order.
    pub header: Vec<Arc<FieldMeta>>,
    /// Data rows.
    pub rows: Vec<TableRow>,
}

/// The ordered set of tables projected from one record.
#[derive(Debug, Clone, Default)]
pub struct TabularData {
    /// Tables in projection order: the record's own table first, then one
    /// per declared list source.
    pub tables: Vec<Table>,
}

/// Projects records into flat tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabularExtractor;

impl TabularExtractor {
    /// Builds the tables for a record.
    ///
    /// Without declared list sources the result is a single table over the
    /// record's printable fields with one row. With list sources, the
    /// record's own table excludes the source fields, and each source adds
    /// a table headed by the printable fields of its element type with one
    /// row per element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MetadataInconsistency`] when a declared list source
    /// does not exist, is disabled for projection, or is not a repeated
    /// message field.
    pub fn build_tables<R>(record: &R, descr: &MessageDescription) -> Result<TabularData>
    where
        R: FieldAccessor + ?Sized,
    {
        let mut data = TabularData::default();

        if descr.list_sources.is_empty() {
            let header = descr.printable_fields();
            let rows = vec![Self::build_row(record, &header)];
            data.tables.push(Table {
                id: descr.display_name().into_owned(),
                header,
                rows,
            });
            return Ok(data);
        }

        let header: Vec<Arc<FieldMeta>> = descr
            .printable_fields()
            .into_iter()
            .filter(|f| {
                !descr
                    .list_sources
                    .iter()
                    .any(|s| *s == f.name || *s == f.full_name)
            })
            .collect();
        let rows = vec![Self::build_row(record, &header)];
        data.tables.push(Table {
            id: descr.display_name().into_owned(),
            header,
            rows,
        });

        for source in &descr.list_sources {
            let field = descr.find_field(source).ok_or_else(|| {
                Error::MetadataInconsistency(format!("list source not found: {source}"))
            })?;
            if field.list_option == ListOption::Disable {
                return Err(Error::MetadataInconsistency(format!(
                    "list source is disabled: {source}"
                )));
            }
            if field.kind != FieldKind::List(ElementKind::Message) {
                return Err(Error::MetadataInconsistency(format!(
                    "list source is not a repeated message field: {source}"
                )));
            }

            let header = filter_printable(field.nested_fields());
            let mut rows = Vec::new();
            if let Some(Value::List(items)) = record.get(&field.name) {
                for item in items {
                    if let Value::Record(rec) = item {
                        rows.push(Self::build_row(rec, &header));
                    }
                }
            }
            data.tables.push(Table {
                id: field.display_name().into_owned(),
                header,
                rows,
            });
        }

        Ok(data)
    }

    fn build_row<R>(record: &R, header: &[Arc<FieldMeta>]) -> TableRow
    where
        R: FieldAccessor + ?Sized,
    {
        TableRow {
            cells: header
                .iter()
                .map(|field| Self::cell_value(record.get(&field.name), field))
                .collect(),
        }
    }

    /// Stringifies one cell.
    ///
    /// Absent values render their kind's default; values whose shape
    /// contradicts the declared kind render blank rather than erroring.
    fn cell_value(value: Option<&Value>, field: &FieldMeta) -> String {
        match field.kind {
            FieldKind::Bool => match value {
                None => "false".to_string(),
                Some(Value::Bool(v)) => v.to_string(),
                Some(_) => String::new(),
            },
            FieldKind::Int32 => match value {
                None => "0".to_string(),
                Some(Value::Int32(v)) => v.to_string(),
                Some(_) => String::new(),
            },
            FieldKind::Int64 => match value {
                None => "0".to_string(),
                Some(Value::Int64(v)) => v.to_string(),
                Some(_) => String::new(),
            },
            FieldKind::Uint32 => match value {
                None => "0".to_string(),
                Some(Value::Uint32(v)) => v.to_string(),
                Some(_) => String::new(),
            },
            FieldKind::Uint64 => match value {
                None => "0".to_string(),
                Some(Value::Uint64(v)) => v.to_string(),
                Some(_) => String::new(),
            },
            FieldKind::Float32 => match value {
                None => format!("{:.6}", 0f32),
                Some(Value::Float32(v)) => format!("{v:.6}"),
                Some(_) => String::new(),
            },
            FieldKind::Float64 => match value {
                None => format!("{:.6}", 0f64),
                Some(Value::Float64(v)) => format!("{v:.6}"),
                Some(_) => String::new(),
            },
            FieldKind::String => match value {
                Some(Value::String(v)) => v.clone(),
                _ => String::new(),
            },
            FieldKind::Bytes => match value {
                Some(Value::Bytes(v)) => BASE64.encode(v),
                _ => String::new(),
            },
            FieldKind::Enum => match value {
                None => field
                    .enum_description
                    .as_ref()
                    .map(|descr| descr.display_value(0))
                    .unwrap_or_default(),
                Some(Value::Enum(v)) => v.display(),
                Some(_) => String::new(),
            },
            FieldKind::Message => match value {
                Some(Value::Record(_)) => "<object>".to_string(),
                _ => String::new(),
            },
            FieldKind::List(_) => match value {
                Some(Value::List(items)) if !items.is_empty() => {
                    format!("{} items", items.len())
                }
                _ => String::new(),
            },
            FieldKind::Map(_) => match value {
                Some(Value::Map(entries)) if !entries.is_empty() => {
                    format!("{} items", entries.len())
                }
                _ => String::new(),
            },
        }
    }
}
