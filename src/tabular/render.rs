//! Textual rendering of projected tables.
//!
//! Tables with two or more rows render as a bordered grid with a header
//! row; a single row renders as a borderless two-column field/value
//! listing; empty tables render nothing. Rendering is backed by
//! `comfy-table` with dynamic column sizing.

use comfy_table::{presets, CellAlignment, ContentArrangement, Table as Grid};

use super::{Table, TabularData};

impl TabularData {
    /// Renders every non-empty table, each preceded by its identifier.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for table in &self.tables {
            if table.rows.is_empty() {
                continue;
            }
            if !table.id.is_empty() {
                out.push_str(&table.id);
                out.push_str(":\n\n");
            }
            out.push_str(&table.render());
            out.push('\n');
        }
        out
    }
}

impl Table {
    /// Renders this table to text.
    ///
    /// Zero rows produce an empty string; one row produces a borderless
    /// field/value listing; two or more rows produce a bordered grid with
    /// a header.
    #[must_use]
    pub fn render(&self) -> String {
        match self.rows.len() {
            0 => String::new(),
            1 => self.render_listing(),
            _ => self.render_grid(),
        }
    }

    fn render_grid(&self) -> String {
        let mut grid = Grid::new();
        grid.load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        grid.set_header(
            self.header
                .iter()
                .map(|field| field.display_name().into_owned())
                .collect::<Vec<_>>(),
        );
        for row in &self.rows {
            grid.add_row(row.cells.clone());
        }
        let mut out = grid.to_string();
        out.push('\n');
        out
    }

    fn render_listing(&self) -> String {
        let mut grid = Grid::new();
        grid.load_preset(presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Dynamic);
        for (index, field) in self.header.iter().enumerate() {
            let cell = self.rows[0].cells.get(index).cloned().unwrap_or_default();
            grid.add_row(vec![field.display_name().into_owned(), cell]);
        }
        // First column: no left padding. Second: no right padding.
        if let Some(col) = grid.column_mut(0) {
            col.set_cell_alignment(CellAlignment::Left);
            col.set_padding((0, 1));
        }
        if let Some(col) = grid.column_mut(1) {
            col.set_cell_alignment(CellAlignment::Left);
            col.set_padding((1, 0));
        }
        let mut out = String::new();
        for line in grid.to_string().lines() {
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::access::{Record, Value};
    use crate::metadata::{ElementKind, FieldKind, FieldMeta, MessageDescription};
    use crate::tabular::TabularExtractor;

    fn response_descr() -> MessageDescription {
        MessageDescription::new("AnnotationsResponse", "es.AnnotationsResponse")
            .field(
                FieldMeta::new("Annotations", FieldKind::List(ElementKind::Message)).fields(
                    vec![
                        FieldMeta::new("ID", FieldKind::String),
                        FieldMeta::new("Name", FieldKind::String),
                    ],
                ),
            )
            .field(FieldMeta::new("NextOffset", FieldKind::Uint32))
            .list_sources(["Annotations"])
    }

    fn response(count: usize) -> Record {
        let items: Vec<Value> = (1..=count)
            .map(|i| {
                Value::Record(
                    Record::new()
                        .with("ID", i.to_string())
                        .with("Name", format!("test{i}")),
                )
            })
            .collect();
        Record::new().with("Annotations", items)
    }

    #[test]
    fn test_render_single_row_listing() {
        let record = response(1);
        let data = TabularExtractor::build_tables(&record, &response_descr()).unwrap();
        let out = data.render();

        assert!(out.starts_with("Annotations Response:\n\n"));
        // The one-row table renders borderless field/value pairs.
        assert!(out.contains("Next Offset"));
        assert!(!out.contains('│'));

        // The source table has exactly one row and lists it the same way.
        assert!(out.contains("Annotations:\n\n"));
        assert!(out.contains("test1"));
    }

    #[test]
    fn test_render_grid_with_header() {
        let record = response(3);
        let data = TabularExtractor::build_tables(&record, &response_descr()).unwrap();
        let out = data.render();

        // Three rows render as a bordered grid with a header line.
        assert!(out.contains("ID"));
        assert!(out.contains("Name"));
        assert!(out.contains("test2"));
        let borders = out
            .lines()
            .filter(|l| l.starts_with('┌') || l.starts_with('└'))
            .count();
        assert_eq!(borders, 2);
    }

    #[test]
    fn test_render_empty_table_renders_nothing() {
        let record = Record::new();
        let data = TabularExtractor::build_tables(&record, &response_descr()).unwrap();
        let out = data.render();
        // The record's own table has one (default) row; the empty source
        // table is omitted entirely, heading included.
        assert!(out.contains("Annotations Response:"));
        assert!(!out.contains("Annotations:\n\n"));
    }
}
