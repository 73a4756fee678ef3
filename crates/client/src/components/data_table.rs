//! Data table component types.
//!
//! A [`DataTable`] is rebuilt from scratch on every render: it owns its
//! cells, so laying it out twice yields the same text.

/// Column definition for a data table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: &'static str,
    /// Display label for the column header.
    pub label: &'static str,
}

impl TableColumn {
    /// Create a new column.
    #[must_use]
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Option for a select control (filter or form selector).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// Option value. Empty for the "no filter" option.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Whether this option is the current selection.
    pub selected: bool,
}

impl FilterOption {
    /// Create a new unselected option.
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            selected: false,
        }
    }

    /// Mark this option as selected.
    #[must_use]
    pub const fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

/// Rows of text cells under a fixed set of columns.
#[derive(Debug, Clone)]
pub struct DataTable {
    columns: &'static [TableColumn],
    rows: Vec<Vec<String>>,
}

/// A laid-out table, ready for a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub header: String,
    /// Dashes under the header, one run per column.
    pub rule: String,
    pub rows: Vec<String>,
}

const COLUMN_GAP: &str = "  ";

impl DataTable {
    /// Create an empty table.
    #[must_use]
    pub const fn new(columns: &'static [TableColumn]) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. Missing cells render blank, extra cells are dropped.
    pub fn push_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    /// Column definitions.
    #[must_use]
    pub const fn columns(&self) -> &'static [TableColumn] {
        self.columns
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Lay out header, rule and rows with columns padded to a common width.
    #[must_use]
    pub fn layout(&self) -> TableView {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .fold(column.label.chars().count(), usize::max)
            })
            .collect();

        let header = join_padded(self.columns.iter().map(|c| c.label), &widths);
        let rule = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let cells = (0..widths.len()).map(|i| row.get(i).map_or("", String::as_str));
                join_padded(cells, &widths)
            })
            .collect();

        TableView { header, rule, rows }
    }
}

fn join_padded<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[TableColumn] = &[TableColumn::new("id", "ID"), TableColumn::new("name", "Name")];

    #[test]
    fn test_layout_pads_to_widest_cell() {
        let mut table = DataTable::new(COLUMNS);
        table.push_row(vec!["1".to_string(), "Ada Lovelace".to_string()]);
        table.push_row(vec!["1024".to_string(), "Bob".to_string()]);

        let view = table.layout();
        assert_eq!(view.header, "ID    Name");
        assert_eq!(view.rule, "----  ------------");
        assert_eq!(view.rows, vec!["1     Ada Lovelace", "1024  Bob"]);
    }

    #[test]
    fn test_layout_fills_missing_cells() {
        let mut table = DataTable::new(COLUMNS);
        table.push_row(vec!["7".to_string()]);
        assert_eq!(table.layout().rows, vec!["7"]);
    }

    #[test]
    fn test_empty_table_keeps_header() {
        let table = DataTable::new(COLUMNS);
        assert!(table.is_empty());
        assert_eq!(table.layout().header, "ID  Name");
    }
}
