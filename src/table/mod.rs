//! # Extracted Tables
//!
//! The table artifact produced by a traversal, and the builder that fills it row by
//! row. Every committed row holds exactly one text value per column; empty cells are
//! stored as empty strings.
use crate::extraction::probe::CellOutcome;
use crate::table::column::Column;
use crate::table::column::ColumnType;
use thiserror::Error;

pub(crate) mod column;

/// Errors related to building tables.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Column {col} is out of range for {count} columns")]
    ColumnOutOfRange { col: usize, count: usize },

    #[error("Row {row} has {actual} values for {expected} columns")]
    ArityError { row: usize, expected: usize, actual: usize },
}

/// One committed row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Logical row index in the remote grid
    pub index: usize,
    /// Cell text aligned to the table columns
    pub values: Vec<String>,
}

/// A table extracted from a remote grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    /// Column definitions in grid order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Committed rows in traversal order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the number of committed rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no row was committed.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Gets the text at a committed row and column.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|row| row.values.get(col))
            .map(String::as_str)
    }

    /// Finds a column by name (case-insensitive).
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.name.eq_ignore_ascii_case(name))
    }

    /// Infers a value type per column from the committed text.
    pub fn analyze(&self) -> Vec<(String, ColumnType)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(col, column)| {
                let types = self
                    .rows
                    .iter()
                    .map(|row| ColumnType::infer(&row.values[col]))
                    .collect();
                (column.name.to_owned(), ColumnType::detect(types))
            })
            .collect()
    }
}

/// A row being filled, not yet part of the table.
#[derive(Debug)]
pub struct RowHandle {
    index: usize,
    cells: Vec<Option<String>>,
}

impl RowHandle {
    /// Returns true if every cell written so far is blank.
    pub fn is_blank(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.as_deref().map(str::is_empty).unwrap_or(true))
    }
}

/// Accumulates columns and rows into a [`Table`] during one traversal.
#[derive(Debug, Default)]
pub struct TableBuilder {
    table: Table,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text column.
    pub fn add_column(&mut self, name: &str) {
        self.table.columns.push(Column::text(name));
    }

    /// Returns the number of columns defined so far.
    pub fn column_count(&self) -> usize {
        self.table.columns.len()
    }

    /// Opens a row sized to the current columns.
    pub fn new_row(&self, index: usize) -> RowHandle {
        RowHandle { index, cells: vec![None; self.table.columns.len()] }
    }

    /// Writes a cell outcome, storing `Empty` as an empty string.
    pub fn set_cell(&self, handle: &mut RowHandle, col: usize, outcome: CellOutcome) -> Result<(), TableError> {
        let count = handle.cells.len();
        let cell = handle
            .cells
            .get_mut(col)
            .ok_or(TableError::ColumnOutOfRange { col, count })?;
        *cell = Some(outcome.into_text());
        Ok(())
    }

    /// Appends the row to the table and returns its position in the table.
    /// Fails if any cell is unset or the columns changed since the row was opened.
    pub fn commit(&mut self, handle: RowHandle) -> Result<usize, TableError> {
        let expected = self.table.columns.len();
        let values: Vec<String> = handle.cells.into_iter().flatten().collect();
        if values.len() != expected {
            Err(TableError::ArityError { row: handle.index, expected, actual: values.len() })?
        }
        self.table.rows.push(Row { index: handle.index, values });
        Ok(self.table.rows.len() - 1)
    }

    /// Finishes the table.
    pub fn build(self) -> Table {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(text: &str) -> CellOutcome {
        CellOutcome::Value(text.to_owned())
    }

    fn builder() -> TableBuilder {
        let mut builder = TableBuilder::new();
        builder.add_column("id");
        builder.add_column("name");
        builder
    }

    #[test]
    fn builder_commits_in_order() {
        let mut builder = builder();
        for (index, name) in [(4, "d"), (1, "a")] {
            let mut row = builder.new_row(index);
            builder.set_cell(&mut row, 0, value(&index.to_string())).unwrap();
            builder.set_cell(&mut row, 1, value(name)).unwrap();
            builder.commit(row).unwrap();
        }
        let table = builder.build();

        assert_eq!(table.columns(), &[Column::text("id"), Column::text("name")]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].index, 4);
        assert_eq!(table.get(1, 1), Some("a"));
        assert_eq!(table.get(2, 0), None);
        assert_eq!(table.column_index("NAME"), Some(1));
    }

    #[test]
    fn empty_outcome_is_empty_text() {
        let mut builder = builder();
        let mut row = builder.new_row(0);
        builder.set_cell(&mut row, 0, CellOutcome::Empty).unwrap();
        builder.set_cell(&mut row, 1, value("")).unwrap();
        assert!(row.is_blank());
        assert_eq!(builder.commit(row).unwrap(), 0);
        assert_eq!(builder.build().rows()[0].values, vec!["".to_owned(), "".to_owned()]);
    }

    #[test]
    fn commit_rejects_incomplete_row() {
        let mut builder = builder();
        let mut row = builder.new_row(3);
        builder.set_cell(&mut row, 0, value("x")).unwrap();
        assert!(!row.is_blank());
        assert!(matches!(
            builder.commit(row),
            Err(TableError::ArityError { row: 3, expected: 2, actual: 1 })
        ));
        assert!(builder.build().is_empty());
    }

    #[test]
    fn set_cell_out_of_range() {
        let builder = builder();
        let mut row = builder.new_row(0);
        assert!(matches!(
            builder.set_cell(&mut row, 2, value("x")),
            Err(TableError::ColumnOutOfRange { col: 2, count: 2 })
        ));
    }

    #[test]
    fn analyze_columns() {
        let mut builder = builder();
        for (id, name) in [("1", "x"), ("", "y"), ("3", "z")] {
            let mut row = builder.new_row(0);
            builder.set_cell(&mut row, 0, value(id)).unwrap();
            builder.set_cell(&mut row, 1, value(name)).unwrap();
            builder.commit(row).unwrap();
        }
        let table = builder.build();
        assert_eq!(
            table.analyze(),
            vec![("id".to_owned(), ColumnType::BigInt), ("name".to_owned(), ColumnType::Varchar)]
        );
    }
}
