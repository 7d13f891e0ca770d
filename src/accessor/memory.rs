//! In-memory virtualized grid.
//!
//! Behaves like a remote grid control: only rows inside the current window answer
//! reads, everything else raises a sentinel fault, and scrolling moves the window.

use crate::accessor::AccessorFault;
use crate::accessor::CellAccessor;
use crate::accessor::FaultKind;
use crate::accessor::RowExtent;
use std::collections::HashMap;
use std::collections::HashSet;

/// A grid held in memory that only materializes a window of rows.
#[derive(Clone, Debug)]
pub struct MemoryGrid {
    /// Column titles
    titles: Vec<String>,
    /// Row data, `None` for unpopulated cells
    rows: Vec<Vec<Option<String>>>,
    /// Rows advanced by one scroll step
    page_size: usize,
    /// Rows materialized from the current position
    visible_rows: usize,
    /// Maximum row reported by `row_extent`, when different from the data
    reported_maximum: Option<usize>,
    /// First row of the current window
    position: usize,
    /// Faults raised instead of a cell value
    cell_faults: HashMap<(usize, usize), FaultKind>,
    /// Window positions whose scroll fails
    scroll_faults: HashSet<usize>,
    /// Successful scroll positions, in call order
    scrolls: Vec<usize>,
    /// Cell reads, in call order
    reads: Vec<(usize, usize)>,
}

impl MemoryGrid {
    /// Creates a grid from column titles and rows of optional cell text.
    pub fn new(titles: Vec<String>, rows: Vec<Vec<Option<String>>>, page_size: usize) -> Self {
        Self {
            titles,
            rows,
            page_size,
            visible_rows: page_size.max(1),
            reported_maximum: None,
            position: 0,
            cell_faults: HashMap::new(),
            scroll_faults: HashSet::new(),
            scrolls: Vec::new(),
            reads: Vec::new(),
        }
    }

    /// Creates a fully populated grid from string slices.
    pub fn from_text(titles: &[&str], rows: &[&[&str]], page_size: usize) -> Self {
        Self::new(
            titles.iter().map(|title| title.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|value| Some(value.to_string())).collect())
                .collect(),
            page_size,
        )
    }

    /// Sets how many rows the window materializes from its position.
    pub fn with_visible_rows(mut self, visible_rows: usize) -> Self {
        self.visible_rows = visible_rows;
        self
    }

    /// Overrides the maximum row index reported by `row_extent`.
    pub fn with_reported_maximum(mut self, maximum: usize) -> Self {
        self.reported_maximum = Some(maximum);
        self
    }

    /// Makes reads of a cell fail with the given fault kind.
    pub fn with_cell_fault(mut self, row: usize, col: usize, kind: FaultKind) -> Self {
        self.cell_faults.insert((row, col), kind);
        self
    }

    /// Makes scrolling to a position fail.
    pub fn with_scroll_fault(mut self, position: usize) -> Self {
        self.scroll_faults.insert(position);
        self
    }

    /// Returns the first row of the current window.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns every successful scroll position, in call order.
    pub fn scrolls(&self) -> &[usize] {
        &self.scrolls
    }

    /// Returns every cell read attempt, in call order.
    pub fn reads(&self) -> &[(usize, usize)] {
        &self.reads
    }

    /// Returns true if any cell of the row was read.
    pub fn was_row_read(&self, row: usize) -> bool {
        self.reads.iter().any(|(read_row, _)| *read_row == row)
    }

    /// Checks if a row is inside the materialized window.
    fn is_materialized(&self, row: usize) -> bool {
        self.position <= row && row < self.position + self.visible_rows
    }
}

impl CellAccessor for MemoryGrid {
    fn column_count(&mut self) -> Result<usize, AccessorFault> {
        Ok(self.titles.len())
    }

    fn column_title(&mut self, col: usize) -> Result<String, AccessorFault> {
        self.titles
            .get(col)
            .cloned()
            .ok_or_else(|| AccessorFault::other(format!("column {col} does not exist")))
    }

    fn row_extent(&mut self) -> Result<Option<RowExtent>, AccessorFault> {
        let maximum = self.reported_maximum.or(self.rows.len().checked_sub(1));
        Ok(maximum.map(|maximum| RowExtent { minimum: 0, maximum, page_size: self.page_size }))
    }

    fn read_cell(&mut self, row: usize, col: usize) -> Result<String, AccessorFault> {
        self.reads.push((row, col));
        match self.cell_faults.get(&(row, col)) {
            Some(FaultKind::Sentinel) => Err(AccessorFault::sentinel(format!("cell ({row}, {col}) has no value")))?,
            Some(FaultKind::Other) => Err(AccessorFault::other(format!("cell ({row}, {col}) cannot be read")))?,
            None => (),
        }
        if col >= self.titles.len() {
            Err(AccessorFault::other(format!("column {col} does not exist")))?
        }
        if !self.is_materialized(row) {
            Err(AccessorFault::sentinel(format!("row {row} is outside the materialized window")))?
        }
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .and_then(|cell| cell.clone())
            .ok_or_else(|| AccessorFault::sentinel(format!("cell ({row}, {col}) has no value")))
    }

    fn scroll_to(&mut self, position: usize) -> Result<(), AccessorFault> {
        if self.scroll_faults.contains(&position) {
            Err(AccessorFault::other(format!("scroll to row {position} failed")))?
        }
        self.position = position;
        self.scrolls.push(position);
        Ok(())
    }
}
