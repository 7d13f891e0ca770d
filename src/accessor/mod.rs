//! # Cell Accessor Boundary
//!
//! The capability every automation surface adapter provides to the extraction engine:
//! column discovery, the initial row extent, cell reads and window scrolling. Adapters
//! classify their own faults, so the engine matches on a [`FaultKind`] instead of
//! comparing fault messages.
use std::fmt::Debug;
use std::fmt::Display;
use thiserror::Error;

pub(crate) mod memory;

use crate::accessor::memory::MemoryGrid;

/// Classification of a fault raised by a cell accessor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FaultKind {
    /// The cell is unpopulated or outside the materialized window.
    Sentinel,
    /// Any genuine failure of the remote side.
    Other,
}

/// A fault raised by a cell accessor, tagged with its kind.
#[derive(Error, Debug)]
#[error("{kind:?} fault: {inner}")]
pub struct AccessorFault {
    kind: FaultKind,
    inner: anyhow::Error,
}

impl AccessorFault {
    /// Creates a sentinel fault, meaning "no value here".
    pub fn sentinel<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self { kind: FaultKind::Sentinel, inner: anyhow::Error::msg(message) }
    }

    /// Creates a genuine fault from a message.
    pub fn other<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self { kind: FaultKind::Other, inner: anyhow::Error::msg(message) }
    }

    /// Wraps an adapter's native error with an explicit classification.
    pub fn from_error<E>(kind: FaultKind, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self { kind, inner: anyhow::Error::new(error) }
    }

    /// Returns the fault classification.
    pub fn kind(&self) -> FaultKind {
        self.kind
    }

    /// Returns true for the tolerated "no value here" class.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.kind == FaultKind::Sentinel
    }

    /// Returns the underlying adapter error.
    pub fn inner(&self) -> &anyhow::Error {
        &self.inner
    }
}

/// Initial window placement reported by the remote grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RowExtent {
    /// First logical row index (0-based, inclusive)
    pub minimum: usize,
    /// Last logical row index (0-based, inclusive)
    pub maximum: usize,
    /// Number of rows the window advances by in one scroll step
    pub page_size: usize,
}

/// Cell-level access to a remote, virtualized tabular resource.
///
/// Every call is a blocking round trip to a single, stateful remote object, so all
/// methods take `&mut self`: an adapter can only be driven by one traversal at a time.
pub trait CellAccessor {
    /// Returns the number of columns.
    fn column_count(&mut self) -> Result<usize, AccessorFault>;

    /// Returns the declared title of a column.
    fn column_title(&mut self, col: usize) -> Result<String, AccessorFault>;

    /// Returns the row extent and page size of the window at its starting placement,
    /// or `None` if the grid has no rows.
    fn row_extent(&mut self) -> Result<Option<RowExtent>, AccessorFault>;

    /// Reads the text of a cell addressed by logical row and column.
    fn read_cell(&mut self, row: usize, col: usize) -> Result<String, AccessorFault>;

    /// Scrolls the remote window so that it starts at `position`.
    fn scroll_to(&mut self, position: usize) -> Result<(), AccessorFault>;
}

impl<A: CellAccessor + ?Sized> CellAccessor for Box<A> {
    fn column_count(&mut self) -> Result<usize, AccessorFault> {
        (**self).column_count()
    }

    fn column_title(&mut self, col: usize) -> Result<String, AccessorFault> {
        (**self).column_title(col)
    }

    fn row_extent(&mut self) -> Result<Option<RowExtent>, AccessorFault> {
        (**self).row_extent()
    }

    fn read_cell(&mut self, row: usize, col: usize) -> Result<String, AccessorFault> {
        (**self).read_cell(row, col)
    }

    fn scroll_to(&mut self, position: usize) -> Result<(), AccessorFault> {
        (**self).scroll_to(position)
    }
}

/// Automation surface adapters, selected at construction time.
pub enum Surface {
    /// In-memory virtualized grid
    Memory(MemoryGrid),
    /// Externally implemented adapter (desktop UI tree, browser DOM, ...)
    Adapter(Box<dyn CellAccessor + Send>),
}

impl Surface {
    /// Short label of the surface kind.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Adapter(_) => "adapter",
        }
    }
}

impl CellAccessor for Surface {
    fn column_count(&mut self) -> Result<usize, AccessorFault> {
        match self {
            Self::Memory(grid) => grid.column_count(),
            Self::Adapter(adapter) => adapter.column_count(),
        }
    }

    fn column_title(&mut self, col: usize) -> Result<String, AccessorFault> {
        match self {
            Self::Memory(grid) => grid.column_title(col),
            Self::Adapter(adapter) => adapter.column_title(col),
        }
    }

    fn row_extent(&mut self) -> Result<Option<RowExtent>, AccessorFault> {
        match self {
            Self::Memory(grid) => grid.row_extent(),
            Self::Adapter(adapter) => adapter.row_extent(),
        }
    }

    fn read_cell(&mut self, row: usize, col: usize) -> Result<String, AccessorFault> {
        match self {
            Self::Memory(grid) => grid.read_cell(row, col),
            Self::Adapter(adapter) => adapter.read_cell(row, col),
        }
    }

    fn scroll_to(&mut self, position: usize) -> Result<(), AccessorFault> {
        match self {
            Self::Memory(grid) => grid.scroll_to(position),
            Self::Adapter(adapter) => adapter.scroll_to(position),
        }
    }
}

impl From<MemoryGrid> for Surface {
    fn from(grid: MemoryGrid) -> Self {
        Self::Memory(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_kind() {
        assert!(AccessorFault::sentinel("empty").is_sentinel());
        assert!(!AccessorFault::other("boom").is_sentinel());
        assert_eq!(AccessorFault::other("boom").kind(), FaultKind::Other);
        assert_eq!(AccessorFault::other("boom").to_string(), "Other fault: boom");
    }

    #[test]
    fn fault_from_native_error() {
        let error = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let fault = AccessorFault::from_error(FaultKind::Other, error);
        assert_eq!(fault.kind(), FaultKind::Other);
        assert!(fault.inner().downcast_ref::<std::io::Error>().is_some());
    }

    #[test]
    fn surface_dispatch() {
        let grid = MemoryGrid::from_text(&["a", "b"], &[&["1", "2"]], 1);
        let mut memory = Surface::from(grid);
        assert_eq!(memory.label(), "memory");
        assert_eq!(memory.column_count().unwrap(), 2);
        assert_eq!(memory.column_title(1).unwrap(), "b");
        assert_eq!(memory.read_cell(0, 1).unwrap(), "2");

        let grid = MemoryGrid::from_text(&["a"], &[&["x"], &["y"]], 1);
        let mut adapter = Surface::Adapter(Box::new(grid));
        assert_eq!(adapter.label(), "adapter");
        assert_eq!(adapter.row_extent().unwrap(), Some(RowExtent { minimum: 0, maximum: 1, page_size: 1 }));
        adapter.scroll_to(1).unwrap();
        assert_eq!(adapter.read_cell(1, 0).unwrap(), "y");
    }
}
