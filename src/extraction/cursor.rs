use crate::accessor::AccessorFault;
use crate::accessor::CellAccessor;
use crate::accessor::RowExtent;
use thiserror::Error;

/// Errors related to window placement.
#[derive(Error, Debug)]
pub enum WindowError {
    #[error("Invalid page size {0}")]
    PageSizeError(usize),

    #[error("Invalid row extent {minimum}..={maximum}")]
    ExtentError { minimum: usize, maximum: usize },

    #[error("Discover row extent failed: {0}")]
    DiscoverFailed(#[source] AccessorFault),

    #[error("Scroll to row {position} failed: {fault}")]
    ScrollFailed {
        position: usize,
        #[source]
        fault: AccessorFault,
    },
}

/// Local belief of where the remote window is placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WindowState {
    /// First row of the materialized window
    pub position: usize,
    /// Starting placement of the window
    pub minimum: usize,
    /// Last logical row (inclusive), as discovered from the accessor
    pub maximum: usize,
    /// Rows advanced by one scroll step
    pub page_size: usize,
}

/// Tracks and moves the remote window.
///
/// `advance` and `reset` are the only mutators of the window position. Both update the
/// local state only after the remote scroll has succeeded, so a failed scroll never
/// leaves the local belief ahead of the remote window.
#[derive(Debug)]
pub struct WindowCursor {
    state: WindowState,
    advances: usize,
}

impl WindowCursor {
    /// Creates a cursor at the starting placement of the given extent.
    ///
    /// Page boundaries are counted from logical row 0, so the window must start there.
    pub fn new(extent: RowExtent) -> Result<Self, WindowError> {
        if extent.page_size == 0 {
            Err(WindowError::PageSizeError(extent.page_size))?
        }
        if extent.minimum != 0 {
            Err(WindowError::ExtentError { minimum: extent.minimum, maximum: extent.maximum })?
        }
        Ok(Self {
            state: WindowState {
                position: extent.minimum,
                minimum: extent.minimum,
                maximum: extent.maximum,
                page_size: extent.page_size,
            },
            advances: 0,
        })
    }

    /// Discovers the row extent from the accessor and creates a cursor for it.
    /// Returns `None` if the grid has no rows.
    pub fn discover<A>(accessor: &mut A) -> Result<Option<Self>, WindowError>
    where
        A: CellAccessor + ?Sized,
    {
        let Some(extent) = accessor.row_extent().map_err(WindowError::DiscoverFailed)? else {
            tracing::debug!("discovered no rows");
            return Ok(None);
        };
        tracing::debug!(
            minimum = extent.minimum,
            maximum = extent.maximum,
            page_size = extent.page_size,
            "discovered row extent"
        );
        Self::new(extent).map(Some)
    }

    /// Returns a snapshot of the window state.
    pub fn state(&self) -> WindowState {
        self.state
    }

    /// Returns the number of successful advances since creation.
    pub fn advances(&self) -> usize {
        self.advances
    }

    /// Checks if reading `row` requires advancing the window first.
    ///
    /// The window moves exactly once per page of rows consumed: on every non-zero page
    /// boundary, as long as the window has not reached the last row.
    pub fn needs_advance(&self, row: usize) -> bool {
        self.state.position < self.state.maximum && row != 0 && row % self.state.page_size == 0
    }

    /// Moves the window forward by `pages` pages.
    ///
    /// Does not check the new position against the maximum; guard calls with
    /// [`WindowCursor::needs_advance`].
    pub fn advance<A>(&mut self, accessor: &mut A, pages: usize) -> Result<(), WindowError>
    where
        A: CellAccessor + ?Sized,
    {
        if pages == 0 {
            return Ok(());
        }
        let position = self.state.position.saturating_add(self.state.page_size.saturating_mul(pages));
        accessor
            .scroll_to(position)
            .map_err(|fault| WindowError::ScrollFailed { position, fault })?;
        tracing::debug!(from = self.state.position, to = position, "advanced window");
        self.state.position = position;
        self.advances += 1;
        Ok(())
    }

    /// Moves the window back to its starting placement.
    pub fn reset<A>(&mut self, accessor: &mut A) -> Result<(), WindowError>
    where
        A: CellAccessor + ?Sized,
    {
        let position = self.state.minimum;
        accessor
            .scroll_to(position)
            .map_err(|fault| WindowError::ScrollFailed { position, fault })?;
        tracing::debug!(from = self.state.position, to = position, "reset window");
        self.state.position = position;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::memory::MemoryGrid;

    fn extent(maximum: usize, page_size: usize) -> RowExtent {
        RowExtent { minimum: 0, maximum, page_size }
    }

    #[test]
    fn cursor_initial() {
        let cursor = WindowCursor::new(extent(4, 2)).unwrap();
        assert_eq!(cursor.state(), WindowState { position: 0, minimum: 0, maximum: 4, page_size: 2 });
        assert_eq!(cursor.advances(), 0);
    }

    #[test]
    fn cursor_rejects_invalid_extent() {
        assert!(matches!(WindowCursor::new(extent(4, 0)), Err(WindowError::PageSizeError(0))));
        assert!(matches!(
            WindowCursor::new(RowExtent { minimum: 5, maximum: 4, page_size: 1 }),
            Err(WindowError::ExtentError { minimum: 5, maximum: 4 })
        ));
        assert!(matches!(
            WindowCursor::new(RowExtent { minimum: 5, maximum: 10, page_size: 3 }),
            Err(WindowError::ExtentError { minimum: 5, maximum: 10 })
        ));
    }

    #[test]
    fn needs_advance_on_page_boundaries() {
        let cursor = WindowCursor::new(extent(10, 3)).unwrap();
        let boundaries: Vec<usize> = (0..=10).filter(|row| cursor.needs_advance(*row)).collect();
        assert_eq!(boundaries, vec![3, 6, 9]);
    }

    #[test]
    fn needs_advance_stops_at_maximum() {
        let mut grid = MemoryGrid::from_text(&["a"], &[&["0"], &["1"], &["2"]], 2);
        let mut cursor = WindowCursor::discover(&mut grid).unwrap().unwrap();
        assert!(cursor.needs_advance(2));
        cursor.advance(&mut grid, 1).unwrap();
        assert_eq!(cursor.state().position, 2);
        assert!(!cursor.needs_advance(4));
    }

    #[test]
    fn advance_and_reset() {
        let mut grid = MemoryGrid::from_text(&["a"], &[&["0"], &["1"], &["2"], &["3"], &["4"]], 2);
        let mut cursor = WindowCursor::discover(&mut grid).unwrap().unwrap();
        cursor.advance(&mut grid, 1).unwrap();
        cursor.advance(&mut grid, 1).unwrap();
        assert_eq!(cursor.state().position, 4);
        assert_eq!(cursor.advances(), 2);

        cursor.reset(&mut grid).unwrap();
        assert_eq!(cursor.state().position, 0);
        assert_eq!(grid.scrolls(), &[2, 4, 0]);
        assert_eq!(grid.position(), 0);
    }

    #[test]
    fn discover_empty_grid() {
        let mut grid = MemoryGrid::from_text(&["a"], &[], 2);
        assert!(WindowCursor::discover(&mut grid).unwrap().is_none());
    }

    #[test]
    fn advance_multiple_pages() {
        let mut grid = MemoryGrid::from_text(&["a"], &[&["0"]], 3);
        let mut cursor = WindowCursor::new(extent(20, 3)).unwrap();
        cursor.advance(&mut grid, 2).unwrap();
        assert_eq!(cursor.state().position, 6);
        cursor.advance(&mut grid, 0).unwrap();
        assert_eq!(grid.scrolls(), &[6]);
    }

    #[test]
    fn failed_scroll_keeps_position() {
        let mut grid = MemoryGrid::from_text(&["a"], &[&["0"], &["1"], &["2"]], 2).with_scroll_fault(2);
        let mut cursor = WindowCursor::discover(&mut grid).unwrap().unwrap();
        let error = cursor.advance(&mut grid, 1).unwrap_err();
        assert!(matches!(error, WindowError::ScrollFailed { position: 2, .. }));
        assert_eq!(cursor.state().position, 0);
        assert_eq!(cursor.advances(), 0);
    }
}
