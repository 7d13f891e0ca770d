use crate::accessor::AccessorFault;
use crate::accessor::CellAccessor;
use thiserror::Error;

/// A cell read that failed with a genuine fault.
#[derive(Error, Debug)]
#[error("Read cell at row {row}, column {col} failed: {fault}")]
pub struct ProbeError {
    pub row: usize,
    pub col: usize,
    #[source]
    pub fault: AccessorFault,
}

/// Result of reading one cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellOutcome {
    Value(String),
    Empty,
}

impl CellOutcome {
    /// Returns the cell text, empty for [`CellOutcome::Empty`].
    pub fn as_text(&self) -> &str {
        match self {
            Self::Value(value) => value,
            Self::Empty => "",
        }
    }

    /// Converts the outcome into table text.
    pub fn into_text(self) -> String {
        match self {
            Self::Value(value) => value,
            Self::Empty => String::new(),
        }
    }

    /// Returns true if the cell has no text, either as a sentinel or an empty value.
    pub fn is_blank(&self) -> bool {
        self.as_text().is_empty()
    }
}

/// Single cell reads, with sentinel faults turned into [`CellOutcome::Empty`].
pub struct RowProbe;

impl RowProbe {
    /// Reads a cell. Sentinel faults become `Empty`, any other fault is returned as an error.
    /// No retries are made.
    pub fn read<A>(accessor: &mut A, row: usize, col: usize) -> Result<CellOutcome, ProbeError>
    where
        A: CellAccessor + ?Sized,
    {
        match accessor.read_cell(row, col) {
            Ok(value) => Ok(CellOutcome::Value(value)),
            Err(fault) if fault.is_sentinel() => {
                tracing::trace!(row, col, %fault, "tolerated sentinel fault");
                Ok(CellOutcome::Empty)
            }
            Err(fault) => Err(ProbeError { row, col, fault }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::memory::MemoryGrid;
    use crate::accessor::FaultKind;

    #[test]
    fn outcome_text() {
        assert_eq!(CellOutcome::Value("a".to_owned()).as_text(), "a");
        assert_eq!(CellOutcome::Empty.into_text(), "");
        assert!(CellOutcome::Empty.is_blank());
        assert!(CellOutcome::Value(String::new()).is_blank());
        assert!(!CellOutcome::Value("0".to_owned()).is_blank());
    }

    #[test]
    fn probe_value_and_sentinel() {
        let mut grid = MemoryGrid::from_text(&["a", "b"], &[&["1", "2"], &["3", "4"]], 1)
            .with_cell_fault(0, 1, FaultKind::Sentinel);
        assert_eq!(RowProbe::read(&mut grid, 0, 0).unwrap(), CellOutcome::Value("1".to_owned()));
        assert_eq!(RowProbe::read(&mut grid, 0, 1).unwrap(), CellOutcome::Empty);
        // Outside the one-row window
        assert_eq!(RowProbe::read(&mut grid, 1, 0).unwrap(), CellOutcome::Empty);
    }

    #[test]
    fn probe_propagates_other_faults() {
        let mut grid = MemoryGrid::from_text(&["a"], &[&["1"]], 1).with_cell_fault(0, 0, FaultKind::Other);
        let error = RowProbe::read(&mut grid, 0, 0).unwrap_err();
        assert_eq!((error.row, error.col), (0, 0));
        assert_eq!(error.fault.kind(), FaultKind::Other);
    }

    #[test]
    fn probe_is_idempotent() {
        let mut grid = MemoryGrid::from_text(&["a"], &[&["1"], &["2"]], 1);
        assert_eq!(RowProbe::read(&mut grid, 1, 0).unwrap(), CellOutcome::Empty);
        assert_eq!(RowProbe::read(&mut grid, 1, 0).unwrap(), CellOutcome::Empty);
        grid.scroll_to(1).unwrap();
        assert_eq!(RowProbe::read(&mut grid, 1, 0).unwrap(), CellOutcome::Value("2".to_owned()));
    }
}
