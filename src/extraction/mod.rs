//! # Extraction Engine
//!
//! Walks a remote grid from the first to the last logical row, advancing the window
//! once per page, reading each cell through the [`RowProbe`] and letting the selection
//! policy decide what goes into the table and when to stop.
//!
//! A traversal moves through `Initializing → Scanning → {Stopped | Completed} → Reset → Done`.
//! Column or extent discovery failures abort `Initializing`; genuine cell faults and scroll
//! faults abort `Scanning`. An aborted traversal does not reset the window.
use crate::accessor::AccessorFault;
use crate::accessor::CellAccessor;
use crate::error::RustyGridError;
use crate::extraction::cursor::WindowCursor;
use crate::extraction::policy::SelectionPolicy;
use crate::extraction::policy::SelectionState;
use crate::extraction::probe::CellOutcome;
use crate::extraction::probe::RowProbe;
use crate::table::Row;
use crate::table::Table;
use crate::table::TableBuilder;
use serde::Deserialize;
use thiserror::Error;

pub(crate) mod cursor;
pub(crate) mod policy;
pub(crate) mod probe;

/// Errors raised while discovering the grid layout.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Discover columns failed: {0}")]
    ColumnDiscoveryError(#[source] AccessorFault),
}

/// Options applied on top of the selection policy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Do not commit rows whose cells are all blank, unless the policy selects them.
    pub skip_empty_rows: bool,
    /// Stop the traversal at the first row whose cells are all blank.
    pub end_at_empty_row: bool,
}

/// Why a traversal ended before the last row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The pattern policy used up its match budget.
    BudgetExhausted,
    /// The explicit row policy selected its last target.
    TargetsExhausted,
    /// A blank row was reached with `end_at_empty_row` set.
    EmptyRow,
}

/// Counters collected during one traversal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Logical rows visited, probed or not
    pub rows_scanned: usize,
    /// Rows added to the table
    pub rows_committed: usize,
    /// Window advances performed
    pub advances: usize,
    /// Cells that came back as sentinel faults
    pub empty_cells: usize,
}

/// The artifact returned by a traversal.
#[derive(Clone, Debug)]
pub struct ExtractionResult {
    pub table: Table,
    /// Positions in `table.rows()` of the selected rows
    pub selected_rows: Vec<usize>,
    pub stopped_early: bool,
    pub stop_reason: Option<StopReason>,
    pub stats: ExtractionStats,
}

impl ExtractionResult {
    /// Iterates over the selected rows.
    pub fn selected(&self) -> impl Iterator<Item = &Row> {
        self.selected_rows
            .iter()
            .filter_map(|position| self.table.rows().get(*position))
    }
}

#[derive(Copy, Clone, Debug)]
enum Phase {
    Initializing,
    Scanning,
    Stopped,
    Completed,
    Reset,
    Done,
}

/// Outcome of the scanning phase.
struct Scan {
    builder: TableBuilder,
    selected_rows: Vec<usize>,
    stop_reason: Option<StopReason>,
    rows_scanned: usize,
    rows_committed: usize,
    empty_cells: usize,
}

/// Runs one traversal over an exclusively borrowed accessor.
pub struct Extractor<'a, A: CellAccessor + ?Sized> {
    accessor: &'a mut A,
    options: ExtractOptions,
}

impl<'a, A> Extractor<'a, A>
where
    A: CellAccessor + ?Sized,
{
    /// Creates an extractor with default options.
    pub fn new(accessor: &'a mut A) -> Self {
        Self { accessor, options: ExtractOptions::default() }
    }

    /// Replaces the extraction options.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Extracts a table according to the selection policy.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Column or row extent discovery fails
    /// - The policy is invalid for the discovered extent
    /// - A cell read fails with a non-sentinel fault
    /// - Scrolling the window fails
    pub fn extract(self, policy: &SelectionPolicy) -> Result<ExtractionResult, RustyGridError> {
        let Self { accessor, options } = self;

        tracing::debug!(phase = ?Phase::Initializing, policy = policy.name());
        let builder = discover_columns(accessor)?;
        let cursor = WindowCursor::discover(accessor)?;
        let mut selection = SelectionState::new(policy, cursor.as_ref().map(|cursor| cursor.state().maximum))?;
        let Some(mut cursor) = cursor else {
            // The window never moved, nothing to reset
            tracing::info!(rows_scanned = 0, "extraction finished on a grid without rows");
            tracing::debug!(phase = ?Phase::Done);
            return Ok(ExtractionResult {
                table: builder.build(),
                selected_rows: Vec::new(),
                stopped_early: false,
                stop_reason: None,
                stats: ExtractionStats::default(),
            });
        };

        tracing::debug!(phase = ?Phase::Scanning, maximum = cursor.state().maximum);
        let scan = match scan(accessor, &options, &mut cursor, &mut selection, builder) {
            Ok(scan) => scan,
            Err(error) => {
                tracing::warn!(position = cursor.state().position, %error, "extraction aborted");
                return Err(error);
            }
        };
        let phase = if scan.stop_reason.is_some() { Phase::Stopped } else { Phase::Completed };
        tracing::debug!(phase = ?phase, reason = ?scan.stop_reason);

        tracing::debug!(phase = ?Phase::Reset);
        cursor.reset(accessor)?;

        let stats = ExtractionStats {
            rows_scanned: scan.rows_scanned,
            rows_committed: scan.rows_committed,
            advances: cursor.advances(),
            empty_cells: scan.empty_cells,
        };
        tracing::info!(
            rows_scanned = stats.rows_scanned,
            rows_committed = stats.rows_committed,
            advances = stats.advances,
            empty_cells = stats.empty_cells,
            "extraction finished"
        );
        tracing::debug!(phase = ?Phase::Done);
        Ok(ExtractionResult {
            table: scan.builder.build(),
            selected_rows: scan.selected_rows,
            stopped_early: scan.stop_reason.is_some(),
            stop_reason: scan.stop_reason,
            stats,
        })
    }
}

/// Extracts a table from the accessor with default options.
pub fn extract<A>(accessor: &mut A, policy: &SelectionPolicy) -> Result<ExtractionResult, RustyGridError>
where
    A: CellAccessor + ?Sized,
{
    Extractor::new(accessor).extract(policy)
}

/// Reads column titles into a fresh table builder.
fn discover_columns<A>(accessor: &mut A) -> Result<TableBuilder, ExtractError>
where
    A: CellAccessor + ?Sized,
{
    let count = accessor.column_count().map_err(ExtractError::ColumnDiscoveryError)?;
    let mut builder = TableBuilder::new();
    for col in 0..count {
        let title = accessor.column_title(col).map_err(ExtractError::ColumnDiscoveryError)?;
        builder.add_column(&title);
    }
    tracing::debug!(columns = count, "discovered columns");
    Ok(builder)
}

/// Visits every logical row up to the maximum, or until the policy or options stop.
fn scan<A>(
    accessor: &mut A,
    options: &ExtractOptions,
    cursor: &mut WindowCursor,
    selection: &mut SelectionState,
    mut builder: TableBuilder,
) -> Result<Scan, RustyGridError>
where
    A: CellAccessor + ?Sized,
{
    let maximum = cursor.state().maximum;
    let column_count = builder.column_count();
    let mut selected_rows = Vec::new();
    let mut stop_reason = None;
    let mut rows_scanned = 0;
    let mut rows_committed = 0;
    let mut empty_cells = 0;

    for row in 0..=maximum {
        if cursor.needs_advance(row) {
            cursor.advance(accessor, 1)?;
        }
        rows_scanned += 1;
        if !selection.wants_row(row) {
            continue;
        }

        let mut handle = builder.new_row(row);
        let mut matched = false;
        for col in 0..column_count {
            let outcome = RowProbe::read(accessor, row, col)?;
            if outcome == CellOutcome::Empty {
                empty_cells += 1;
            }
            // The first matching cell is enough
            if !matched {
                matched = selection.matches(&outcome);
            }
            builder.set_cell(&mut handle, col, outcome)?;
        }

        let is_blank = handle.is_blank();
        if is_blank && options.end_at_empty_row {
            stop_reason = Some(StopReason::EmptyRow);
            break;
        }

        let verdict = selection.conclude(row, matched);
        if verdict.is_select() || (verdict.is_commit() && !(is_blank && options.skip_empty_rows)) {
            let position = builder.commit(handle)?;
            rows_committed += 1;
            if verdict.is_select() {
                selected_rows.push(position);
            }
        }
        if verdict.is_stop() {
            stop_reason = Some(match selection {
                SelectionState::PatternMatch { .. } => StopReason::BudgetExhausted,
                _ => StopReason::TargetsExhausted,
            });
            break;
        }
    }

    Ok(Scan { builder, selected_rows, stop_reason, rows_scanned, rows_committed, empty_cells })
}
