use crate::extraction::probe::CellOutcome;
use regex::Regex;
use regex::RegexBuilder;
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors in a selection policy, raised before any row is read.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Invalid pattern '{pattern}': {source}")]
    PatternError {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Match budget must be at least 1")]
    BudgetError,

    #[error("Row {row} is beyond the last row {maximum}")]
    RowOutOfRange { row: usize, maximum: usize },

    #[error("Row {0} requested from a grid without rows")]
    NoRowsError(usize),
}

/// Rule deciding which rows are selected and when the traversal stops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Commit every row and scan to the last row.
    CaptureAll,
    /// Select rows with a cell matching `pattern` (case-insensitive), stop after `budget` matches.
    PatternMatch { pattern: String, budget: usize },
    /// Select the given logical rows, stop after the last of them.
    ExplicitRows { indices: BTreeSet<usize> },
}

impl SelectionPolicy {
    /// Creates a pattern policy.
    pub fn pattern(pattern: &str, budget: usize) -> Self {
        Self::PatternMatch { pattern: pattern.to_owned(), budget }
    }

    /// Creates an explicit row policy.
    pub fn rows<I>(indices: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        Self::ExplicitRows { indices: indices.into_iter().collect() }
    }

    /// Short name of the policy, used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CaptureAll => "all",
            Self::PatternMatch { .. } => "pattern",
            Self::ExplicitRows { .. } => "rows",
        }
    }
}

/// Decision for one row, taken after it has been read.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Leave the row out of the table.
    Skip,
    /// Add the row to the table without selecting it.
    Commit,
    /// Add and select the row.
    Select,
    /// Add and select the row, then stop the traversal.
    SelectAndStop,
}

impl Verdict {
    /// Returns true if the row goes into the table.
    #[inline]
    pub fn is_commit(&self) -> bool {
        !matches!(self, Verdict::Skip)
    }

    /// Returns true if the row is marked selected.
    #[inline]
    pub fn is_select(&self) -> bool {
        matches!(self, Verdict::Select | Verdict::SelectAndStop)
    }

    /// Returns true if the traversal stops after this row.
    #[inline]
    pub fn is_stop(&self) -> bool {
        matches!(self, Verdict::SelectAndStop)
    }
}

/// Per-traversal counters of a selection policy.
#[derive(Debug)]
pub enum SelectionState {
    CaptureAll,
    PatternMatch { regex: Regex, remaining: usize },
    ExplicitRows { remaining: BTreeSet<usize> },
}

impl SelectionState {
    /// Validates a policy against the last row and prepares its counters.
    /// `maximum` is `None` for a grid without rows.
    pub fn new(policy: &SelectionPolicy, maximum: Option<usize>) -> Result<Self, PolicyError> {
        match policy {
            SelectionPolicy::CaptureAll => Ok(Self::CaptureAll),
            SelectionPolicy::PatternMatch { pattern, budget } => {
                if *budget == 0 {
                    Err(PolicyError::BudgetError)?
                }
                let regex = RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| PolicyError::PatternError { pattern: pattern.to_owned(), source })?;
                Ok(Self::PatternMatch { regex, remaining: *budget })
            }
            SelectionPolicy::ExplicitRows { indices } => {
                match (indices.last(), maximum) {
                    (Some(row), None) => Err(PolicyError::NoRowsError(*row))?,
                    (Some(row), Some(maximum)) if *row > maximum => {
                        Err(PolicyError::RowOutOfRange { row: *row, maximum })?
                    }
                    _ => (),
                }
                Ok(Self::ExplicitRows { remaining: indices.clone() })
            }
        }
    }

    /// Checks if the cells of a row need to be read at all.
    /// Rows that are not targets of an explicit policy are only traversed.
    pub fn wants_row(&self, row: usize) -> bool {
        match self {
            Self::ExplicitRows { remaining } => remaining.contains(&row),
            _ => true,
        }
    }

    /// Checks if a cell makes its row a match.
    pub fn matches(&self, outcome: &CellOutcome) -> bool {
        match self {
            Self::PatternMatch { regex, .. } => match outcome {
                CellOutcome::Value(value) => regex.is_match(value),
                CellOutcome::Empty => false,
            },
            _ => false,
        }
    }

    /// Decides on a fully read row and updates the counters.
    /// `matched` tells whether any of its cells matched.
    pub fn conclude(&mut self, row: usize, matched: bool) -> Verdict {
        match self {
            Self::CaptureAll => Verdict::Commit,
            Self::PatternMatch { remaining, .. } => {
                if !matched || *remaining == 0 {
                    Verdict::Skip
                } else {
                    *remaining -= 1;
                    if *remaining == 0 {
                        Verdict::SelectAndStop
                    } else {
                        Verdict::Select
                    }
                }
            }
            Self::ExplicitRows { remaining } => {
                if !remaining.remove(&row) {
                    Verdict::Skip
                } else if remaining.is_empty() {
                    Verdict::SelectAndStop
                } else {
                    Verdict::Select
                }
            }
        }
    }
}
