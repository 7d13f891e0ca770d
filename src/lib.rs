//! # Rusty Grid
//!
//! Windowed extraction of tabular data from remote, virtualized grid controls.
//!
//! A virtualized grid only materializes a bounded window of rows at a time. Reading a
//! cell outside that window, or an unpopulated cell inside it, raises an "empty" fault
//! instead of returning a value, and moving the window is itself a stateful remote
//! operation. This crate walks such a grid row by row, advancing the window exactly
//! once per page, and builds a plain text table out of what it reads.
//!
//! ## Features
//!
//! - **Typed accessor boundary**: adapters implement [`CellAccessor`] and classify their
//!   faults as [`FaultKind::Sentinel`] (no value here) or [`FaultKind::Other`]
//! - **Window bookkeeping**: [`WindowCursor`] keeps the local belief of the window placement
//!   in step with the remote side
//! - **Selection policies**: capture every row, select rows matching a case-insensitive
//!   pattern with a match budget, or select an explicit set of row indices
//! - **Declarative configuration**: policies and options can be loaded from TOML
//! - **In-memory adapter**: [`MemoryGrid`] simulates a virtualized grid for tests and demos
//!
//! ## Example
//!
//! ```
//! use rusty_grid::{extract, MemoryGrid, SelectionPolicy};
//!
//! let mut grid = MemoryGrid::from_text(
//!     &["id", "name"],
//!     &[&["1", "alpha"], &["2", "beta"], &["3", "gamma"]],
//!     2,
//! );
//! let result = extract(&mut grid, &SelectionPolicy::CaptureAll).unwrap();
//! assert_eq!(result.table.len(), 3);
//! assert_eq!(result.table.get(2, 1), Some("gamma"));
//! ```
mod accessor;
mod config;
mod error;
mod extraction;
mod table;

pub use crate::accessor::memory::MemoryGrid;
pub use crate::accessor::AccessorFault;
pub use crate::accessor::CellAccessor;
pub use crate::accessor::FaultKind;
pub use crate::accessor::RowExtent;
pub use crate::accessor::Surface;
pub use crate::config::ConfigError;
pub use crate::config::ExtractionConfig;
pub use crate::config::RowsSpec;
pub use crate::config::SelectionConfig;
pub use crate::error::RustyGridError;
pub use crate::extraction::cursor::WindowCursor;
pub use crate::extraction::cursor::WindowError;
pub use crate::extraction::cursor::WindowState;
pub use crate::extraction::extract;
pub use crate::extraction::policy::PolicyError;
pub use crate::extraction::policy::SelectionPolicy;
pub use crate::extraction::policy::SelectionState;
pub use crate::extraction::policy::Verdict;
pub use crate::extraction::probe::CellOutcome;
pub use crate::extraction::probe::ProbeError;
pub use crate::extraction::probe::RowProbe;
pub use crate::extraction::ExtractError;
pub use crate::extraction::ExtractOptions;
pub use crate::extraction::ExtractionResult;
pub use crate::extraction::ExtractionStats;
pub use crate::extraction::Extractor;
pub use crate::extraction::StopReason;
pub use crate::table::column::Column;
pub use crate::table::column::ColumnType;
pub use crate::table::Row;
pub use crate::table::RowHandle;
pub use crate::table::Table;
pub use crate::table::TableBuilder;
pub use crate::table::TableError;
