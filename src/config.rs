//! Declarative extraction configuration.
//!
//! ```toml
//! [selection]
//! mode = "rows"
//! rows = "0,4,10:12"
//!
//! [options]
//! end_at_empty_row = true
//! ```
use crate::accessor::CellAccessor;
use crate::error::ResultMessage;
use crate::error::RustyGridError;
use crate::extraction::policy::SelectionPolicy;
use crate::extraction::ExtractOptions;
use crate::extraction::ExtractionResult;
use crate::extraction::Extractor;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors related to extraction configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid row expression '{0}'")]
    RowsFormatError(String),

    #[error("Invalid row range '{0}': start is after end")]
    RowsRangeError(String),
}

/// Row targets, either listed or written as an expression like `"1,3,5:8"`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RowsSpec {
    List(Vec<usize>),
    Expression(String),
}

/// The `[selection]` table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SelectionConfig {
    #[default]
    All,
    Pattern { pattern: String, budget: usize },
    Rows { rows: RowsSpec },
}

/// Complete extraction configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub selection: SelectionConfig,
    pub options: ExtractOptions,
}

impl ExtractionConfig {
    /// Parses a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, RustyGridError> {
        let config = toml::from_str::<Self>(text)
            .map_err(RustyGridError::from)
            .with_prefix("Parse extraction config failed")?;
        Ok(config)
    }

    /// Builds the selection policy described by the `[selection]` table.
    pub fn policy(&self) -> Result<SelectionPolicy, RustyGridError> {
        match &self.selection {
            SelectionConfig::All => Ok(SelectionPolicy::CaptureAll),
            SelectionConfig::Pattern { pattern, budget } => Ok(SelectionPolicy::pattern(pattern, *budget)),
            SelectionConfig::Rows { rows: RowsSpec::List(rows) } => Ok(SelectionPolicy::rows(rows.iter().copied())),
            SelectionConfig::Rows { rows: RowsSpec::Expression(expression) } => {
                Ok(SelectionPolicy::ExplicitRows { indices: parse_rows(expression)? })
            }
        }
    }

    /// Runs one extraction with this configuration.
    pub fn extract<A>(&self, accessor: &mut A) -> Result<ExtractionResult, RustyGridError>
    where
        A: CellAccessor + ?Sized,
    {
        let policy = self.policy()?;
        Extractor::new(accessor).with_options(self.options).extract(&policy)
    }
}

/// Parses a row expression of comma separated 0-based indices and inclusive `a:b` ranges.
pub(crate) fn parse_rows(expression: &str) -> Result<BTreeSet<usize>, ConfigError> {
    let pattern = Regex::new(r"^(\d+)(?::(\d+))?$").expect("Hardcode regex pattern");
    let mut rows = BTreeSet::new();
    for item in expression.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let captures = pattern
            .captures(item)
            .ok_or(ConfigError::RowsFormatError(item.to_owned()))?;
        let lower = parse_index(captures.get(1).map(|matcher| matcher.as_str()), item)?;
        let upper = match captures.get(2) {
            Some(matcher) => parse_index(Some(matcher.as_str()), item)?,
            None => lower,
        };
        if lower > upper {
            Err(ConfigError::RowsRangeError(item.to_owned()))?
        }
        rows.extend(lower..=upper);
    }
    Ok(rows)
}

fn parse_index(digits: Option<&str>, item: &str) -> Result<usize, ConfigError> {
    digits
        .and_then(|digits| digits.parse::<usize>().ok())
        .ok_or(ConfigError::RowsFormatError(item.to_owned()))
}
