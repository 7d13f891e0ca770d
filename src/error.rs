use crate::extraction::cursor::WindowError;
use thiserror::Error;

/// Main error type for the Rusty Grid crate.
/// Aggregates errors from the accessor boundary, the extraction components and dependencies.
#[derive(Error, Debug)]
pub enum RustyGridError {
    #[error("{0}")]
    WithContextError(String),

    // Third-party library errors
    #[error("{0}")]
    TomlError(#[from] toml::de::Error),

    // Accessor boundary errors
    #[error("{0}")]
    AccessorFault(#[from] crate::accessor::AccessorFault),

    // Extraction module errors
    #[error("{0}")]
    WindowError(#[from] WindowError),

    #[error("{0}")]
    ProbeError(#[from] crate::extraction::probe::ProbeError),

    #[error("{0}")]
    PolicyError(#[from] crate::extraction::policy::PolicyError),

    #[error("{0}")]
    ExtractError(#[from] crate::extraction::ExtractError),

    // Table module errors
    #[error("{0}")]
    TableError(#[from] crate::table::TableError),

    // Configuration errors
    #[error("{0}")]
    ConfigError(#[from] crate::config::ConfigError),
}

impl RustyGridError {
    /// Returns true if the error was raised by the accessor or a window operation,
    /// i.e. the remote grid itself failed rather than the caller's input.
    pub fn is_remote_fault(&self) -> bool {
        matches!(
            self,
            RustyGridError::AccessorFault(_)
                | RustyGridError::ProbeError(_)
                | RustyGridError::WindowError(WindowError::ScrollFailed { .. } | WindowError::DiscoverFailed(_))
                | RustyGridError::ExtractError(_)
        )
    }
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, RustyGridError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| RustyGridError::WithContextError(format!("{}: {}", message, e)))
    }
}
