//! Error types for watchstat
//!
//! Every stage of the pipeline reports failures through [`WatchstatError`].
//! All errors are fatal for a run: nothing downstream is produced once one
//! of them is returned.
//!
//! # Example
//!
//! ```
//! use watchstat_core::error::{Result, WatchstatError};
//!
//! fn require_column(present: bool) -> Result<()> {
//!     if !present {
//!         return Err(WatchstatError::MalformedInput(
//!             "missing required column(s): Title".to_string(),
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_column(false).is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for watchstat operations
#[derive(Error, Debug)]
pub enum WatchstatError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Remote export could not be fetched (connection failure, timeout, HTTP error)
    #[error("Source unavailable: {url}: {reason}")]
    SourceUnavailable {
        /// The URL that was requested
        url: String,
        /// What went wrong
        reason: String,
    },

    /// Local export file does not exist
    #[error("Source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Export is not a usable viewing activity table
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A row's start time could not be parsed
    #[error("Invalid timestamp on line {line}: '{value}'")]
    InvalidTimestamp {
        /// Source line of the offending row
        line: u64,
        /// The raw start time text
        value: String,
    },

    /// A row's duration could not be parsed
    #[error("Invalid duration on line {line}: '{value}'")]
    InvalidDuration {
        /// Source line of the offending row
        line: u64,
        /// The raw duration text
        value: String,
    },

    /// Invalid timezone
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience type alias for Results in watchstat
///
/// # Example
///
/// ```
/// use watchstat_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, WatchstatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = WatchstatError::InvalidDuration {
            line: 7,
            value: "soon".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid duration on line 7: 'soon'");

        let error = WatchstatError::SourceNotFound(PathBuf::from("/tmp/missing.csv"));
        assert_eq!(error.to_string(), "Source not found: /tmp/missing.csv");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: WatchstatError = io_error.into();
        assert!(matches!(error, WatchstatError::Io(_)));
    }
}
