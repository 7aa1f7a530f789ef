//! Sheet generation.
//!
//! [`SheetBuilder`] turns the flattened field list into the workbook of
//! mapping sheets; [`output`] serializes the workbook to CSV files.

pub mod output;
mod sheets;

pub use output::{write_workbook, WrittenSheet};
pub use sheets::{Sheet, SheetBuilder, Workbook};

use ocdsmap_core::MappingError;
use thiserror::Error;

/// Result type for generator operations
pub type GeneratorResult<T> = std::result::Result<T, GeneratorError>;

/// Errors that can occur while building or writing mapping sheets
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Core mapping error (schema fragments, string table, references)
    #[error(transparent)]
    Core(#[from] MappingError),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Upstream fetch failure
    #[error("Failed to fetch '{url}': {reason}")]
    Fetch {
        /// URL that failed
        url: String,
        /// Reason for failure
        reason: String,
    },

    /// An encountered extension has no registered description
    #[error("No description for extension '{0}'")]
    UnknownExtension(String),

    /// Malformed mapping-sheet input
    #[error("Malformed mapping sheet: {0}")]
    MalformedSheet(String),
}

impl GeneratorError {
    /// Create a fetch error
    #[must_use]
    pub fn fetch(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
