//! Gazetteer error types.

use std::path::PathBuf;

/// Errors that can occur while loading the reference table.
///
/// All of these are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be opened or read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV could not be parsed
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The spreadsheet could not be parsed
    #[error("failed to parse spreadsheet {path}: {message}")]
    Spreadsheet { path: PathBuf, message: String },

    /// The table has no header row
    #[error("{path} has no header row")]
    MissingHeader { path: PathBuf },

    /// A required column is absent from the header row
    #[error("missing required column '{column}'")]
    MissingColumn { column: &'static str },

    /// A required cell holds something other than the expected number
    #[error("row {row}: column '{column}' has invalid value '{value}'")]
    InvalidCell {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Errors from forward and reverse resolution.
///
/// Both variants are expected outcomes of user input, not internal faults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The place string did not contain one or two tokens
    #[error("invalid place format: expected 1 or 2 words, got {tokens}")]
    InvalidQuery { tokens: usize },

    /// No row matched
    #[error("location not found")]
    NotFound,
}
