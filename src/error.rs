//! Error types for the sales batch pipeline.

use thiserror::Error;

/// Result type alias for batch operations
pub type Result<T> = std::result::Result<T, SalesError>;

/// Errors that abort a batch run.
///
/// Business-rule violations are not errors; they end up as rejection entries.
#[derive(Error, Debug)]
pub enum SalesError {
    /// Failed to open or read a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error in the file-backed store
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A field of an input line could not be decoded
    #[error("Invalid {field} at line {line}: '{value}' ({message})")]
    InvalidLine {
        line: usize,
        field: &'static str,
        value: String,
        message: String,
    },

    /// Input line does not cover the fixed-width layout
    #[error("Line {line} is too short: {length} characters, expected at least {expected}")]
    LineTooShort {
        line: usize,
        length: usize,
        expected: usize,
    },

    /// The stored reference period is not a `yyyy-MM-dd` date
    #[error("Reference period '{0}' is not a valid yyyy-MM-dd date")]
    InvalidReferencePeriod(String),

    /// The store has no reference period configured
    #[error("No reference period configured in {0}")]
    MissingReferencePeriod(String),

    /// Missing command line argument
    #[error("Missing {0} argument. Usage: sales-batch <input.txt> <store-dir>")]
    MissingArgument(&'static str),
}
