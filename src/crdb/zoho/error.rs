use std::path::PathBuf;

use thiserror::Error;

use crate::crdb::zoho::model::SemanticField;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Error type covering the fatal failure cases of a statement conversion.
///
/// Malformed numbers and dates inside the transaction table are not errors;
/// they degrade to zero or an empty date in [`crate::normalize::parse`].
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors bubbled up from the spreadsheet reader.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::Error),

    /// Errors bubbled up from the CSV writer.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when the workbook does not contain a single worksheet.
    #[error("workbook contains no worksheet")]
    EmptyWorkbook,

    /// Raised when no transaction header row exists within the scan window.
    #[error("transaction header row not found in the first {scanned} rows")]
    HeaderNotFound { scanned: usize },

    /// Raised when mandatory semantic columns cannot be mapped to a header.
    #[error("missing required columns: {}", join_fields(.missing))]
    MissingRequiredColumns { missing: Vec<SemanticField> },

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when a batch source path is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

fn join_fields(fields: &[SemanticField]) -> String {
    fields
        .iter()
        .map(SemanticField::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
