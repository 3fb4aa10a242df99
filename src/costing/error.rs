use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Error type covering the fatal failure cases of a report run. Every variant
/// aborts the run; nothing here is retried.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when a CSV input cannot be decoded.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when the JSON configuration file cannot be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when an input table does not exist on disk.
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Raised when a required column is absent from an input table.
    #[error("missing column '{column}' in {}", .source_file.display())]
    Schema {
        column: String,
        source_file: PathBuf,
    },

    /// Raised when a cell that must hold a value is empty or malformed.
    #[error(
        "invalid value '{value}' in column '{column}' at row {row} of {}",
        .source_file.display()
    )]
    InvalidValue {
        source_file: PathBuf,
        row: usize,
        column: String,
        value: String,
    },

    /// Raised when a summed value overflows and cannot be written.
    #[error("total for scope '{scope}' in column '{column}' is not a finite number")]
    NonFiniteTotal { scope: String, column: String },

    /// Raised when configuration values are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Raised when a report workbook does not have the expected layout.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised instead of replacing a previously generated report.
    #[error("refusing to overwrite existing report: {}", .0.display())]
    OutputExists(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

/// A cell that could not be measured or restyled while formatting the report.
///
/// Warnings are collected per cell and never abort the run; the data they
/// refer to has already been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattingWarning {
    pub sheet: String,
    /// A1-style reference of the offending cell.
    pub cell: String,
    pub reason: String,
}

impl fmt::Display for FormattingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}: {}", self.sheet, self.cell, self.reason)
    }
}
