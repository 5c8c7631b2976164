//! Error type returned by the report transformer

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

/// Failures surfaced to the caller; none of them leave partial output behind
#[derive(Debug, Error)]
pub enum ReportError {
    /// A column the transform depends on is missing from the input
    #[error("Expected column '{column}' not found")]
    Schema { column: String },

    /// The input could not be read as a spreadsheet
    #[error("Could not read input spreadsheet: {0}")]
    Parse(String),

    /// The output workbook could not be built
    #[error("Failed to write report workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("Invalid report configuration: {0}")]
    Config(String),
}

impl ReportError {
    pub fn schema(column: &str) -> Self {
        ReportError::Schema {
            column: column.to_string(),
        }
    }
}

impl From<calamine::Error> for ReportError {
    fn from(err: calamine::Error) -> Self {
        ReportError::Parse(err.to_string())
    }
}
