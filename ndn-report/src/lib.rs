//! Cleans raw NDN outage-tracking spreadsheets into a categorized report.
//!
//! The entry point is [`transform`]: spreadsheet bytes in, report bytes out
//! (or a [`ReportError`] explaining why nothing was produced).

pub mod config;
pub mod error;
pub mod report;

pub use config::ReportConfig;
pub use error::{ReportError, Result};
pub use report::{ReportOutput, ReportSummary, SheetSummary, XLSX_MIME_TYPE, transform, transform_default};
