//! NDN outage report transformation
//!
//! Turns a raw outage-tracking sheet into the cleaned multi-sheet report:
//! cancelled faults are dropped, blanks become `unknown`, an `Hours` column is
//! derived from `Outage`, and rows are split into one sheet per fault-type
//! category.

mod categorize;
mod clean;
pub mod excel;
mod outage;
pub mod types;

use serde::Serialize;

use crate::config::ReportConfig;
use crate::error::Result;

pub use categorize::partition;
pub use clean::{ColumnLayout, exclude_cancelled, fill_blanks, insert_hours_column};
pub use outage::{OutageValue, parse_time_text};
pub use types::{CategoryRule, CategoryView, CellValue, Table, default_categories};

/// MIME type of the generated workbook
pub const XLSX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A generated report, ready to hand to the caller
#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub bytes: Vec<u8>,
    /// Suggested download name
    pub file_name: String,
    pub mime_type: &'static str,
    pub summary: ReportSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    /// Data rows parsed from the input sheet
    pub rows_read: usize,
    /// Rows dropped as cancelled faults
    pub rows_excluded: usize,
    pub sheets: Vec<SheetSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetSummary {
    pub name: String,
    pub rows: usize,
}

/// Transform raw spreadsheet bytes into the categorized report.
///
/// Nothing is produced on failure: a missing outage column is a schema
/// error, unreadable input a parse error.
pub fn transform(input: &[u8], config: &ReportConfig) -> Result<ReportOutput> {
    config.validate()?;

    let mut table = excel::read_first_sheet(input)?;
    let rows_read = table.len();

    let rows_excluded = exclude_cancelled(&mut table, config);
    log::info!("Excluded {} cancelled-fault rows of {}", rows_excluded, rows_read);

    let filled = fill_blanks(&mut table, &config.markers.unknown);
    log::debug!("Filled {} blank cells with '{}'", filled, config.markers.unknown);

    let layout = insert_hours_column(&mut table, config)?;
    let views = partition(&table, layout.fault_type, &config.categories);

    let (bytes, tally) = excel::write_report(&table, &views, layout, config)?;
    log::debug!(
        "Outage cells: {} timed, {} without outage, {} left as-is",
        tally.timed,
        tally.missing,
        tally.unrecognized
    );
    log::info!("Report generated: {} sheets, {} bytes", views.len(), bytes.len());

    Ok(ReportOutput {
        bytes,
        file_name: config.output.file_name.clone(),
        mime_type: XLSX_MIME_TYPE,
        summary: ReportSummary {
            rows_read,
            rows_excluded,
            sheets: views
                .iter()
                .map(|v| SheetSummary {
                    name: v.name.clone(),
                    rows: v.rows.len(),
                })
                .collect(),
        },
    })
}

/// [`transform`] with the stock NDN configuration
pub fn transform_default(input: &[u8]) -> Result<ReportOutput> {
    transform(input, &ReportConfig::default())
}
