//! Read the raw outage sheet from spreadsheet bytes

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use crate::error::{ReportError, Result};
use crate::report::types::{CellValue, Table};

/// Parse the first sheet of an xlsx/xls/xlsb/ods workbook.
///
/// The first row is the header. Fully empty rows are skipped.
pub fn read_first_sheet(bytes: &[u8]) -> Result<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ReportError::Parse("workbook has no sheets".into()))?;

    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| ReportError::Parse(format!("sheet '{}' has no header row", sheet_name)))?;

    let mut table = Table::new(parse_header(header));

    for row in rows {
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        table.push_row(row.iter().map(CellValue::from_data).collect());
    }

    log::info!(
        "Read sheet '{}': {} rows x {} columns",
        sheet_name,
        table.len(),
        table.width()
    );
    Ok(table)
}

fn parse_header(header: &[Data]) -> Vec<String> {
    header
        .iter()
        .enumerate()
        .map(|(col, cell)| {
            let name = match CellValue::from_data(cell) {
                CellValue::Text(s) => s,
                other => other.to_string(),
            };
            if name.is_empty() {
                format!("Unnamed: {}", col)
            } else {
                name
            }
        })
        .collect()
}
