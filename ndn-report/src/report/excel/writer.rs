//! Write category views to the output workbook

use rust_xlsxwriter::{Format, FormatBorder, Formula, Workbook, Worksheet, utility::row_col_to_cell};

use crate::config::ReportConfig;
use crate::error::Result;
use crate::report::clean::ColumnLayout;
use crate::report::outage::OutageValue;
use crate::report::types::{CategoryView, CellValue, Table};

/// Number formats for date/time cells outside the Outage column
mod num_formats {
    pub const DATETIME: &str = "yyyy-mm-dd hh:mm:ss";
    pub const TIME: &str = "hh:mm:ss";
    pub const ELAPSED: &str = "[hh]:mm:ss";
}

/// Tally of how Outage cells were rendered, for logging
#[derive(Debug, Default, Clone, Copy)]
pub struct OutageTally {
    pub missing: usize,
    pub timed: usize,
    pub unrecognized: usize,
}

struct Formats {
    header: Format,
    outage_time: Format,
    outage_elapsed: Format,
    datetime: Format,
    time: Format,
    elapsed: Format,
}

impl Formats {
    fn new(config: &ReportConfig) -> Self {
        Self {
            header: Format::new().set_bold().set_border(FormatBorder::Thin),
            outage_time: Format::new().set_num_format(&config.markers.time_format),
            outage_elapsed: Format::new().set_num_format(&config.markers.elapsed_format),
            datetime: Format::new().set_num_format(num_formats::DATETIME),
            time: Format::new().set_num_format(num_formats::TIME),
            elapsed: Format::new().set_num_format(num_formats::ELAPSED),
        }
    }

    /// Outage format for a recognized value; durations past a day need elapsed hours
    fn outage(&self, value: OutageValue) -> &Format {
        match value {
            OutageValue::Elapsed(_) => &self.outage_elapsed,
            _ => &self.outage_time,
        }
    }
}

/// Render one sheet per view, in view order, and serialize the workbook
pub fn write_report(
    table: &Table,
    views: &[CategoryView],
    layout: ColumnLayout,
    config: &ReportConfig,
) -> Result<(Vec<u8>, OutageTally)> {
    let mut workbook = Workbook::new();
    let formats = Formats::new(config);
    let mut tally = OutageTally::default();

    for view in views {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&view.name)?;
        write_sheet(worksheet, table, view, layout, config, &formats, &mut tally)?;
        log::debug!("Wrote sheet '{}' with {} rows", view.name, view.rows.len());
    }

    let bytes = workbook.save_to_buffer()?;
    Ok((bytes, tally))
}

fn write_sheet(
    ws: &mut Worksheet,
    table: &Table,
    view: &CategoryView,
    layout: ColumnLayout,
    config: &ReportConfig,
    formats: &Formats,
    tally: &mut OutageTally,
) -> Result<()> {
    for (col, name) in table.headers.iter().enumerate() {
        ws.write_string_with_format(0, col as u16, name, &formats.header)?;
    }

    for (out_idx, &src_row) in view.rows.iter().enumerate() {
        let row = (out_idx + 1) as u32;

        for col in 0..table.width() {
            if col == layout.hours || col == layout.outage {
                continue;
            }
            write_cell(ws, row, col as u16, table.cell(src_row, col), formats)?;
        }

        write_outage_pair(ws, row, table.cell(src_row, layout.outage), layout, config, formats, tally)?;
    }

    ws.autofit();
    Ok(())
}

/// Outage cell plus its derived Hours formula
fn write_outage_pair(
    ws: &mut Worksheet,
    row: u32,
    outage: &CellValue,
    layout: ColumnLayout,
    config: &ReportConfig,
    formats: &Formats,
    tally: &mut OutageTally,
) -> Result<()> {
    let hours_col = layout.hours as u16;
    let outage_col = layout.outage as u16;

    match OutageValue::classify(outage, &config.markers) {
        OutageValue::Missing => {
            tally.missing += 1;
            ws.write_string(row, outage_col, &config.markers.no_outage)?;
        }
        value @ (OutageValue::TimeOfDay(days) | OutageValue::Elapsed(days)) => {
            tally.timed += 1;
            ws.write_number_with_format(row, outage_col, days, formats.outage(value))?;

            let formula = format!("={}*24", row_col_to_cell(row, outage_col));
            let hours = value.hours().unwrap_or_default();
            ws.write_formula(row, hours_col, Formula::new(formula).set_result(hours.to_string()))?;
        }
        OutageValue::Unrecognized => {
            tally.unrecognized += 1;
            write_cell(ws, row, outage_col, outage, formats)?;
        }
    }

    Ok(())
}

fn write_cell(ws: &mut Worksheet, row: u32, col: u16, value: &CellValue, formats: &Formats) -> Result<()> {
    match value {
        CellValue::Empty => { /* Leave cell empty */ }
        CellValue::Text(s) => { ws.write_string(row, col, s)?; }
        CellValue::Number(n) => { ws.write_number(row, col, *n)?; }
        CellValue::Bool(b) => { ws.write_boolean(row, col, *b)?; }
        CellValue::DateTime(serial) => {
            let format = if *serial < 1.0 { &formats.time } else { &formats.datetime };
            ws.write_number_with_format(row, col, *serial, format)?;
        }
        CellValue::Duration(days) => {
            ws.write_number_with_format(row, col, *days, &formats.elapsed)?;
        }
    }
    Ok(())
}
