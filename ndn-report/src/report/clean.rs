//! Row exclusion, blank normalization and Hours column insertion

use crate::config::ReportConfig;
use crate::error::{ReportError, Result};

use super::types::{CellValue, Table};

/// Column positions after cleaning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub fault_type: Option<usize>,
    pub hours: usize,
    pub outage: usize,
}

/// Drop rows whose status or fault type marks a cancelled fault.
///
/// A missing column or a non-text cell never matches. Returns the number of
/// rows removed.
pub fn exclude_cancelled(table: &mut Table, config: &ReportConfig) -> usize {
    let status_col = table.column_index(&config.columns.status);
    let fault_col = table.column_index(&config.columns.fault_type);
    let rules = &config.exclusions;

    let matches = |row: &[CellValue], col: Option<usize>, needle: &str| {
        col.and_then(|c| row.get(c))
            .map(|cell| cell.contains_ignore_case(needle))
            .unwrap_or(false)
    };

    table.retain_rows(|row| {
        !(matches(row, status_col, rules.status_contains.as_str())
            || matches(row, fault_col, rules.fault_type_contains.as_str()))
    })
}

/// Replace every empty or whitespace-only cell with the unknown marker
pub fn fill_blanks(table: &mut Table, marker: &str) -> usize {
    let mut filled = 0;
    for cell in table.cells_mut() {
        if cell.is_blank() {
            *cell = CellValue::Text(marker.to_string());
            filled += 1;
        }
    }
    filled
}

/// Insert an empty Hours column immediately left of the outage column.
///
/// Fails with a schema error when there is no outage column. An Hours column
/// already present in the input is dropped and derived again.
pub fn insert_hours_column(table: &mut Table, config: &ReportConfig) -> Result<ColumnLayout> {
    let cols = &config.columns;

    if table.column_index(&cols.outage).is_none() {
        return Err(ReportError::schema(&cols.outage));
    }

    while let Some(existing) = table.column_index(&cols.hours) {
        log::warn!(
            "Input already has a '{}' column at position {}; replacing it",
            cols.hours,
            existing + 1
        );
        table.remove_column(existing);
    }

    let outage = table
        .column_index(&cols.outage)
        .ok_or_else(|| ReportError::schema(&cols.outage))?;
    table.insert_column(outage, &cols.hours, CellValue::Empty);

    Ok(ColumnLayout {
        fault_type: table.column_index(&cols.fault_type),
        hours: outage,
        outage: outage + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn raw_table() -> Table {
        let mut table = Table::new(vec![
            "Ticket".into(),
            "Status".into(),
            "Fault Type".into(),
            "Outage".into(),
        ]);
        table.push_row(vec![text("T1"), text("Closed"), text("Power Problem"), text("02:30")]);
        table.push_row(vec![text("T2"), text("FAULT CANCELED"), text("Cable Fault"), text("01:00")]);
        table.push_row(vec![text("T3"), text("Closed"), text("Fault Cancelled"), text("01:00")]);
        table.push_row(vec![text("T4"), CellValue::Empty, text("  "), CellValue::Empty]);
        table.push_row(vec![text("T5"), CellValue::Number(3.0), CellValue::Empty, text("none")]);
        table
    }

    #[test]
    fn test_exclude_cancelled() {
        let mut table = raw_table();
        let dropped = exclude_cancelled(&mut table, &ReportConfig::default());

        assert_eq!(dropped, 2);
        let tickets: Vec<_> = table.rows.iter().map(|r| r[0].clone()).collect();
        assert_eq!(tickets, vec![text("T1"), text("T4"), text("T5")]);
    }

    #[test]
    fn test_exclude_without_status_column() {
        let mut table = Table::new(vec!["Fault Type".into(), "Outage".into()]);
        table.push_row(vec![text("fault cancelled - dup"), CellValue::Empty]);
        table.push_row(vec![text("Other"), CellValue::Empty]);

        assert_eq!(exclude_cancelled(&mut table, &ReportConfig::default()), 1);
        assert_eq!(table.cell(0, 0), &text("Other"));
    }

    #[test]
    fn test_fill_blanks() {
        let mut table = raw_table();
        let filled = fill_blanks(&mut table, "unknown");

        assert_eq!(filled, 4);
        assert_eq!(table.cell(3, 1), &text("unknown"));
        assert_eq!(table.cell(3, 2), &text("unknown"));
        assert_eq!(table.cell(3, 3), &text("unknown"));
        assert_eq!(table.cell(4, 1), &CellValue::Number(3.0));
    }

    #[test]
    fn test_insert_hours_left_of_outage() {
        let mut table = raw_table();
        let layout = insert_hours_column(&mut table, &ReportConfig::default()).unwrap();

        assert_eq!(table.headers, vec!["Ticket", "Status", "Fault Type", "Hours", "Outage"]);
        assert_eq!(layout.hours, 3);
        assert_eq!(layout.outage, 4);
        assert_eq!(layout.fault_type, Some(2));
        assert!(table.rows.iter().all(|r| r[3] == CellValue::Empty));
    }

    #[test]
    fn test_missing_outage_is_schema_error() {
        let mut table = Table::new(vec!["Status".into(), "Fault Type".into()]);
        let err = insert_hours_column(&mut table, &ReportConfig::default()).unwrap_err();

        assert!(matches!(err, ReportError::Schema { ref column } if column == "Outage"));
        assert_eq!(table.width(), 2);
    }

    #[test]
    fn test_existing_hours_column_is_replaced() {
        let mut table = Table::new(vec!["Outage".into(), "Hours".into(), "Site".into()]);
        table.push_row(vec![text("01:00"), CellValue::Number(1.0), text("X")]);

        let layout = insert_hours_column(&mut table, &ReportConfig::default()).unwrap();

        assert_eq!(table.headers, vec!["Hours", "Outage", "Site"]);
        assert_eq!(layout.outage, 1);
        assert_eq!(table.rows[0], vec![CellValue::Empty, text("01:00"), text("X")]);
    }
}
