//! In-memory table of report rows with named columns

use super::value::CellValue;

static EMPTY: CellValue = CellValue::Empty;

/// Rows of a single sheet, header first
///
/// Every row holds exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the header width
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.headers.len(), CellValue::Empty);
        self.rows.push(row);
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column with this exact header
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell at (row, col); out-of-range lookups read as empty
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Insert a column at `index`, filling every row with `fill`
    pub fn insert_column(&mut self, index: usize, name: &str, fill: CellValue) {
        self.headers.insert(index, name.to_string());
        for row in &mut self.rows {
            row.insert(index, fill.clone());
        }
    }

    pub fn remove_column(&mut self, index: usize) {
        self.headers.remove(index);
        for row in &mut self.rows {
            row.remove(index);
        }
    }

    /// Keep only the rows for which `keep` returns true; returns how many were dropped
    pub fn retain_rows<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&[CellValue]) -> bool,
    {
        let before = self.rows.len();
        self.rows.retain(|row| keep(row));
        before - self.rows.len()
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut CellValue> {
        self.rows.iter_mut().flat_map(|row| row.iter_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn sample() -> Table {
        let mut table = Table::new(vec!["Site".into(), "Outage".into()]);
        table.push_row(vec![text("A"), text("01:00")]);
        table.push_row(vec![text("B")]);
        table
    }

    #[test]
    fn test_push_row_pads_to_width() {
        let table = sample();
        assert_eq!(table.rows[1].len(), 2);
        assert_eq!(table.cell(1, 1), &CellValue::Empty);
        assert_eq!(table.cell(9, 9), &CellValue::Empty);
    }

    #[test]
    fn test_insert_column_shifts_right() {
        let mut table = sample();
        let outage = table.column_index("Outage").unwrap();
        table.insert_column(outage, "Hours", CellValue::Empty);

        assert_eq!(table.headers, vec!["Site", "Hours", "Outage"]);
        assert_eq!(table.column_index("Outage"), Some(2));
        assert_eq!(table.cell(0, 2), &text("01:00"));
        assert_eq!(table.cell(0, 1), &CellValue::Empty);
    }

    #[test]
    fn test_retain_rows_counts_dropped() {
        let mut table = sample();
        let dropped = table.retain_rows(|row| row[0] != text("A"));
        assert_eq!(dropped, 1);
        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, 0), &text("B"));
    }
}
