//! Partition normalized rows into category views

use super::types::{CategoryRule, CategoryView, Table};

/// Evaluate every category independently against each row's fault type.
///
/// Views hold row indices into `table`, so a row matching several categories
/// is shared rather than copied.
pub fn partition(
    table: &Table,
    fault_type_col: Option<usize>,
    categories: &[CategoryRule],
) -> Vec<CategoryView> {
    let fault_types: Vec<Option<&str>> = (0..table.len())
        .map(|row| fault_type_col.and_then(|col| table.cell(row, col).as_text()))
        .collect();

    categories
        .iter()
        .map(|category| {
            let rows: Vec<usize> = fault_types
                .iter()
                .enumerate()
                .filter(|(_, ft)| category.matches(**ft))
                .map(|(row, _)| row)
                .collect();

            log::debug!("Category '{}': {} rows", category.name, rows.len());
            CategoryView {
                name: category.name.clone(),
                rows,
            }
        })
        .collect()
}
