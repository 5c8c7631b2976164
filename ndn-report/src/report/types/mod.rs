//! Core types for report transformation

mod category;
mod table;
mod value;

pub use category::{CategoryRule, CategoryView, default_categories};
pub use table::Table;
pub use value::{CellValue, duration_fraction, excel_serial, time_fraction};
