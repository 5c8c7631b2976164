//! Spreadsheet I/O for the outage report

mod reader;
mod writer;

pub use reader::read_first_sheet;
pub use writer::{OutageTally, write_report};
