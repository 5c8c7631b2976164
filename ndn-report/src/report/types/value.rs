//! Cell value representation for raw and normalized report rows

use calamine::Data;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// ISO 8601 duration as produced by ODS time cells, e.g. `PT02H30M00S`
static ISO_DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+(?:\.\d+)?)S)?$").expect("valid duration pattern")
});

/// A single spreadsheet cell, resolved once when the sheet is read
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Blank cell (also used for spreadsheet error cells)
    Empty,
    /// Free text
    Text(String),
    /// Plain number
    Number(f64),
    /// Boolean
    Bool(bool),
    /// Date and/or time as an Excel serial day number.
    /// The fractional part is the time of day.
    DateTime(f64),
    /// Elapsed time in days (`[h]:mm` cells, ODS durations)
    Duration(f64),
}

impl CellValue {
    /// Convert a calamine cell into a report value
    pub fn from_data(cell: &Data) -> Self {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) if dt.is_duration() => CellValue::Duration(dt.as_f64()),
            Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
            Data::DateTimeIso(s) => parse_iso_datetime(s)
                .map(CellValue::DateTime)
                .unwrap_or_else(|| CellValue::Text(s.clone())),
            Data::DurationIso(s) => parse_iso_duration(s)
                .map(CellValue::Duration)
                .unwrap_or_else(|| CellValue::Text(s.clone())),
            Data::Error(_) => CellValue::Empty,
        }
    }

    /// True for empty cells and whitespace-only text
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Try to get as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True when this is text containing `needle`, ignoring case
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        self.as_text()
            .map(|s| s.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::DateTime(serial) => write!(f, "{}", serial),
            CellValue::Duration(days) => write!(f, "{}", days),
        }
    }
}

/// Excel serial day number for a date and time (1900 date system)
pub fn excel_serial(dt: NaiveDateTime) -> f64 {
    // Serial 0 of the 1900 date system; absorbs the phantom 1900-02-29
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default();
    let days = (dt.date() - epoch).num_days() as f64;
    days + time_fraction(dt.time())
}

/// Fraction of a day elapsed at `time`
pub fn time_fraction(time: NaiveTime) -> f64 {
    time.num_seconds_from_midnight() as f64 / SECONDS_PER_DAY
}

/// Fraction of a day for a duration; may exceed 1.0
pub fn duration_fraction(hours: u64, minutes: u64, seconds: f64) -> f64 {
    (hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds) / SECONDS_PER_DAY
}

fn parse_iso_datetime(s: &str) -> Option<f64> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(excel_serial(dt));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(excel_serial(d.and_hms_opt(0, 0, 0)?));
    }
    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M:%S%.f") {
        return Some(time_fraction(t));
    }
    None
}

fn parse_iso_duration(s: &str) -> Option<f64> {
    let caps = ISO_DURATION.captures(s)?;
    let hours = caps.get(1).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
    let minutes = caps.get(2).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
    let seconds = caps.get(3).map_or(Ok(0.0), |m| m.as_str().parse()).ok()?;
    Some(duration_fraction(hours, minutes, seconds))
}
