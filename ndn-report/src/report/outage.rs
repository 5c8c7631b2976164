//! Classification of Outage cells into durations

use chrono::{NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Markers;

use super::types::{CellValue, duration_fraction, excel_serial, time_fraction};

/// `H:MM` or `H:MM:SS`; hours may run past 24 for long outages
static CLOCK_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,4}):([0-5]\d)(?::([0-5]\d(?:\.\d+)?))?$").expect("valid time pattern")
});

/// 12-hour clock readings, e.g. `2:30 PM`
const CLOCK_12H_FORMATS: &[&str] = &["%I:%M %p", "%I:%M:%S %p"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %I:%M:%S %p",
    "%d/%m/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

/// What an Outage cell holds once normalized
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutageValue {
    /// No outage recorded; rendered as the no-outage marker
    Missing,
    /// Time of day as a fraction of a day (Excel serial for datetimes)
    TimeOfDay(f64),
    /// Elapsed duration of a day or more, as a day count
    Elapsed(f64),
    /// Anything else; written back untouched
    Unrecognized,
}

impl OutageValue {
    /// Classify a normalized Outage cell
    pub fn classify(cell: &CellValue, markers: &Markers) -> Self {
        match cell {
            CellValue::Empty => OutageValue::Missing,
            CellValue::Text(s) if s.is_empty() || *s == markers.unknown || *s == markers.no_outage => {
                OutageValue::Missing
            }
            CellValue::Text(s) if s.contains(':') => {
                parse_time_text(s).unwrap_or(OutageValue::Unrecognized)
            }
            CellValue::DateTime(serial) => OutageValue::TimeOfDay(*serial),
            CellValue::Duration(days) => OutageValue::duration(*days),
            _ => OutageValue::Unrecognized,
        }
    }

    /// A duration below one day reads the same as a time of day
    pub fn duration(days: f64) -> Self {
        if days >= 1.0 {
            OutageValue::Elapsed(days)
        } else {
            OutageValue::TimeOfDay(days)
        }
    }

    /// Day value written into the Outage cell
    pub fn days(&self) -> Option<f64> {
        match self {
            OutageValue::TimeOfDay(days) | OutageValue::Elapsed(days) => Some(*days),
            _ => None,
        }
    }

    /// Decimal hours for a recognized time
    pub fn hours(&self) -> Option<f64> {
        self.days().map(|days| days * 24.0)
    }
}

/// Parse a textual time (optionally with a date) into an outage value
pub fn parse_time_text(s: &str) -> Option<OutageValue> {
    let s = s.trim();

    if let Some(caps) = CLOCK_TIME.captures(s) {
        let hours = caps[1].parse().ok()?;
        let minutes = caps[2].parse().ok()?;
        let seconds = caps.get(3).map_or(Ok(0.0), |m| m.as_str().parse()).ok()?;
        return Some(OutageValue::duration(duration_fraction(hours, minutes, seconds)));
    }

    if let Some(time) = CLOCK_12H_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
    {
        return Some(OutageValue::TimeOfDay(time_fraction(time)));
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| OutageValue::TimeOfDay(excel_serial(dt)))
}
