//! Report configuration (loaded from config.toml)
//!
//! Every field defaults to the standard NDN layout, so an empty file or no
//! file at all yields the stock report.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ReportError;
use crate::report::{CategoryRule, default_categories};

/// Excel's limit on worksheet name length
const MAX_SHEET_NAME_LEN: usize = 31;
const FORBIDDEN_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    pub columns: ColumnNames,
    pub exclusions: ExclusionRules,
    pub markers: Markers,
    pub output: OutputConfig,
    pub categories: Vec<CategoryRule>,
}

/// Header names the transform looks up in the input
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ColumnNames {
    pub status: String,
    pub fault_type: String,
    pub outage: String,
    /// Name of the derived column inserted left of the outage column
    pub hours: String,
}

/// Case-insensitive substrings that drop a row
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExclusionRules {
    pub status_contains: String,
    pub fault_type_contains: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Markers {
    /// Written into blank cells
    pub unknown: String,
    /// Written into outage cells that carry no duration
    pub no_outage: String,
    /// Number format for recognized outage times
    pub time_format: String,
    /// Number format for outage durations of a day or more
    pub elapsed_format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Suggested file name for the generated report
    pub file_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            columns: ColumnNames::default(),
            exclusions: ExclusionRules::default(),
            markers: Markers::default(),
            output: OutputConfig::default(),
            categories: default_categories(),
        }
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            status: "Status".to_string(),
            fault_type: "Fault Type".to_string(),
            outage: "Outage".to_string(),
            hours: "Hours".to_string(),
        }
    }
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self {
            status_contains: "fault cancel".to_string(),
            fault_type_contains: "fault cancelled".to_string(),
        }
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            unknown: "unknown".to_string(),
            no_outage: "none".to_string(),
            time_format: "HH:MM".to_string(),
            elapsed_format: "[HH]:MM".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: "NDN_2024_Cleaned_Report.xlsx".to_string(),
        }
    }
}

impl ReportConfig {
    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: ReportConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Location of the per-user config file (~/.config/ndn-report/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ndn-report").join("config.toml"))
    }

    /// Load from an explicit path, else the per-user file if present, else defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                log::debug!("Using config file: {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ReportError> {
        if self.categories.is_empty() {
            return Err(ReportError::Config("at least one category is required".into()));
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            let name = category.name.as_str();
            if name.is_empty() || name.chars().count() > MAX_SHEET_NAME_LEN {
                return Err(ReportError::Config(format!(
                    "category name '{}' must be 1-{} characters",
                    name, MAX_SHEET_NAME_LEN
                )));
            }
            if name.contains(FORBIDDEN_SHEET_CHARS) {
                return Err(ReportError::Config(format!(
                    "category name '{}' contains a character not allowed in sheet names",
                    name
                )));
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(ReportError::Config(format!(
                    "duplicate category name '{}'",
                    name
                )));
            }
        }

        let cols = &self.columns;
        for (key, value) in [
            ("status", &cols.status),
            ("fault_type", &cols.fault_type),
            ("outage", &cols.outage),
            ("hours", &cols.hours),
        ] {
            if value.is_empty() {
                return Err(ReportError::Config(format!("column name '{}' is empty", key)));
            }
        }
        if cols.hours == cols.outage {
            return Err(ReportError::Config(
                "hours and outage columns must have different names".into(),
            ));
        }

        Ok(())
    }
}
