//! Fault-type categories and the row views built from them

use serde::{Deserialize, Serialize};

/// Rule selecting rows for one output sheet by their fault type
///
/// A row matches when `include` is empty or lists its lowercased fault type,
/// and `exclude` does not. Rows whose fault type is not text never appear in
/// `include` or `exclude`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Sheet name
    pub name: String,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl CategoryRule {
    pub fn including(name: &str, values: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            include: values.iter().map(|v| v.to_string()).collect(),
            exclude: Vec::new(),
        }
    }

    pub fn excluding(name: &str, values: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            include: Vec::new(),
            exclude: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Check a fault type against this rule
    pub fn matches(&self, fault_type: Option<&str>) -> bool {
        let key = fault_type.map(str::to_lowercase);
        let listed = |values: &[String]| match &key {
            Some(k) => values.iter().any(|v| v.to_lowercase() == *k),
            None => false,
        };

        (self.include.is_empty() || listed(&self.include)) && !listed(&self.exclude)
    }
}

/// The standard NDN sheets, in output order
pub fn default_categories() -> Vec<CategoryRule> {
    vec![
        CategoryRule::excluding("Valid", &["3rd party provider"]),
        CategoryRule::including("Fiber", &["cable fault", "other", "others"]),
        CategoryRule::including("Power", &["power problem"]),
        CategoryRule::including("Equipment", &["equipment fault"]),
        CategoryRule::including("3rd Party", &["3rd party provider"]),
    ]
}

/// Rows of the shared table that belong to one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView {
    pub name: String,
    pub rows: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheets_for(fault_type: Option<&str>) -> Vec<String> {
        default_categories()
            .into_iter()
            .filter(|c| c.matches(fault_type))
            .map(|c| c.name)
            .collect()
    }

    #[test]
    fn test_power_problem_is_power_and_valid() {
        assert_eq!(sheets_for(Some("Power Problem")), vec!["Valid", "Power"]);
    }

    #[test]
    fn test_third_party_only_in_its_own_sheet() {
        assert_eq!(sheets_for(Some("3rd Party Provider")), vec!["3rd Party"]);
    }

    #[test]
    fn test_fiber_aliases() {
        for ft in ["Cable Fault", "OTHER", "others"] {
            assert_eq!(sheets_for(Some(ft)), vec!["Valid", "Fiber"], "fault type {}", ft);
        }
    }

    #[test]
    fn test_unlisted_and_non_text_fault_types_are_valid_only() {
        assert_eq!(sheets_for(Some("unknown")), vec!["Valid"]);
        assert_eq!(sheets_for(None), vec!["Valid"]);
    }

    #[test]
    fn test_rule_values_compare_case_insensitively() {
        let rule = CategoryRule::including("Power", &["Power Problem"]);
        assert!(rule.matches(Some("POWER PROBLEM")));
    }
}
