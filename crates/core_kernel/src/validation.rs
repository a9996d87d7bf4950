//! Field-keyed validation results
//!
//! Form validators never fail with `Err`. They collect one message per
//! field into a `ValidationResult`, which the caller renders inline next to
//! the offending input. An empty result means the input is valid.
//!
//! Field keys use the wire (camelCase) names of the form fields. Items in a
//! list are addressed as `list[index].field`, e.g.
//! `coverageBreakdown[1].requestedAmount`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of validating a form payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// One error message per field key
    pub errors: BTreeMap<String, String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self::default()
    }

    /// Whether no errors were recorded
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records an error for a field
    ///
    /// The first message for a field wins; later checks on the same field
    /// are usually consequences of the first failure.
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Returns the error for a field, if any
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Whether an error was recorded for a field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Removes a single field's error, typically when the user edits it
    pub fn clear_field(&mut self, field: &str) {
        self.errors.remove(field);
    }

    /// Merges another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        for (field, message) in other.errors {
            self.add_error(field, message);
        }
    }

    /// Merges a nested result, prefixing its keys
    pub fn merge_prefixed(&mut self, prefix: &str, other: ValidationResult) {
        for (field, message) in other.errors {
            self.add_error(format!("{prefix}.{field}"), message);
        }
    }

    /// Number of recorded errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether no errors were recorded
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Key of a field inside a list item, e.g. `coverageBreakdown[0].coverageType`
pub fn item_field(list: &str, index: usize, field: &str) -> String {
    format!("{list}[{index}].{field}")
}

/// Character count of a trimmed input, as a user would count it
pub fn trimmed_len(input: &str) -> usize {
    input.trim().chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_is_valid() {
        assert!(ValidationResult::ok().is_valid());
    }

    #[test]
    fn test_first_error_for_field_wins() {
        let mut result = ValidationResult::ok();
        result.add_error("reason", "Reason is required");
        result.add_error("reason", "Reason is too short");
        assert_eq!(result.error_for("reason"), Some("Reason is required"));
        assert_eq!(result.len(), 1);
        assert!(!result.is_valid());
    }

    #[test]
    fn test_merge_prefixed() {
        let mut inner = ValidationResult::ok();
        inner.add_error("name", "Name is required");

        let mut outer = ValidationResult::ok();
        outer.merge_prefixed("dependents[0]", inner);
        assert!(outer.has_error("dependents[0].name"));
    }

    #[test]
    fn test_clear_field() {
        let mut result = ValidationResult::ok();
        result.add_error("email", "Email is required");
        result.clear_field("email");
        assert!(result.is_valid());
    }

    #[test]
    fn test_item_field_and_trimmed_len() {
        assert_eq!(item_field("coverageBreakdown", 2, "notes"), "coverageBreakdown[2].notes");
        assert_eq!(trimmed_len("  héllo  "), 5);
    }
}
