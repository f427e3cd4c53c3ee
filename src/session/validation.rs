//! Required-field validation shared by all entity forms

use std::collections::BTreeMap;

/// Message for a required field left blank
pub const REQUIRED_MESSAGE: &str = "Field can't be empty";

/// Message for a non-blank value that fails numeric parsing
pub const INVALID_NUMBER_MESSAGE: &str = "Invalid number";

/// Message for a non-blank value that fails date parsing
pub const INVALID_DATE_MESSAGE: &str = "Invalid date";

/// Per-field validation messages keyed by field name
///
/// Built fresh for each submit attempt. Holds at most one message per
/// field; callers route messages to UI elements by field name, not by
/// message text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field, replacing any earlier one
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    #[allow(dead_code)]
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Invalid field names in name order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }
}

/// Check presence for each (field, raw value) pair
///
/// A value is absent when it is None or whitespace-only. Every failing
/// field gets one `REQUIRED_MESSAGE` entry; the check never stops at the
/// first failure.
pub fn check_required<'a, I>(fields: I) -> ValidationErrors
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let mut errors = ValidationErrors::new();
    for (name, value) in fields {
        if value.map_or(true, |v| v.trim().is_empty()) {
            errors.add(name, REQUIRED_MESSAGE);
        }
    }
    errors
}
