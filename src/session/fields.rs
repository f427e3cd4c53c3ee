//! Raw field values exchanged between forms and sessions

use std::collections::BTreeMap;

/// Key→string map carrying raw form input into a session and formatted
/// entity values back out of it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    values: BTreeMap<String, String>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, replacing any previous value for the same name
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style `set`
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Get the raw value for a field (absent fields return None)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Get the trimmed value, treating absent and whitespace-only as None
    pub fn get_present(&self, name: &str) -> Option<&str> {
        self.get(name).map(str::trim).filter(|v| !v.is_empty())
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over (name, value) pairs in field-name order
    #[allow(dead_code)]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_field_is_none() {
        let values = FieldValues::new();
        assert!(values.get("name").is_none());
        assert!(values.is_empty());
    }

    #[test]
    fn test_set_and_get() {
        let mut values = FieldValues::new();
        values.set("name", "Books");
        assert_eq!(values.get("name"), Some("Books"));
    }

    #[test]
    fn test_set_replaces_previous_value() {
        let mut values = FieldValues::new();
        values.set("name", "Books");
        values.set("name", "Music");
        assert_eq!(values.get("name"), Some("Music"));
    }

    #[test]
    fn test_with_builder() {
        let values = FieldValues::new().with("id", "1").with("name", "Books");
        assert_eq!(values.get("id"), Some("1"));
        assert_eq!(values.get("name"), Some("Books"));
    }

    #[test]
    fn test_get_present_trims_whitespace() {
        let values = FieldValues::new()
            .with("name", "  Books  ")
            .with("email", "   ");
        assert_eq!(values.get_present("name"), Some("Books"));
        assert!(values.get_present("email").is_none());
        assert!(values.get_present("missing").is_none());
    }

    #[test]
    fn test_iter_is_ordered_by_name() {
        let values = FieldValues::new().with("b", "2").with("a", "1");
        let pairs: Vec<_> = values.iter().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2")]);
    }
}
