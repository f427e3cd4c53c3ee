//! Form field value objects

/// Input constraint applied while typing
///
/// Constraints coerce or reject characters at input time; they never raise
/// validation errors themselves. Presence and parseability are re-checked
/// when the form is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputConstraint {
    /// Free text up to a maximum length
    MaxLength(usize),
    /// ASCII digits only
    Integer,
    /// Digits with at most one decimal point
    Decimal,
    /// Digits and slashes in dd/MM/yyyy shape
    Date,
}

/// Length of a full dd/MM/yyyy date
const DATE_INPUT_LEN: usize = 10;

/// A single editable form field with its constraint, raw value, and any
/// inline validation message from the last submit attempt
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: String,
    pub constraint: InputConstraint,
    pub error: Option<String>,
}

impl FormField {
    fn new(name: &str, label: &str, constraint: InputConstraint) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: String::new(),
            constraint,
            error: None,
        }
    }

    /// Create a text field capped at `max_len` characters
    pub fn text(name: &str, label: &str, max_len: usize) -> Self {
        Self::new(name, label, InputConstraint::MaxLength(max_len))
    }

    /// Create an integer-only field
    pub fn integer(name: &str, label: &str) -> Self {
        Self::new(name, label, InputConstraint::Integer)
    }

    /// Create a decimal field
    pub fn decimal(name: &str, label: &str) -> Self {
        Self::new(name, label, InputConstraint::Decimal)
    }

    /// Create a dd/MM/yyyy date field
    pub fn date(name: &str, label: &str) -> Self {
        Self::new(name, label, InputConstraint::Date)
    }

    /// Builder-style initial value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Push a character, applying the field's constraint
    pub fn push_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        match self.constraint {
            InputConstraint::MaxLength(max_len) => {
                if self.value.chars().count() < max_len {
                    self.value.push(c);
                }
            }
            InputConstraint::Integer => {
                if c.is_ascii_digit() {
                    self.value.push(c);
                }
            }
            InputConstraint::Decimal => {
                if c.is_ascii_digit() || (c == '.' && !self.value.contains('.')) {
                    self.value.push(c);
                }
            }
            InputConstraint::Date => {
                if (c.is_ascii_digit() || c == '/') && self.value.chars().count() < DATE_INPUT_LEN {
                    self.value.push(c);
                }
            }
        }
    }

    /// Remove the last character
    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    /// Clear the value and any inline error
    #[allow(dead_code)]
    pub fn clear(&mut self) {
        self.value.clear();
        self.error = None;
    }
}
