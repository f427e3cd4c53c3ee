//! Domain entities managed by the app

use crate::session::{
    check_required, FieldValues, FormEntity, ValidationErrors, INVALID_DATE_MESSAGE,
    INVALID_NUMBER_MESSAGE,
};
use crate::store::StoredEntity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display and input pattern for seller birth dates
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// A sales department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: Option<u32>,
    pub name: String,
}

/// A seller attached to at most one department
///
/// The department reference is held by id; display names resolve through
/// the loaded department list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: Option<u32>,
    pub name: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub base_salary: f64,
    pub department_id: Option<u32>,
}

impl Seller {
    /// Salary formatted for display
    pub fn salary_display(&self) -> String {
        format!("{:.2}", self.base_salary)
    }

    /// Birth date formatted for display
    pub fn birth_date_display(&self) -> String {
        self.birth_date.format(DATE_FORMAT).to_string()
    }
}

/// Parse an optional integer id field
///
/// Blank means unassigned; a non-blank value that is not an integer gets a
/// per-field error.
fn parse_id(name: &str, raw: Option<&str>, errors: &mut ValidationErrors) -> Option<u32> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<u32>() {
        Ok(id) => Some(id),
        Err(_) => {
            errors.add(name, INVALID_NUMBER_MESSAGE);
            None
        }
    }
}

/// Parse a required decimal field
///
/// Blank values are already reported by the presence check; the returned
/// value only matters when no error was recorded, since an errored draft
/// is discarded.
fn parse_decimal(name: &str, raw: Option<&str>, errors: &mut ValidationErrors) -> f64 {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            errors.add(name, INVALID_NUMBER_MESSAGE);
            0.0
        }
    }
}

/// Parse a required `dd/MM/yyyy` date field
fn parse_date(name: &str, raw: Option<&str>, errors: &mut ValidationErrors) -> NaiveDate {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return NaiveDate::default();
    }
    match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        Ok(date) => date,
        Err(_) => {
            errors.add(name, INVALID_DATE_MESSAGE);
            NaiveDate::default()
        }
    }
}

fn id_display(id: Option<u32>) -> String {
    id.map(|v| v.to_string()).unwrap_or_default()
}

impl FormEntity for Department {
    fn required_fields() -> &'static [&'static str] {
        &["name"]
    }

    fn from_fields(fields: &FieldValues) -> Result<Self, ValidationErrors> {
        let mut errors = check_required(
            Self::required_fields()
                .iter()
                .map(|&name| (name, fields.get(name))),
        );

        let id = parse_id("id", fields.get("id"), &mut errors);
        let name = fields.get_present("name").unwrap_or_default().to_string();

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Self { id, name })
    }

    fn to_fields(&self) -> FieldValues {
        FieldValues::new()
            .with("id", id_display(self.id))
            .with("name", self.name.clone())
    }
}

impl FormEntity for Seller {
    fn required_fields() -> &'static [&'static str] {
        &["name", "email", "birth_date", "base_salary"]
    }

    fn from_fields(fields: &FieldValues) -> Result<Self, ValidationErrors> {
        let mut errors = check_required(
            Self::required_fields()
                .iter()
                .map(|&name| (name, fields.get(name))),
        );

        let id = parse_id("id", fields.get("id"), &mut errors);
        let name = fields.get_present("name").unwrap_or_default().to_string();
        let email = fields.get_present("email").unwrap_or_default().to_string();
        let birth_date = parse_date("birth_date", fields.get("birth_date"), &mut errors);
        let base_salary = parse_decimal("base_salary", fields.get("base_salary"), &mut errors);
        let department_id = parse_id("department_id", fields.get("department_id"), &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Self {
            id,
            name,
            email,
            birth_date,
            base_salary,
            department_id,
        })
    }

    fn to_fields(&self) -> FieldValues {
        FieldValues::new()
            .with("id", id_display(self.id))
            .with("name", self.name.clone())
            .with("email", self.email.clone())
            .with("birth_date", self.birth_date_display())
            .with("base_salary", self.salary_display())
            .with("department_id", id_display(self.department_id))
    }
}

impl StoredEntity for Department {
    fn id(&self) -> Option<u32> {
        self.id
    }

    fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    fn sort_key(&self) -> String {
        self.name.to_lowercase()
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.name.to_lowercase())
    }

    fn conflict_message(&self) -> String {
        format!("A department named '{}' already exists", self.name)
    }
}

impl StoredEntity for Seller {
    fn id(&self) -> Option<u32> {
        self.id
    }

    fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    fn sort_key(&self) -> String {
        self.name.to_lowercase()
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.email.to_lowercase())
    }

    fn conflict_message(&self) -> String {
        format!("A seller with email '{}' already exists", self.email)
    }
}
