//! Form state management and form structs

use super::field::FormField;
use crate::session::{FieldValues, ValidationErrors};
use crate::state::Department;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> &mut FormField;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Enum representing all possible form states
#[derive(Debug, Clone, Default)]
pub enum FormState {
    #[default]
    None,
    Department(DepartmentForm),
    Seller(SellerForm),
}

impl FormState {
    pub fn next_field(&mut self) {
        match self {
            FormState::None => {}
            FormState::Department(f) => f.next_field(),
            FormState::Seller(f) => f.next_field(),
        }
    }

    pub fn prev_field(&mut self) {
        match self {
            FormState::None => {}
            FormState::Department(f) => f.prev_field(),
            FormState::Seller(f) => f.prev_field(),
        }
    }

    pub fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self {
            FormState::None => None,
            FormState::Department(f) => Some(f.get_active_field_mut()),
            FormState::Seller(f) => {
                if f.is_department_selector_active() {
                    None
                } else {
                    Some(f.get_active_field_mut())
                }
            }
        }
    }
}

// Department form (create and edit)
#[derive(Debug, Clone)]
pub struct DepartmentForm {
    pub id: FormField,
    pub name: FormField,
    pub active_field_index: usize,
    pub editing: bool,
}

impl DepartmentForm {
    pub fn new() -> Self {
        Self {
            id: FormField::integer("id", "Id"),
            name: FormField::text("name", "Name", 30),
            active_field_index: 1, // the id is usually left for the store to assign
            editing: false,
        }
    }

    /// Form pre-filled from a session's populated field values
    pub fn from_values(values: &FieldValues) -> Self {
        let mut form = Self::new();
        form.id = form.id.with_value(values.get("id").unwrap_or_default());
        form.name = form.name.with_value(values.get("name").unwrap_or_default());
        form.editing = true;
        form
    }

    /// Raw values for a submit attempt
    pub fn field_values(&self) -> FieldValues {
        FieldValues::new()
            .with("id", self.id.value.clone())
            .with("name", self.name.value.clone())
    }

    /// Route per-field messages to their fields, clearing the rest
    pub fn apply_errors(&mut self, errors: &ValidationErrors) {
        for field in [&mut self.id, &mut self.name] {
            field.error = errors.get(&field.name).map(str::to_string);
        }
    }
}

impl Default for DepartmentForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for DepartmentForm {
    fn field_count(&self) -> usize {
        2
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(1);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.id,
            _ => &mut self.name,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.id),
            1 => Some(&self.name),
            _ => None,
        }
    }
}

/// Index of the department selector row on the seller form
const DEPARTMENT_SELECTOR_INDEX: usize = 5;

// Seller form (create and edit)
#[derive(Debug, Clone)]
pub struct SellerForm {
    pub id: FormField,
    pub name: FormField,
    pub email: FormField,
    pub birth_date: FormField,
    pub base_salary: FormField,
    /// Departments offered by the reference selector
    pub departments: Vec<Department>,
    /// Index into `departments` of the selected entry
    pub selected_department: usize,
    pub active_field_index: usize,
    pub editing: bool,
}

impl SellerForm {
    pub fn new() -> Self {
        Self {
            id: FormField::integer("id", "Id"),
            name: FormField::text("name", "Name", 70),
            email: FormField::text("email", "Email", 60),
            birth_date: FormField::date("birth_date", "Birth date (dd/mm/yyyy)"),
            base_salary: FormField::decimal("base_salary", "Base salary"),
            departments: Vec::new(),
            selected_department: 0,
            active_field_index: 1,
            editing: false,
        }
    }

    /// Form pre-filled from a session's populated field values
    pub fn from_values(values: &FieldValues) -> Self {
        let mut form = Self::new();
        form.id = form.id.with_value(values.get("id").unwrap_or_default());
        form.name = form.name.with_value(values.get("name").unwrap_or_default());
        form.email = form
            .email
            .with_value(values.get("email").unwrap_or_default());
        form.birth_date = form
            .birth_date
            .with_value(values.get("birth_date").unwrap_or_default());
        form.base_salary = form
            .base_salary
            .with_value(values.get("base_salary").unwrap_or_default());
        form.editing = true;
        form
    }

    /// Load the reference-selection list, preselecting the given department
    /// or falling back to the first entry
    pub fn set_departments(&mut self, departments: Vec<Department>, selected_id: Option<u32>) {
        self.selected_department = selected_id
            .and_then(|id| departments.iter().position(|d| d.id == Some(id)))
            .unwrap_or(0);
        self.departments = departments;
    }

    /// The department currently offered by the selector, if any
    pub fn selected_department(&self) -> Option<&Department> {
        self.departments.get(self.selected_department)
    }

    pub fn is_department_selector_active(&self) -> bool {
        self.active_field_index == DEPARTMENT_SELECTOR_INDEX
    }

    /// Move the selector to the next department (wraps around)
    pub fn next_department(&mut self) {
        if !self.departments.is_empty() {
            self.selected_department = (self.selected_department + 1) % self.departments.len();
        }
    }

    /// Move the selector to the previous department (wraps around)
    pub fn prev_department(&mut self) {
        if self.departments.is_empty() {
            return;
        }
        if self.selected_department == 0 {
            self.selected_department = self.departments.len() - 1;
        } else {
            self.selected_department -= 1;
        }
    }

    /// Raw values for a submit attempt
    pub fn field_values(&self) -> FieldValues {
        let department_id = self
            .selected_department()
            .and_then(|d| d.id)
            .map(|id| id.to_string())
            .unwrap_or_default();

        FieldValues::new()
            .with("id", self.id.value.clone())
            .with("name", self.name.value.clone())
            .with("email", self.email.value.clone())
            .with("birth_date", self.birth_date.value.clone())
            .with("base_salary", self.base_salary.value.clone())
            .with("department_id", department_id)
    }

    /// Route per-field messages to their fields, clearing the rest
    pub fn apply_errors(&mut self, errors: &ValidationErrors) {
        for field in [
            &mut self.id,
            &mut self.name,
            &mut self.email,
            &mut self.birth_date,
            &mut self.base_salary,
        ] {
            field.error = errors.get(&field.name).map(str::to_string);
        }
    }
}

impl Default for SellerForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for SellerForm {
    fn field_count(&self) -> usize {
        6 // five text fields plus the department selector
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(DEPARTMENT_SELECTOR_INDEX);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.id,
            1 => &mut self.name,
            2 => &mut self.email,
            3 => &mut self.birth_date,
            // For the selector row (index 5), return base_salary as dummy
            // (won't be used for text input)
            _ => &mut self.base_salary,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.id),
            1 => Some(&self.name),
            2 => Some(&self.email),
            3 => Some(&self.birth_date),
            4 => Some(&self.base_salary),
            // Index 5 is the department selector, no FormField for it
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{FormEntity, REQUIRED_MESSAGE};
    use crate::state::Seller;
    use chrono::NaiveDate;

    fn test_departments() -> Vec<Department> {
        [(1, "Computers"), (2, "Electronics"), (4, "Books")]
            .map(|(id, name)| Department {
                id: Some(id),
                name: name.to_string(),
            })
            .to_vec()
    }

    fn test_seller() -> Seller {
        Seller {
            id: Some(3),
            name: "Alex Grey".to_string(),
            email: "alex@gmail.com".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1988, 1, 15).unwrap(),
            base_salary: 2200.0,
            department_id: Some(2),
        }
    }

    mod form_state_enum {
        use super::*;

        #[test]
        fn test_default_is_none() {
            let state = FormState::default();
            assert!(matches!(state, FormState::None));
        }

        #[test]
        fn test_next_field_on_none_is_noop() {
            let mut state = FormState::None;
            state.next_field(); // Should not panic
        }

        #[test]
        fn test_get_active_field_mut_none_returns_none() {
            let mut state = FormState::None;
            assert!(state.get_active_field_mut().is_none());
        }

        #[test]
        fn test_next_field_advances_department_form() {
            let mut form = DepartmentForm::new();
            form.active_field_index = 0;
            let mut state = FormState::Department(form);
            state.next_field();
            if let FormState::Department(ref f) = state {
                assert_eq!(f.active_field_index, 1);
            }
        }

        #[test]
        fn test_no_text_field_on_department_selector_row() {
            let mut form = SellerForm::new();
            form.active_field_index = 5;
            let mut state = FormState::Seller(form);
            assert!(state.get_active_field_mut().is_none());
        }
    }

    mod department_form {
        use super::*;

        #[test]
        fn test_new_starts_on_name_field() {
            let form = DepartmentForm::new();
            assert_eq!(form.active_field_index, 1);
            assert!(!form.editing);
            assert_eq!(form.id.value, "");
            assert_eq!(form.name.value, "");
        }

        #[test]
        fn test_field_navigation_wraps() {
            let mut form = DepartmentForm::new();
            form.next_field();
            assert_eq!(form.active_field_index, 0);
            form.prev_field();
            assert_eq!(form.active_field_index, 1);
        }

        #[test]
        fn test_from_values_loads_and_marks_editing() {
            let department = Department {
                id: Some(4),
                name: "Books".to_string(),
            };
            let form = DepartmentForm::from_values(&department.to_fields());
            assert!(form.editing);
            assert_eq!(form.id.value, "4");
            assert_eq!(form.name.value, "Books");
        }

        #[test]
        fn test_field_values_round_trip() {
            let department = Department {
                id: Some(4),
                name: "Books".to_string(),
            };
            let form = DepartmentForm::from_values(&department.to_fields());
            assert_eq!(form.field_values(), department.to_fields());
        }

        #[test]
        fn test_apply_errors_routes_by_field_name() {
            let mut form = DepartmentForm::new();
            let mut errors = ValidationErrors::new();
            errors.add("name", REQUIRED_MESSAGE);
            form.apply_errors(&errors);
            assert_eq!(form.name.error.as_deref(), Some(REQUIRED_MESSAGE));
            assert!(form.id.error.is_none());
        }

        #[test]
        fn test_apply_errors_clears_stale_messages() {
            let mut form = DepartmentForm::new();
            form.name.error = Some(REQUIRED_MESSAGE.to_string());
            form.apply_errors(&ValidationErrors::new());
            assert!(form.name.error.is_none());
        }

        #[test]
        fn test_get_field_returns_correct_fields() {
            let form = DepartmentForm::new();
            assert_eq!(form.get_field(0).unwrap().name, "id");
            assert_eq!(form.get_field(1).unwrap().name, "name");
            assert!(form.get_field(2).is_none());
        }
    }

    mod seller_form {
        use super::*;

        #[test]
        fn test_field_count_includes_selector() {
            let form = SellerForm::new();
            assert_eq!(form.field_count(), 6);
        }

        #[test]
        fn test_from_values_loads_formatted_values() {
            let form = SellerForm::from_values(&test_seller().to_fields());
            assert!(form.editing);
            assert_eq!(form.id.value, "3");
            assert_eq!(form.name.value, "Alex Grey");
            assert_eq!(form.email.value, "alex@gmail.com");
            assert_eq!(form.birth_date.value, "15/01/1988");
            assert_eq!(form.base_salary.value, "2200.00");
        }

        #[test]
        fn test_set_departments_preselects_by_id() {
            let mut form = SellerForm::new();
            form.set_departments(test_departments(), Some(2));
            assert_eq!(form.selected_department, 1);
            assert_eq!(form.selected_department().unwrap().name, "Electronics");
        }

        #[test]
        fn test_set_departments_falls_back_to_first() {
            let mut form = SellerForm::new();
            form.set_departments(test_departments(), None);
            assert_eq!(form.selected_department, 0);
            form.set_departments(test_departments(), Some(99));
            assert_eq!(form.selected_department, 0);
        }

        #[test]
        fn test_department_cycling_wraps() {
            let mut form = SellerForm::new();
            form.set_departments(test_departments(), None);
            form.prev_department();
            assert_eq!(form.selected_department, 2);
            form.next_department();
            assert_eq!(form.selected_department, 0);
        }

        #[test]
        fn test_department_cycling_on_empty_list_is_noop() {
            let mut form = SellerForm::new();
            form.next_department();
            form.prev_department();
            assert_eq!(form.selected_department, 0);
            assert!(form.selected_department().is_none());
        }

        #[test]
        fn test_field_values_carry_selected_department() {
            let mut form = SellerForm::from_values(&test_seller().to_fields());
            form.set_departments(test_departments(), test_seller().department_id);
            assert_eq!(form.field_values(), test_seller().to_fields());
        }

        #[test]
        fn test_field_values_without_departments_leave_reference_blank() {
            let form = SellerForm::new();
            assert_eq!(form.field_values().get("department_id"), Some(""));
        }

        #[test]
        fn test_apply_errors_routes_by_field_name() {
            let mut form = SellerForm::new();
            let mut errors = ValidationErrors::new();
            errors.add("email", REQUIRED_MESSAGE);
            errors.add("base_salary", "Invalid number");
            form.apply_errors(&errors);
            assert_eq!(form.email.error.as_deref(), Some(REQUIRED_MESSAGE));
            assert_eq!(form.base_salary.error.as_deref(), Some("Invalid number"));
            assert!(form.name.error.is_none());
        }

        #[test]
        fn test_get_field_returns_correct_fields() {
            let form = SellerForm::new();
            assert_eq!(form.get_field(0).unwrap().name, "id");
            assert_eq!(form.get_field(1).unwrap().name, "name");
            assert_eq!(form.get_field(2).unwrap().name, "email");
            assert_eq!(form.get_field(3).unwrap().name, "birth_date");
            assert_eq!(form.get_field(4).unwrap().name, "base_salary");
            assert!(form.get_field(5).is_none()); // selector row
        }
    }
}
