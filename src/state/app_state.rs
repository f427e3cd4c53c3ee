//! Application state definitions

use super::entities::{Department, Seller};
use super::forms::FormState;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Departments,
    Sellers,
    DepartmentForm,
    SellerForm,
}

/// Sort field for the departments list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepartmentSortField {
    #[default]
    Name,
    Id,
}

impl DepartmentSortField {
    pub fn next(&self) -> Self {
        match self {
            Self::Name => Self::Id,
            Self::Id => Self::Name,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Id => "Id",
        }
    }
}

/// Sort field for the sellers list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SellerSortField {
    #[default]
    Name,
    Email,
    BirthDate,
    BaseSalary,
    Id,
}

impl SellerSortField {
    pub fn next(&self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::BirthDate,
            Self::BirthDate => Self::BaseSalary,
            Self::BaseSalary => Self::Id,
            Self::Id => Self::Name,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::BirthDate => "Birth date",
            Self::BaseSalary => "Salary",
            Self::Id => "Id",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

/// Which list a pending delete came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Department,
    Seller,
}

/// A delete waiting for dialog confirmation
#[derive(Debug, Clone)]
pub struct PendingDeleteAction {
    pub target: DeleteTarget,
    pub entity_id: u32,
    pub entity_display: String,
    /// Which option is highlighted (false = Cancel, true = Delete)
    pub selected_option: bool,
}

/// Top-level application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    pub departments: Vec<Department>,
    pub sellers: Vec<Seller>,
    pub selected_index: usize,
    pub department_sort_field: DepartmentSortField,
    pub department_sort_direction: SortDirection,
    pub seller_sort_field: SellerSortField,
    pub seller_sort_direction: SortDirection,
    pub form: FormState,
    pub pending_delete: Option<PendingDeleteAction>,
    error_messages: VecDeque<String>,
}

impl AppState {
    /// Departments ordered by the current sort settings
    pub fn sorted_departments(&self) -> Vec<&Department> {
        let mut rows: Vec<&Department> = self.departments.iter().collect();
        rows.sort_by(|a, b| {
            let ord = match self.department_sort_field {
                DepartmentSortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                DepartmentSortField::Id => a.id.cmp(&b.id),
            };
            match self.department_sort_direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
        rows
    }

    /// Sellers ordered by the current sort settings
    pub fn sorted_sellers(&self) -> Vec<&Seller> {
        let mut rows: Vec<&Seller> = self.sellers.iter().collect();
        rows.sort_by(|a, b| {
            let ord = match self.seller_sort_field {
                SellerSortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                SellerSortField::Email => a.email.to_lowercase().cmp(&b.email.to_lowercase()),
                SellerSortField::BirthDate => a.birth_date.cmp(&b.birth_date),
                SellerSortField::BaseSalary => a.base_salary.total_cmp(&b.base_salary),
                SellerSortField::Id => a.id.cmp(&b.id),
            };
            match self.seller_sort_direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
        rows
    }

    /// The department currently under the cursor, if any
    pub fn selected_department(&self) -> Option<&Department> {
        self.sorted_departments().get(self.selected_index).copied()
    }

    /// The seller currently under the cursor, if any
    pub fn selected_seller(&self) -> Option<&Seller> {
        self.sorted_sellers().get(self.selected_index).copied()
    }

    /// Resolve a department id to its display name
    pub fn department_name(&self, id: Option<u32>) -> Option<&str> {
        let id = id?;
        self.departments
            .iter()
            .find(|d| d.id == Some(id))
            .map(|d| d.name.as_str())
    }

    pub fn move_selection_down(&mut self, count: usize) {
        if count > 0 && self.selected_index < count - 1 {
            self.selected_index += 1;
        }
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Keep the cursor inside the list after a reload shrank it
    pub fn clamp_selection(&mut self, count: usize) {
        if count == 0 {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(count - 1);
        }
    }

    /// Queue an error message for the modal dialog
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.error_messages.push_back(message.into());
    }

    /// The error currently shown, if any
    pub fn current_error(&self) -> Option<&str> {
        self.error_messages.front().map(String::as_str)
    }

    /// Dismiss the current error, revealing the next queued one
    pub fn dismiss_error(&mut self) {
        self.error_messages.pop_front();
    }
}
