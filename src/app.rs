//! Application state and core logic

use crate::config::TuiConfig;
use crate::platform;
use crate::session::{FormSession, SessionError};
use crate::state::{
    AppState, DeleteTarget, Department, DepartmentForm, DepartmentSortField, FormState,
    PendingDeleteAction, Seller, SellerForm, SellerSortField, SortDirection, View,
};
use crate::store::{demo_departments, demo_sellers, EntityStore, MemoryStore};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Which list a change notification refreshes
#[derive(Debug, Clone, Copy)]
enum Refresh {
    Departments,
    Sellers,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// User configuration
    pub config: TuiConfig,
    /// Transient feedback shown in the status bar
    pub status_message: Option<String>,
    /// Department store handle
    departments: MemoryStore<Department>,
    /// Seller store handle
    sellers: MemoryStore<Seller>,
    /// Session driving the open department form, if any
    department_session: Option<FormSession<Department>>,
    /// Session driving the open seller form, if any
    seller_session: Option<FormSession<Seller>>,
    refresh_tx: UnboundedSender<Refresh>,
    refresh_rx: UnboundedReceiver<Refresh>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance with seeded stores
    pub async fn new() -> Result<Self> {
        let config = match TuiConfig::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("failed to load config: {e:#}");
                TuiConfig::default()
            }
        };

        let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();

        let mut app = Self {
            state: AppState::default(),
            config,
            status_message: None,
            departments: demo_departments(),
            sellers: demo_sellers(),
            department_session: None,
            seller_session: None,
            refresh_tx,
            refresh_rx,
            quit: false,
        };

        app.apply_config_sort();
        app.reload_departments().await?;
        app.reload_sellers().await?;
        Ok(app)
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply queued change notifications by reloading the affected lists
    pub async fn drain_refreshes(&mut self) -> Result<()> {
        while let Ok(refresh) = self.refresh_rx.try_recv() {
            match refresh {
                Refresh::Departments => self.reload_departments().await?,
                Refresh::Sellers => self.reload_sellers().await?,
            }
        }
        Ok(())
    }

    async fn reload_departments(&mut self) -> Result<()> {
        self.state.departments = self.departments.find_all().await?;
        let count = self.state.departments.len();
        self.state.clamp_selection(count);
        Ok(())
    }

    async fn reload_sellers(&mut self) -> Result<()> {
        self.state.sellers = self.sellers.find_all().await?;
        let count = self.state.sellers.len();
        self.state.clamp_selection(count);
        Ok(())
    }

    /// Handle a key event for the current view
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // the modal error dialog swallows input until dismissed
        if self.state.current_error().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        if self.state.pending_delete.is_some() {
            return self.handle_confirm_delete_key(key).await;
        }

        match self.state.current_view {
            View::Departments => self.handle_departments_key(key).await,
            View::Sellers => self.handle_sellers_key(key).await,
            View::DepartmentForm => self.handle_department_form_key(key).await,
            View::SellerForm => self.handle_seller_form_key(key).await,
        }
    }

    // --- list views ---

    async fn handle_departments_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let count = self.state.departments.len();
                self.state.move_selection_down(count);
            }
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Tab | KeyCode::Char('2') => self.switch_view(View::Sellers),
            KeyCode::Char('n') => self.open_department_form(None)?,
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(department) = self.state.selected_department().cloned() {
                    self.open_department_form(Some(department))?;
                }
            }
            KeyCode::Char('d') => self.request_delete_department(),
            KeyCode::Char('s') => {
                self.state.department_sort_field = self.state.department_sort_field.next();
                self.persist_sort_preferences();
            }
            KeyCode::Char('S') => {
                self.state.department_sort_direction =
                    self.state.department_sort_direction.toggle();
                self.persist_sort_preferences();
            }
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
        Ok(())
    }

    async fn handle_sellers_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let count = self.state.sellers.len();
                self.state.move_selection_down(count);
            }
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Tab | KeyCode::Char('1') => self.switch_view(View::Departments),
            KeyCode::Char('n') => self.open_seller_form(None).await?,
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(seller) = self.state.selected_seller().cloned() {
                    self.open_seller_form(Some(seller)).await?;
                }
            }
            KeyCode::Char('d') => self.request_delete_seller(),
            KeyCode::Char('s') => {
                self.state.seller_sort_field = self.state.seller_sort_field.next();
                self.persist_sort_preferences();
            }
            KeyCode::Char('S') => {
                self.state.seller_sort_direction = self.state.seller_sort_direction.toggle();
                self.persist_sort_preferences();
            }
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
        Ok(())
    }

    fn switch_view(&mut self, view: View) {
        self.state.current_view = view;
        self.state.selected_index = 0;
        self.status_message = None;
    }

    // --- department form ---

    fn open_department_form(&mut self, existing: Option<Department>) -> Result<()> {
        let mut session = FormSession::new();
        session.bind(existing)?;
        session.set_store(Box::new(self.departments.clone()));
        let tx = self.refresh_tx.clone();
        session.subscribe(move || {
            let _ = tx.send(Refresh::Departments);
        });

        let form = match session.entity() {
            Some(_) => DepartmentForm::from_values(&session.populate_fields()?),
            None => DepartmentForm::new(),
        };

        self.state.form = FormState::Department(form);
        self.department_session = Some(session);
        self.state.current_view = View::DepartmentForm;
        Ok(())
    }

    async fn handle_department_form_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Tab => self.state.form.next_field(),
            KeyCode::BackTab => self.state.form.prev_field(),
            // Save (Ctrl+S or Cmd+W / Ctrl+W)
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.save_department_form().await?;
            }
            KeyCode::Char('w') if key.modifiers.contains(platform::SAVE_MODIFIER) => {
                self.save_department_form().await?;
            }
            KeyCode::Esc => self.cancel_department_form(),
            KeyCode::Char(c) => {
                if let Some(field) = self.state.form.get_active_field_mut() {
                    field.push_char(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.state.form.get_active_field_mut() {
                    field.pop_char();
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn save_department_form(&mut self) -> Result<()> {
        let values = match &self.state.form {
            FormState::Department(form) => form.field_values(),
            _ => return Ok(()),
        };
        let Some(session) = self.department_session.as_mut() else {
            return Ok(());
        };

        match session.submit(&values).await {
            Ok(saved) => {
                tracing::info!(id = ?saved.id, name = %saved.name, "department saved");
                self.status_message = Some(format!("Department '{}' saved", saved.name));
                self.department_session = None;
                self.state.form = FormState::None;
                self.state.current_view = View::Departments;
                self.drain_refreshes().await?;
            }
            Err(SessionError::ValidationFailed(errors)) => {
                tracing::debug!(invalid = ?errors.fields().collect::<Vec<_>>(), "department form validation failed");
                if let FormState::Department(form) = &mut self.state.form {
                    form.apply_errors(&errors);
                }
            }
            Err(SessionError::PersistenceFailed(message)) => {
                tracing::warn!(%message, "department save failed");
                self.state.push_error(message);
            }
            Err(e) => self.state.push_error(e.to_string()),
        }
        Ok(())
    }

    fn cancel_department_form(&mut self) {
        if let Some(session) = self.department_session.as_mut() {
            session.cancel();
        }
        self.department_session = None;
        self.state.form = FormState::None;
        self.state.current_view = View::Departments;
    }

    // --- seller form ---

    async fn open_seller_form(&mut self, existing: Option<Seller>) -> Result<()> {
        let mut session = FormSession::new();
        session.bind(existing)?;
        session.set_store(Box::new(self.sellers.clone()));
        let tx = self.refresh_tx.clone();
        session.subscribe(move || {
            let _ = tx.send(Refresh::Sellers);
        });

        let mut form = match session.entity() {
            Some(_) => SellerForm::from_values(&session.populate_fields()?),
            None => SellerForm::new(),
        };

        // the reference-selection list comes from the department store
        let departments = self.departments.find_all().await?;
        let selected_id = session.entity().and_then(|s| s.department_id);
        form.set_departments(departments, selected_id);

        self.state.form = FormState::Seller(form);
        self.seller_session = Some(session);
        self.state.current_view = View::SellerForm;
        Ok(())
    }

    async fn handle_seller_form_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Tab => self.state.form.next_field(),
            KeyCode::BackTab => self.state.form.prev_field(),
            // Save (Ctrl+S or Cmd+W / Ctrl+W)
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.save_seller_form().await?;
            }
            KeyCode::Char('w') if key.modifiers.contains(platform::SAVE_MODIFIER) => {
                self.save_seller_form().await?;
            }
            KeyCode::Esc => self.cancel_seller_form(),
            KeyCode::Left => {
                if let FormState::Seller(form) = &mut self.state.form {
                    if form.is_department_selector_active() {
                        form.prev_department();
                    }
                }
            }
            KeyCode::Right => {
                if let FormState::Seller(form) = &mut self.state.form {
                    if form.is_department_selector_active() {
                        form.next_department();
                    }
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.state.form.get_active_field_mut() {
                    field.push_char(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.state.form.get_active_field_mut() {
                    field.pop_char();
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn save_seller_form(&mut self) -> Result<()> {
        let values = match &self.state.form {
            FormState::Seller(form) => form.field_values(),
            _ => return Ok(()),
        };
        let Some(session) = self.seller_session.as_mut() else {
            return Ok(());
        };

        match session.submit(&values).await {
            Ok(saved) => {
                tracing::info!(id = ?saved.id, name = %saved.name, "seller saved");
                self.status_message = Some(format!("Seller '{}' saved", saved.name));
                self.seller_session = None;
                self.state.form = FormState::None;
                self.state.current_view = View::Sellers;
                self.drain_refreshes().await?;
            }
            Err(SessionError::ValidationFailed(errors)) => {
                tracing::debug!(invalid = ?errors.fields().collect::<Vec<_>>(), "seller form validation failed");
                if let FormState::Seller(form) = &mut self.state.form {
                    form.apply_errors(&errors);
                }
            }
            Err(SessionError::PersistenceFailed(message)) => {
                tracing::warn!(%message, "seller save failed");
                self.state.push_error(message);
            }
            Err(e) => self.state.push_error(e.to_string()),
        }
        Ok(())
    }

    fn cancel_seller_form(&mut self) {
        if let Some(session) = self.seller_session.as_mut() {
            session.cancel();
        }
        self.seller_session = None;
        self.state.form = FormState::None;
        self.state.current_view = View::Sellers;
    }

    // --- delete with confirmation ---

    fn request_delete_department(&mut self) {
        let selected = self
            .state
            .selected_department()
            .and_then(|d| d.id.map(|id| (id, d.name.clone())));
        if let Some((id, name)) = selected {
            self.state.pending_delete = Some(PendingDeleteAction {
                target: DeleteTarget::Department,
                entity_id: id,
                entity_display: format!("department '{name}'"),
                selected_option: false,
            });
        }
    }

    fn request_delete_seller(&mut self) {
        let selected = self
            .state
            .selected_seller()
            .and_then(|s| s.id.map(|id| (id, s.name.clone())));
        if let Some((id, name)) = selected {
            self.state.pending_delete = Some(PendingDeleteAction {
                target: DeleteTarget::Seller,
                entity_id: id,
                entity_display: format!("seller '{name}'"),
                selected_option: false,
            });
        }
    }

    async fn handle_confirm_delete_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k')
            | KeyCode::Tab => {
                if let Some(action) = self.state.pending_delete.as_mut() {
                    action.selected_option = !action.selected_option;
                }
            }
            KeyCode::Enter => {
                let confirmed = self
                    .state
                    .pending_delete
                    .as_ref()
                    .is_some_and(|a| a.selected_option);
                if confirmed {
                    self.perform_pending_delete().await?;
                } else {
                    self.state.pending_delete = None;
                }
            }
            KeyCode::Esc => self.state.pending_delete = None,
            _ => {}
        }
        Ok(())
    }

    async fn perform_pending_delete(&mut self) -> Result<()> {
        let Some(action) = self.state.pending_delete.take() else {
            return Ok(());
        };

        let result = match action.target {
            DeleteTarget::Department => self.departments.delete(action.entity_id).await,
            DeleteTarget::Seller => self.sellers.delete(action.entity_id).await,
        };

        match result {
            Ok(()) => {
                tracing::info!(id = action.entity_id, "deleted {}", action.entity_display);
                self.status_message = Some(format!("Deleted {}", action.entity_display));
                match action.target {
                    DeleteTarget::Department => self.reload_departments().await?,
                    DeleteTarget::Seller => self.reload_sellers().await?,
                }
            }
            Err(e) => self.state.push_error(e.to_string()),
        }
        Ok(())
    }

    // --- sort preferences ---

    fn apply_config_sort(&mut self) {
        if let Some(field) = self.config.department_sort_field.as_deref() {
            self.state.department_sort_field = match field {
                "id" => DepartmentSortField::Id,
                _ => DepartmentSortField::Name,
            };
        }
        if let Some(direction) = self.config.department_sort_direction.as_deref() {
            self.state.department_sort_direction = direction_from_config(direction);
        }
        if let Some(field) = self.config.seller_sort_field.as_deref() {
            self.state.seller_sort_field = match field {
                "email" => SellerSortField::Email,
                "birth_date" => SellerSortField::BirthDate,
                "salary" => SellerSortField::BaseSalary,
                "id" => SellerSortField::Id,
                _ => SellerSortField::Name,
            };
        }
        if let Some(direction) = self.config.seller_sort_direction.as_deref() {
            self.state.seller_sort_direction = direction_from_config(direction);
        }
    }

    fn persist_sort_preferences(&mut self) {
        self.config.department_sort_field = Some(
            match self.state.department_sort_field {
                DepartmentSortField::Name => "name",
                DepartmentSortField::Id => "id",
            }
            .to_string(),
        );
        self.config.department_sort_direction =
            Some(direction_to_config(self.state.department_sort_direction));
        self.config.seller_sort_field = Some(
            match self.state.seller_sort_field {
                SellerSortField::Name => "name",
                SellerSortField::Email => "email",
                SellerSortField::BirthDate => "birth_date",
                SellerSortField::BaseSalary => "salary",
                SellerSortField::Id => "id",
            }
            .to_string(),
        );
        self.config.seller_sort_direction =
            Some(direction_to_config(self.state.seller_sort_direction));

        if let Err(e) = self.config.save() {
            tracing::warn!("failed to save config: {e:#}");
        }
    }
}

fn direction_from_config(raw: &str) -> SortDirection {
    match raw {
        "desc" => SortDirection::Desc,
        _ => SortDirection::Asc,
    }
}

fn direction_to_config(direction: SortDirection) -> String {
    match direction {
        SortDirection::Asc => "asc",
        SortDirection::Desc => "desc",
    }
    .to_string()
}
