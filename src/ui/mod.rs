//! UI module for rendering the TUI

mod components;
mod departments;
mod forms;
mod layout;
mod sellers;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Draw the main layout with sidebar
    let (sidebar_area, main_area) = layout::create_layout(area);

    // Draw sidebar
    layout::draw_sidebar(frame, sidebar_area, app);

    // Draw main content based on current view
    match &app.state.current_view {
        View::Departments => departments::draw_list(frame, main_area, app),
        View::Sellers => sellers::draw_list(frame, main_area, app),
        View::DepartmentForm => forms::draw_department_form(frame, main_area, app),
        View::SellerForm => forms::draw_seller_form(frame, main_area, app),
    }

    // Draw status bar
    layout::draw_status_bar(frame, app);

    // Dialog overlays go on top of everything else
    if let Some(action) = &app.state.pending_delete {
        components::render_confirm_dialog(frame, action);
    }
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message);
    }
}
