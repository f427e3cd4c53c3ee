//! Layout components (sidebar, status bar)

use super::components::{render_sidebar_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::platform::SAVE_SHORTCUT;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Sidebar items
const SIDEBAR_ITEMS: &[&str] = &["Departments", "Sellers"];

/// Create the main layout with sidebar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20), // Sidebar
            Constraint::Min(0),     // Main content
        ])
        .split(area);

    // Reserve bottom line for status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(chunks[1]);

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Sidebar content
            Constraint::Length(1), // Status bar continuation
        ])
        .split(chunks[0]);

    (sidebar_chunks[0], main_chunks[0])
}

/// Draw the sidebar with boxed buttons
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    // Create vertical layout for button boxes (centered vertically)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                // Top padding (flex)
            Constraint::Length(BUTTON_HEIGHT), // Departments
            Constraint::Length(BUTTON_HEIGHT), // Sellers
            Constraint::Min(0),                // Bottom padding (flex)
        ])
        .split(area);

    for (idx, label) in SIDEBAR_ITEMS.iter().enumerate() {
        let is_selected = match idx {
            0 => matches!(
                app.state.current_view,
                View::Departments | View::DepartmentForm
            ),
            1 => matches!(app.state.current_view, View::Sellers | View::SellerForm),
            _ => false,
        };

        render_sidebar_button(frame, chunks[idx + 1], &(idx + 1).to_string(), label, is_selected);
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    // Build status bar content
    let mut spans = vec![];

    // Record counts
    spans.push(Span::styled(
        format!(
            " {} departments · {} sellers ",
            app.state.departments.len(),
            app.state.sellers.len()
        ),
        Style::default().fg(Color::Blue),
    ));
    spans.push(Span::raw("| "));

    // View-specific hints
    let hints = get_view_hints(&app.state.current_view);
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    // Transient feedback
    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Quit hint on the right
    let quit_hint = " q:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: quit_hint.len() as u16,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: &View) -> String {
    match view {
        View::Departments | View::Sellers => {
            "j/k:nav  Tab:switch  n:new  e:edit  d:delete  s/S:sort".to_string()
        }
        View::DepartmentForm => format!("Tab:next  {SAVE_SHORTCUT}:save  Esc:cancel"),
        View::SellerForm => {
            format!("Tab:next  ←/→:department  {SAVE_SHORTCUT}:save  Esc:cancel")
        }
    }
}
