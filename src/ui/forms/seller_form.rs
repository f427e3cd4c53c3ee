//! Seller form rendering (create and edit)

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::platform::SAVE_SHORTCUT;
use crate::state::{FormState, SellerForm};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the seller form
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let FormState::Seller(form) = &app.state.form else {
        return;
    };

    let title = if form.editing {
        " Edit Seller "
    } else {
        " New Seller "
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT), // Id
            Constraint::Length(FIELD_HEIGHT), // Name
            Constraint::Length(FIELD_HEIGHT), // Email
            Constraint::Length(FIELD_HEIGHT), // Birth date
            Constraint::Length(FIELD_HEIGHT), // Base salary
            Constraint::Length(3),            // Department selector
            Constraint::Length(2),            // Help text
            Constraint::Min(0),
        ])
        .margin(1)
        .split(area);

    draw_field(frame, chunks[0], &form.id, form.active_field_index == 0);
    draw_field(frame, chunks[1], &form.name, form.active_field_index == 1);
    draw_field(frame, chunks[2], &form.email, form.active_field_index == 2);
    draw_field(frame, chunks[3], &form.birth_date, form.active_field_index == 3);
    draw_field(frame, chunks[4], &form.base_salary, form.active_field_index == 4);

    draw_department_selector(frame, chunks[5], form);

    let help = Paragraph::new(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(": next field  "),
        Span::styled("←/→", Style::default().fg(Color::Cyan)),
        Span::raw(": department  "),
        Span::styled(SAVE_SHORTCUT, Style::default().fg(Color::Cyan)),
        Span::raw(": save  "),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::raw(": cancel"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[6]);
}

/// Draw the department reference selector row
fn draw_department_selector(frame: &mut Frame, area: Rect, form: &SellerForm) {
    let is_active = form.is_department_selector_active();
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let content = match form.selected_department() {
        Some(department) => {
            if is_active {
                format!("◂ {} ▸", department.name)
            } else {
                department.name.clone()
            }
        }
        None => "(no departments)".to_string(),
    };

    let block = Block::default()
        .title(" Department ")
        .borders(Borders::ALL)
        .border_style(style);

    frame.render_widget(
        Paragraph::new(Span::styled(content, style)).block(block),
        area,
    );
}
