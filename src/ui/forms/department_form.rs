//! Department form rendering (create and edit)

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::platform::SAVE_SHORTCUT;
use crate::state::FormState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the department form
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let FormState::Department(form) = &app.state.form else {
        return;
    };

    let title = if form.editing {
        " Edit Department "
    } else {
        " New Department "
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
            Constraint::Length(2),            // Help text
            Constraint::Min(0),
        ])
        .margin(1)
        .split(area);

    draw_field(frame, chunks[0], &form.id, form.active_field_index == 0);
    draw_field(frame, chunks[1], &form.name, form.active_field_index == 1);

    let help = Paragraph::new(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(": next field  "),
        Span::styled(SAVE_SHORTCUT, Style::default().fg(Color::Cyan)),
        Span::raw(": save  "),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::raw(": cancel"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);
}
