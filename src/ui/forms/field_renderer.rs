//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by a rendered field: bordered input box plus the error line
pub const FIELD_HEIGHT: u16 = 4;

/// Draw a form field with its inline error line underneath
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = if field.value.is_empty() && !is_active {
        "(empty)"
    } else {
        field.value.as_str()
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_value, style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(style);

    frame.render_widget(content.block(block), chunks[0]);

    // Error line (blank when the field is valid)
    if let Some(error) = &field.error {
        let message = Paragraph::new(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(message, chunks[1]);
    }
}
