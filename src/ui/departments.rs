//! Departments list view

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the departments list
pub fn draw_list(frame: &mut Frame, area: Rect, app: &App) {
    let sorted_departments = app.state.sorted_departments();

    let block = Block::default()
        .title(" Departments ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if sorted_departments.is_empty() {
        let content = Paragraph::new("No departments found.\nPress 'n' to create a new department.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Split inner area for header and list
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    // Draw header with sort info
    let sort_label = format!(
        "Sort: {} {}",
        app.state.department_sort_field.label(),
        app.state.department_sort_direction.symbol()
    );
    let header = Paragraph::new(Line::from(vec![
        Span::styled(sort_label, Style::default().fg(Color::Cyan)),
        Span::styled(" [s]cycle [S]dir", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(header, chunks[0]);

    // Draw list
    let items: Vec<ListItem> = sorted_departments
        .iter()
        .enumerate()
        .map(|(idx, department)| {
            let is_selected = idx == app.state.selected_index;
            let prefix = if is_selected { "▸" } else { " " };
            let id = department
                .id
                .map(|id| format!("#{id}"))
                .unwrap_or_default();

            let seller_count = app
                .state
                .sellers
                .iter()
                .filter(|s| s.department_id == department.id)
                .count();

            let style = if is_selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{prefix} "), style),
                Span::styled(format!("{id:>4} "), Style::default().fg(Color::DarkGray)),
                Span::styled(department.name.clone(), style),
                Span::styled(
                    format!("  ({seller_count} sellers)"),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), chunks[1]);
}
