//! Sellers list view

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the sellers list
pub fn draw_list(frame: &mut Frame, area: Rect, app: &App) {
    let sorted_sellers = app.state.sorted_sellers();

    let block = Block::default()
        .title(" Sellers ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if sorted_sellers.is_empty() {
        let content = Paragraph::new("No sellers found.\nPress 'n' to create a new seller.")
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
        app.state.seller_sort_field.label(),
        app.state.seller_sort_direction.symbol()
    );
    let header = Paragraph::new(Line::from(vec![
        Span::styled(sort_label, Style::default().fg(Color::Cyan)),
        Span::styled(" [s]cycle [S]dir", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(header, chunks[0]);

    // Draw list
    let items: Vec<ListItem> = sorted_sellers
        .iter()
        .enumerate()
        .map(|(idx, seller)| {
            let is_selected = idx == app.state.selected_index;
            let prefix = if is_selected { "▸" } else { " " };
            let id = seller.id.map(|id| format!("#{id}")).unwrap_or_default();
            let department = app
                .state
                .department_name(seller.department_id)
                .unwrap_or("—");

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
                Span::styled(format!("{:<24}", seller.name), style),
                Span::styled(
                    format!("{:<28}", seller.email),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{}  ", seller.birth_date_display()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:>10}  ", seller.salary_display()),
                    Style::default().fg(Color::Green),
                ),
                Span::styled(department.to_string(), Style::default().fg(Color::Blue)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), chunks[1]);
}
