//! Form rendering module

mod department_form;
mod field_renderer;
mod seller_form;

use crate::app::App;
use ratatui::{layout::Rect, Frame};

pub fn draw_department_form(frame: &mut Frame, area: Rect, app: &App) {
    department_form::draw(frame, area, app);
}

pub fn draw_seller_form(frame: &mut Frame, area: Rect, app: &App) {
    seller_form::draw(frame, area, app);
}
