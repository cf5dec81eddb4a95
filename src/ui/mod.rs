//! UI module for rendering the TUI

mod components;
mod field_renderer;
mod form;
mod layout;

use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Form + actions
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    layout::draw_header(frame, chunks[0]);
    form::draw(frame, chunks[1], app);
    layout::draw_status_bar(frame, app);

    if app.session.submitted.is_some() {
        layout::draw_submitted_banner(frame);
    }
}
