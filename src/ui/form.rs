//! Form view: accordion sections plus the action panel

use super::components::{render_action_button, BUTTON_HEIGHT};
use super::field_renderer::{check_line, field_line, fixed_line, group_error_line};
use crate::app::{App, Focus};
use crate::state::{
    section_status, EquipmentChecklist, SafetyChecklist, Section, Stop,
    EQUIPMENT_CHECKS_KEY, PRODUCT_NAME, SAFETY_CHECKS_KEY,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the form (left) and the action panel (right)
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(48),    // Form area
            Constraint::Length(20), // Action panel
        ])
        .split(area);

    draw_sections(frame, chunks[0], app);
    draw_action_panel(frame, chunks[1], app);
}

fn section_header<'a>(
    index: usize,
    section: Section,
    is_open: bool,
    is_complete: bool,
    has_errors: bool,
) -> Line<'a> {
    let arrow = if is_open { "▾" } else { "▸" };
    let title_style = if is_open {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let marker = if has_errors {
        Span::styled(" ●", Style::default().fg(Color::Red))
    } else if is_complete {
        Span::styled(" ✓", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○", Style::default().fg(Color::DarkGray))
    };

    Line::from(vec![
        Span::styled(format!("{arrow} {}. {}", index + 1, section.title()), title_style),
        marker,
    ])
}

/// Accordion body: every header visible, the active section expanded
fn draw_sections(frame: &mut Frame, area: Rect, app: &App) {
    let form_focused = app.focus == Focus::Form;
    let record = &app.session.record;
    let active_stop = app.session.active_stop();
    let active_section = app.session.active_section();
    let error_sections = app.session.error_sections();

    let mut lines: Vec<Line> = Vec::new();
    let mut active_line = 0usize;

    for (index, section) in Section::ALL.into_iter().enumerate() {
        let is_open = section == active_section;
        lines.push(section_header(
            index,
            section,
            is_open,
            section_status(record, section),
            error_sections.contains(&section),
        ));
        if !is_open {
            continue;
        }

        match section {
            Section::Safety => {
                if let Some(error) = app.session.errors.get(SAFETY_CHECKS_KEY) {
                    lines.push(group_error_line(&error.message));
                }
                for (i, label) in SafetyChecklist::LABELS.into_iter().enumerate() {
                    let is_active = form_focused && active_stop == Stop::SafetyItem(i);
                    if is_active {
                        active_line = lines.len();
                    }
                    lines.push(check_line(label, record.safety_checks.get(i), is_active));
                }
            }
            Section::Equipment => {
                if let Some(error) = app.session.errors.get(EQUIPMENT_CHECKS_KEY) {
                    lines.push(group_error_line(&error.message));
                }
                for (i, label) in EquipmentChecklist::LABELS.into_iter().enumerate() {
                    let is_active = form_focused && active_stop == Stop::EquipmentItem(i);
                    if is_active {
                        active_line = lines.len();
                    }
                    lines.push(check_line(label, record.equipment_checks.get(i), is_active));
                }
            }
            _ => {
                if section == Section::Cargo {
                    lines.push(fixed_line("Product", PRODUCT_NAME));
                }
                for field in section.fields() {
                    let is_active = form_focused && active_stop == Stop::Field(*field);
                    if is_active {
                        active_line = lines.len();
                    }
                    lines.push(field_line(
                        field.label(),
                        record.text(*field),
                        is_active,
                        app.session
                            .errors
                            .get(field.name())
                            .map(|error| error.message.as_str()),
                    ));
                }
            }
        }
    }

    let border_color = if form_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(format!(" Vessel Intake - {PRODUCT_NAME} Loading "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    // Keep the active row inside the viewport
    let viewport = area.height.saturating_sub(2) as usize;
    let scroll = if viewport > 0 {
        active_line.saturating_sub(viewport.saturating_sub(2)) as u16
    } else {
        0
    };

    let paragraph = Paragraph::new(lines).block(block).scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Submit/Reset buttons on the right
fn draw_action_panel(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::ActionPanel;

    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let button_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Submit (primary)
            Constraint::Length(BUTTON_HEIGHT), // Reset
            Constraint::Min(0),                // remaining space
        ])
        .split(inner_area);

    render_action_button(
        frame,
        button_chunks[0],
        "Submit",
        is_focused && app.selected_button == 0,
        Some(Color::Green),
    );

    render_action_button(
        frame,
        button_chunks[1],
        "Reset",
        is_focused && app.selected_button == 1,
        Some(Color::Yellow),
    );
}
