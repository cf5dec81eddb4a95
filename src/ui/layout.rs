//! Header, status bar, and the success banner overlay

use crate::app::{App, Notice};
use crate::platform::{RESET_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{section_status, Section};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Title and subtitle above the form
pub fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Vessel Intake",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Please provide vessel arrival and loading details",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(header, area);
}

/// Bottom status bar: completion count, key hints, transient notice
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let complete = Section::ALL
        .into_iter()
        .filter(|section| section_status(&app.session.record, *section))
        .count();

    let mut spans = vec![
        Span::styled(
            format!(" {complete}/{} sections complete ", Section::ALL.len()),
            Style::default().fg(if complete == Section::ALL.len() {
                Color::Green
            } else {
                Color::Gray
            }),
        ),
        Span::styled(
            format!(
                "| Tab:next  PgUp/PgDn:section  Space:toggle  {SUBMIT_SHORTCUT}:submit  {RESET_SHORTCUT}:reset  Esc:quit"
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    match &app.notice {
        Some(Notice::Info(message)) => {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                message.as_str(),
                Style::default().fg(Color::Green),
            ));
        }
        Some(Notice::Error(message)) => {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                message.as_str(),
                Style::default().fg(Color::Red),
            ));
        }
        None => {}
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);
}

/// Centered overlay shown while the submitted banner is up
pub fn draw_submitted_banner(frame: &mut Frame) {
    let area = frame.area();
    let message = "✓ Vessel intake recorded successfully!";
    let banner_width = (message.chars().count() as u16 + 6).min(area.width);
    let banner_height = 5u16;

    let banner_area = Rect {
        x: area.x + area.width.saturating_sub(banner_width) / 2,
        y: area.y + area.height.saturating_sub(banner_height) / 2,
        width: banner_width,
        height: banner_height.min(area.height),
    };

    frame.render_widget(Clear, banner_area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            message,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(""),
    ];

    let banner = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(banner, banner_area);
}
