//! Row rendering utilities for the form view

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// One field row: label column, value (or placeholder), cursor, inline error
pub fn field_line<'a>(
    label: &'a str,
    value: &'a str,
    is_active: bool,
    error: Option<&'a str>,
) -> Line<'a> {
    let label_style = if is_active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut spans = vec![Span::styled(format!("    {label:<26} "), label_style)];

    if value.is_empty() && !is_active {
        spans.push(Span::styled("(empty)", Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::raw(value));
    }

    if is_active {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    if let Some(message) = error {
        spans.push(Span::styled(
            format!("  ✗ {message}"),
            Style::default().fg(Color::Red),
        ));
    }

    Line::from(spans)
}

/// A read-only row (the fixed product name)
pub fn fixed_line<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("    {label:<26} "),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(value, Style::default().fg(Color::DarkGray)),
    ])
}

/// One checklist row with a `[x]`/`[ ]` toggle
pub fn check_line<'a>(label: &'a str, checked: bool, is_active: bool) -> Line<'a> {
    let mark = if checked { "[x]" } else { "[ ]" };
    let mark_style = if is_active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else if checked {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let label_style = if is_active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw("    "),
        Span::styled(mark, mark_style),
        Span::raw(" "),
        Span::styled(label, label_style),
    ])
}

/// Aggregate checklist error row
pub fn group_error_line(message: &str) -> Line<'_> {
    Line::from(Span::styled(
        format!("    ✗ {message}"),
        Style::default().fg(Color::Red),
    ))
}
