use std::borrow::Cow;

use ratatui::{
    prelude::Span,
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders},
};

use crate::{constants::AXIS_COLORS, domain::Axis};

pub(super) const ACCENT: Color = Color::Rgb(0, 191, 255);

pub(super) fn axis_color(axis: Axis) -> Color {
    AXIS_COLORS[axis.index()]
}

pub(super) fn panel<'a>(title: impl Into<Cow<'a, str>>, border: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            title,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(border))
}

pub(super) fn check_span(done: bool) -> Span<'static> {
    if done {
        Span::styled("[x] ", Style::default().fg(Color::Green))
    } else {
        Span::styled("[ ] ", Style::default().fg(Color::Gray))
    }
}

pub(super) fn selected_style(active: bool) -> Style {
    if active {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

pub(super) fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub(super) fn hint_line(text: &str) -> Span<'_> {
    Span::styled(text, muted())
}
