use std::time::Instant;

use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::{
    domain::BlockKey,
    timer::{TimerSlot, format_countdown},
};

use super::{App, InputTarget, ui_helpers, view_style};

impl App {
    pub(super) fn render_input_modal(&self, f: &mut Frame, size: Rect, target: InputTarget) {
        let modal_area = ui_helpers::modal_rect(size, 2, 3, 5);
        let modal_area = Rect {
            height: modal_area.height.min(7),
            ..modal_area
        };

        let lines = vec![
            Line::from(vec![
                Span::raw(self.input_buffer.as_str()),
                Span::styled("█", Style::default().fg(view_style::ACCENT)),
            ]),
            Line::from(""),
            Line::from(view_style::hint_line("Enter to save · Esc to cancel")),
        ];

        let prompt = target.prompt();
        let modal = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(view_style::panel(&prompt, view_style::ACCENT));

        f.render_widget(Clear, modal_area);
        f.render_widget(modal, modal_area);
    }

    pub(super) fn render_focus_overlay(&self, f: &mut Frame, size: Rect, key: BlockKey) {
        let modal_area = ui_helpers::modal_rect(size, 1, 2, 7);
        let block = self.store.state().blocks.get(key);
        let remaining = self
            .timers
            .remaining(TimerSlot::Focus, Instant::now())
            .map(format_countdown)
            .unwrap_or_else(|| "00:00".to_string());

        let topic = if block.topic.is_empty() {
            key.label()
        } else {
            block.topic.as_str()
        };
        let open_tasks = block.tasks.iter().filter(|task| !task.done).count();

        let lines = vec![
            Line::from(Span::styled(
                topic,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                remaining,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("{} open tasks", open_tasks)),
            Line::from(view_style::hint_line("Esc to leave focus")),
        ];

        let overlay = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(view_style::panel(
                format!("Focus · block {}", key),
                view_style::axis_color(key.axis()),
            ));

        f.render_widget(Clear, modal_area);
        f.render_widget(overlay, modal_area);
    }
}
