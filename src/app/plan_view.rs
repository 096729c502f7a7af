use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
};

use crate::domain::{Axis, PlanEntry};

use super::{App, ui_helpers, view_style};

impl App {
    pub(super) fn render_plan(&self, f: &mut Frame, area: Rect) {
        let state = self.store.state();
        if state.plan.is_empty() {
            let empty = Paragraph::new(view_style::hint_line(
                "No plan yet. Press g to generate the full 90 days.",
            ))
            .block(view_style::panel("90-Day Plan", view_style::ACCENT));
            f.render_widget(empty, area);
            return;
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let lane = self.selected_block.axis();
        let title_width = (columns[0].width.saturating_sub(14) / 3) as usize;

        let items: Vec<ListItem> = state
            .plan
            .iter()
            .map(|entry| {
                let marker = if entry.day == state.current_day { "▶" } else { " " };
                let mut spans = vec![Span::raw(format!("{}{:>3} ", marker, entry.day))];
                for axis in Axis::ALL {
                    let style = if axis == lane {
                        Style::default().fg(view_style::axis_color(axis))
                    } else {
                        view_style::muted()
                    };
                    spans.push(Span::styled(
                        format!(
                            "{:<width$} ",
                            ui_helpers::truncate_label(entry.title(axis), title_width),
                            width = title_width
                        ),
                        style,
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let selected = ui_helpers::clamp_index(self.selected_plan_day, state.plan.len());
        let mut list_state = ListState::default().with_selected(Some(selected));
        let list = List::new(items)
            .block(view_style::panel("90-Day Plan", view_style::ACCENT))
            .highlight_style(view_style::selected_style(true));
        f.render_stateful_widget(list, columns[0], &mut list_state);

        if let Some(entry) = state.plan.get(selected) {
            render_plan_detail(f, columns[1], entry, lane);
        }
    }
}

fn render_plan_detail(f: &mut Frame, area: Rect, entry: &PlanEntry, lane: Axis) {
    let color = view_style::axis_color(lane);
    let mut lines = vec![
        Line::from(Span::styled(
            entry.title(lane).to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(entry.link(lane).to_string(), view_style::muted())),
        Line::from(""),
    ];
    lines.extend(
        entry
            .tasks(lane)
            .iter()
            .map(|task| Line::from(format!("• {}", task))),
    );

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(view_style::panel(
            format!("Day {} · {}", entry.day, lane.label()),
            color,
        ));
    f.render_widget(detail, area);
}
