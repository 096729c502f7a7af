use std::time::Instant;

use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    widgets::{
        Gauge, List, ListItem, ListState, Paragraph, Tabs, Wrap,
        canvas::{Canvas, Line as CanvasLine},
    },
};

use crate::{
    constants::{INSIGHT_SETTINGS, PLAN_DAYS},
    domain::{
        Axes, Axis, BlockKey,
        insights::{Dashboard, radar_points},
    },
    timer::{TimerSlot, format_countdown},
};

use super::{App, Tab, UiMode, ui_helpers, view_style};

impl App {
    pub(super) fn draw_frame(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(size);

        self.render_tabs(f, chunks[0]);
        match self.tab {
            Tab::Dashboard => self.render_dashboard(f, chunks[1]),
            Tab::Today => self.render_today(f, chunks[1]),
            Tab::Plan => self.render_plan(f, chunks[1]),
            Tab::Books => self.render_books(f, chunks[1]),
            Tab::Settings => self.render_settings(f, chunks[1]),
        }
        self.render_status(f, chunks[2]);

        match self.ui_mode {
            UiMode::Input(target) => self.render_input_modal(f, size, target),
            UiMode::Focus(key) => self.render_focus_overlay(f, size, key),
            UiMode::Main => {}
        }
    }

    fn render_tabs(&self, f: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
            .collect();

        let state = self.store.state();
        let header = format!(
            "Sensei Flow · Day {}/{} · Lv {}",
            state.current_day, PLAN_DAYS, state.level
        );

        let tabs = Tabs::new(titles)
            .block(view_style::panel(&header, view_style::ACCENT))
            .select(self.tab.index())
            .highlight_style(
                Style::default()
                    .fg(view_style::ACCENT)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(tabs, area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let line = match &self.status {
            Some(message) => Line::from(Span::styled(
                message.as_str(),
                Style::default().fg(Color::Yellow),
            )),
            None => Line::from(view_style::hint_line(self.tab_hint())),
        };
        f.render_widget(Paragraph::new(line), area);
    }

    fn tab_hint(&self) -> &'static str {
        match self.tab {
            Tab::Dashboard => "Tab/1-5 switch · Ctrl+S save · q quit",
            Tab::Today => {
                "←/→ block · ↑/↓ task · space toggle · a add · t topic · l link · f finish · enter focus · e notes · r reflect · s save day · n next day"
            }
            Tab::Plan => "↑/↓ day · ←/→ lane · e title · l link · g generate · x clear",
            Tab::Books => "↑/↓ book · space done · e notes · l link",
            Tab::Settings => "d start date · c current day · x export · i import",
        }
    }

    fn render_dashboard(&self, f: &mut Frame, area: Rect) {
        let dashboard = Dashboard::from_state(self.store.state());

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(4),
            ])
            .split(area);

        let day_gauge = Gauge::default()
            .block(view_style::panel("Journey", view_style::ACCENT))
            .gauge_style(Style::default().fg(view_style::ACCENT))
            .percent(dashboard.progress_percent.min(100) as u16)
            .label(format!(
                "Day {}/{} · started {} · {}%",
                dashboard.current_day,
                PLAN_DAYS,
                dashboard.start_date.format("%Y-%m-%d"),
                dashboard.progress_percent
            ));
        f.render_widget(day_gauge, rows[0]);

        let xp_percent = if dashboard.xp_next == 0 {
            0
        } else {
            (u64::from(dashboard.xp) * 100 / u64::from(dashboard.xp_next)).min(100)
        };
        let xp_gauge = Gauge::default()
            .block(view_style::panel("Level", Color::Magenta))
            .gauge_style(Style::default().fg(Color::Magenta))
            .percent(xp_percent as u16)
            .label(format!(
                "Lv {} · {}/{} XP · streak {}",
                dashboard.level, dashboard.xp, dashboard.xp_next, dashboard.streak
            ));
        f.render_widget(xp_gauge, rows[1]);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[2]);

        self.render_radar(f, middle[0], &dashboard);

        let axis_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(middle[1]);
        for (i, &axis) in Axis::ALL.iter().enumerate() {
            let value = dashboard.axes.get(axis);
            let color = view_style::axis_color(axis);
            let gauge = Gauge::default()
                .block(view_style::panel(axis.label(), color))
                .gauge_style(Style::default().fg(color))
                .percent(
                    (value.min(INSIGHT_SETTINGS.axis_cap) * 100 / INSIGHT_SETTINGS.axis_cap) as u16,
                )
                .label(value.to_string());
            f.render_widget(gauge, axis_rows[i]);
        }

        let coach = Paragraph::new(vec![
            Line::from(Span::styled(
                dashboard.coach.headline,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Tip: {}", dashboard.coach.tip),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
        ])
        .wrap(Wrap { trim: true })
        .block(view_style::panel("Coach", Color::Green));
        f.render_widget(coach, rows[3]);
    }

    fn render_radar(&self, f: &mut Frame, area: Rect, dashboard: &Dashboard) {
        // Screen space grows downwards, the canvas grows upwards.
        let points: Vec<(f64, f64, Axis, u32)> = radar_points(&dashboard.axes, 0.0, 0.0, 1.0)
            .into_iter()
            .map(|p| (p.x, -p.y, p.axis, p.value))
            .collect();
        let spokes: Vec<(f64, f64, Axis)> = radar_points(&full_axes(), 0.0, 0.0, 1.0)
            .into_iter()
            .map(|p| (p.x, -p.y, p.axis))
            .collect();

        let canvas = Canvas::default()
            .block(view_style::panel("Balance", view_style::ACCENT))
            .marker(Marker::Braille)
            .x_bounds([-1.4, 1.4])
            .y_bounds([-1.3, 1.3])
            .paint(move |ctx| {
                for &(x, y, _) in &spokes {
                    ctx.draw(&CanvasLine {
                        x1: 0.0,
                        y1: 0.0,
                        x2: x,
                        y2: y,
                        color: Color::DarkGray,
                    });
                }
                for i in 0..points.len() {
                    let (x1, y1, axis, _) = points[i];
                    let (x2, y2, _, _) = points[(i + 1) % points.len()];
                    ctx.draw(&CanvasLine {
                        x1,
                        y1,
                        x2,
                        y2,
                        color: view_style::axis_color(axis),
                    });
                }
                for (&(x, y, axis), &(_, _, _, value)) in spokes.iter().zip(points.iter()) {
                    ctx.print(
                        x * 1.05,
                        y * 1.05,
                        Line::from(Span::styled(
                            format!("{} {}", axis.label(), value),
                            Style::default().fg(view_style::axis_color(axis)),
                        )),
                    );
                }
            });
        f.render_widget(canvas, area);
    }

    fn render_today(&self, f: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(6)])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(rows[0]);

        let now = Instant::now();
        for key in BlockKey::ALL {
            self.render_block_column(f, columns[key.index()], key, now);
        }

        let note = self.store.state().current_note();
        let notes = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Notes: ", view_style::muted()),
                Span::raw(note.notes),
            ]),
            Line::from(vec![
                Span::styled("Reflection: ", view_style::muted()),
                Span::raw(note.reflection),
            ]),
        ])
        .wrap(Wrap { trim: true })
        .block(view_style::panel(
            format!("Day {} journal", self.store.state().current_day),
            Color::Gray,
        ));
        f.render_widget(notes, rows[1]);
    }

    fn render_block_column(&self, f: &mut Frame, area: Rect, key: BlockKey, now: Instant) {
        let block = self.store.state().blocks.get(key);
        let active = key == self.selected_block;
        let border = if active {
            view_style::ACCENT
        } else {
            view_style::axis_color(key.axis())
        };

        let mut title = format!("{} · {}", key, key.label());
        if block.done {
            title.push_str(" ✓");
        }
        if let Some(remaining) = self.timers.remaining(TimerSlot::Block(key), now) {
            title.push_str(&format!(" {}", format_countdown(remaining)));
        }

        let topic = if block.topic.is_empty() {
            "(no topic)"
        } else {
            block.topic.as_str()
        };
        let width = area.width.saturating_sub(4) as usize;

        let mut items = vec![
            ListItem::new(Line::from(Span::styled(
                ui_helpers::truncate_label(topic, width),
                Style::default().add_modifier(Modifier::BOLD),
            ))),
            ListItem::new(Line::from(Span::styled(
                ui_helpers::truncate_label(&block.link, width),
                view_style::muted(),
            ))),
        ];
        let header_rows = items.len();
        items.extend(block.tasks.iter().map(|task| {
            ListItem::new(Line::from(vec![
                view_style::check_span(task.done),
                Span::raw(ui_helpers::truncate_label(&task.text, width.saturating_sub(4))),
            ]))
        }));

        let mut list_state = ListState::default();
        if active && !block.tasks.is_empty() {
            let selected = ui_helpers::clamp_index(self.selected_task, block.tasks.len());
            list_state.select(Some(header_rows + selected));
        }

        let list = List::new(items)
            .block(view_style::panel(&title, border))
            .highlight_style(view_style::selected_style(active));
        f.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_settings(&self, f: &mut Frame, area: Rect) {
        let state = self.store.state();
        let lines = vec![
            Line::from(vec![
                Span::styled("Start date   ", view_style::muted()),
                Span::raw(state.start_date.format("%Y-%m-%d").to_string()),
            ]),
            Line::from(vec![
                Span::styled("Current day  ", view_style::muted()),
                Span::raw(format!("{} of {}", state.current_day, PLAN_DAYS)),
            ]),
            Line::from(vec![
                Span::styled("Plan days    ", view_style::muted()),
                Span::raw(state.plan.len().to_string()),
            ]),
            Line::from(vec![
                Span::styled("Books        ", view_style::muted()),
                Span::raw(format!(
                    "{} of {} read",
                    state.books.iter().filter(|b| b.done).count(),
                    state.books.len()
                )),
            ]),
            Line::from(""),
            Line::from(view_style::hint_line(
                "Changing the day reloads today's blocks from the plan.",
            )),
        ];

        let settings = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(view_style::panel("Settings", view_style::ACCENT));
        f.render_widget(settings, area);
    }
}

fn full_axes() -> Axes {
    let mut axes = Axes::default();
    for axis in Axis::ALL {
        *axes.get_mut(axis) = INSIGHT_SETTINGS.axis_cap;
    }
    axes
}
