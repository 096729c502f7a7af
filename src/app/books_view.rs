use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
};

use super::{App, ui_helpers, view_style};

impl App {
    pub(super) fn render_books(&self, f: &mut Frame, area: Rect) {
        let books = &self.store.state().books;
        let read = books.iter().filter(|book| book.done).count();
        let title = format!("Books · {}/{} read", read, books.len());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let width = columns[0].width.saturating_sub(8) as usize;
        let items: Vec<ListItem> = books
            .iter()
            .map(|book| {
                ListItem::new(Line::from(vec![
                    view_style::check_span(book.done),
                    Span::raw(ui_helpers::truncate_label(&book.title, width)),
                ]))
            })
            .collect();

        let mut list_state = ListState::default();
        if !books.is_empty() {
            list_state.select(Some(ui_helpers::clamp_index(self.selected_book, books.len())));
        }
        let list = List::new(items)
            .block(view_style::panel(&title, Color::Yellow))
            .highlight_style(view_style::selected_style(true));
        f.render_stateful_widget(list, columns[0], &mut list_state);

        let Some(book) = list_state.selected().and_then(|i| books.get(i)) else {
            return;
        };
        let notes = if book.notes.is_empty() {
            Span::styled("No notes yet. Press e to write some.", view_style::muted())
        } else {
            Span::raw(book.notes.as_str())
        };
        let detail = Paragraph::new(vec![
            Line::from(Span::styled(
                book.title.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                book.focus.as_str(),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
            Line::from(Span::styled(book.link.as_str(), view_style::muted())),
            Line::from(""),
            Line::from(notes),
        ])
        .wrap(Wrap { trim: true })
        .block(view_style::panel("Notes", Color::Yellow));
        f.render_widget(detail, columns[1]);
    }
}
