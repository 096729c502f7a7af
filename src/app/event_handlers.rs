use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    constants::EXPORT_FILE_NAME,
    domain::{
        Axis, BlockField, BlockKey, BookField, NoteField,
        plan::{PlanField, PlanFieldKind},
        progress::DayCommit,
    },
};

use super::{App, InputTarget, Tab, UiMode, ui_helpers};

impl App {
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.render_needed = true;
        match self.ui_mode {
            UiMode::Input(target) => {
                self.handle_input_key(key, target);
                false
            }
            UiMode::Focus(_) => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    self.stop_focus();
                }
                false
            }
            UiMode::Main => self.handle_normal_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent, target: InputTarget) {
        match key.code {
            KeyCode::Esc => self.close_input(),
            KeyCode::Enter => {
                let value = std::mem::take(&mut self.input_buffer);
                self.close_input();
                self.commit_input(target, value);
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char(c) => self.input_buffer.push(c),
            _ => {}
        }
    }

    fn commit_input(&mut self, target: InputTarget, value: String) {
        match target {
            InputTarget::NewTask(block) => {
                let result = self.store.add_task(block, &value);
                if let Some(true) = self.report(result) {
                    self.selected_task = self.store.state().blocks.get(block).tasks.len() - 1;
                }
            }
            InputTarget::BlockTopic(block) => {
                let result = self.store.edit_block_field(block, BlockField::Topic, value);
                self.report(result);
            }
            InputTarget::BlockLink(block) => {
                let result = self.store.edit_block_field(block, BlockField::Link, value);
                self.report(result);
            }
            InputTarget::Notes => {
                let result = self.store.edit_day_note(NoteField::Notes, value);
                self.report(result);
            }
            InputTarget::Reflection => {
                let result = self.store.edit_day_note(NoteField::Reflection, value);
                self.report(result);
            }
            InputTarget::PlanField { day, field } => {
                let result = self.store.edit_plan_field(day, field, value);
                self.report(result);
            }
            InputTarget::BookNotes(index) => self.edit_book(index, BookField::Notes, value),
            InputTarget::BookLink(index) => self.edit_book(index, BookField::Link, value),
            InputTarget::StartDate => {
                let result = self.store.update_settings(Some(&value), None);
                if let Some(update) = self.report(result) {
                    if update.start_date_applied {
                        self.set_status("Settings saved.");
                    } else {
                        self.set_status("Start date must look like 2026-01-31");
                    }
                }
            }
            InputTarget::CurrentDay => {
                let day = value.trim().parse::<u32>().ok();
                let result = self.store.update_settings(None, day);
                if let Some(update) = self.report(result) {
                    if update.current_day_applied {
                        self.selected_task = 0;
                        self.set_status("Settings saved.");
                    } else {
                        self.set_status("Day must be between 1 and 90");
                    }
                }
            }
            InputTarget::ExportPath => {
                let path = PathBuf::from(value.trim());
                let result = self.store.export_to_path(&path);
                if self.report(result).is_some() {
                    self.set_status(format!("Exported to {}", path.display()));
                }
            }
            InputTarget::ImportPath => {
                let path = PathBuf::from(value.trim());
                let result = self.store.import_from_path(&path);
                if self.report(result).is_some() {
                    self.selected_task = 0;
                    self.set_status("Backup imported.");
                }
            }
        }
    }

    fn edit_book(&mut self, index: usize, field: BookField, value: String) {
        let Some(id) = self.store.state().books.get(index).map(|b| b.id.clone()) else {
            return;
        };
        let result = self.store.edit_book_field(&id, field, value);
        self.report(result);
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('s') if ctrl => {
                let result = self.store.save();
                if self.report(result).is_some() {
                    self.set_status("Saved.");
                }
                return false;
            }
            KeyCode::Tab => {
                self.tab = ui_helpers::tab_next(self.tab);
                return false;
            }
            KeyCode::BackTab => {
                self.tab = ui_helpers::tab_prev(self.tab);
                return false;
            }
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.tab = Tab::ALL[index];
                return false;
            }
            _ => {}
        }

        match self.tab {
            Tab::Dashboard => {}
            Tab::Today => self.handle_today_key(key),
            Tab::Plan => self.handle_plan_key(key),
            Tab::Books => self.handle_books_key(key),
            Tab::Settings => self.handle_settings_key(key),
        }
        false
    }

    fn handle_today_key(&mut self, key: KeyEvent) {
        let block = self.selected_block;
        let task_count = self.store.state().blocks.get(block).tasks.len();

        match key.code {
            KeyCode::Left => {
                let index = ui_helpers::wrap_prev_index(block.index(), BlockKey::ALL.len());
                self.selected_block = BlockKey::ALL[index];
                self.selected_task = 0;
            }
            KeyCode::Right => {
                let index = ui_helpers::wrap_next_index(block.index(), BlockKey::ALL.len());
                self.selected_block = BlockKey::ALL[index];
                self.selected_task = 0;
            }
            KeyCode::Up => {
                self.selected_task = ui_helpers::wrap_prev_index(self.selected_task, task_count);
            }
            KeyCode::Down => {
                self.selected_task = ui_helpers::wrap_next_index(self.selected_task, task_count);
            }
            KeyCode::Char(' ') => {
                let result = self.store.toggle_task(block, self.selected_task);
                self.report(result);
            }
            KeyCode::Char('a') => self.open_input(InputTarget::NewTask(block), String::new()),
            KeyCode::Char('t') => {
                let topic = self.store.state().blocks.get(block).topic.clone();
                self.open_input(InputTarget::BlockTopic(block), topic);
            }
            KeyCode::Char('l') => {
                let link = self.store.state().blocks.get(block).link.clone();
                self.open_input(InputTarget::BlockLink(block), link);
            }
            KeyCode::Char('e') => {
                let notes = self.store.state().current_note().notes;
                self.open_input(InputTarget::Notes, notes);
            }
            KeyCode::Char('r') => {
                let reflection = self.store.state().current_note().reflection;
                self.open_input(InputTarget::Reflection, reflection);
            }
            KeyCode::Char('f') => {
                let result = self.store.finish_block(block);
                match self.report(result) {
                    Some(true) => self.set_status(format!("Block {} completed! +25 XP", block)),
                    Some(false) => self.set_status(format!("Block {} is already done", block)),
                    None => {}
                }
            }
            KeyCode::Enter => self.start_focus(block),
            KeyCode::Char('s') => {
                let result = self.store.save_day();
                match self.report(result) {
                    Some(DayCommit::Completed { streak }) => {
                        self.set_status(format!("Day saved! Streak {}", streak))
                    }
                    Some(DayCommit::Broken) => {
                        self.set_status("Day saved. Streak reset: not every block was complete")
                    }
                    None => {}
                }
            }
            KeyCode::Char('n') => {
                let result = self.store.advance_day();
                match self.report(result) {
                    Some(true) => {
                        self.selected_task = 0;
                        let day = self.store.state().current_day;
                        self.selected_plan_day = day.saturating_sub(1) as usize;
                        self.set_status(format!("Welcome to day {}", day));
                    }
                    Some(false) => self.set_status("That was the last day of the plan"),
                    None => {}
                }
            }
            _ => {}
        }
    }

    fn selected_plan_field(&self, kind: PlanFieldKind) -> PlanField {
        PlanField::new(self.selected_block.axis(), kind)
    }

    fn handle_plan_key(&mut self, key: KeyEvent) {
        let plan_len = self.store.state().plan.len();

        match key.code {
            KeyCode::Up => {
                self.selected_plan_day = ui_helpers::wrap_prev_index(self.selected_plan_day, plan_len);
            }
            KeyCode::Down => {
                self.selected_plan_day = ui_helpers::wrap_next_index(self.selected_plan_day, plan_len);
            }
            KeyCode::PageUp => {
                self.selected_plan_day = self.selected_plan_day.saturating_sub(10);
            }
            KeyCode::PageDown => {
                self.selected_plan_day =
                    ui_helpers::clamp_index(self.selected_plan_day + 10, plan_len);
            }
            KeyCode::Left => {
                let index = ui_helpers::wrap_prev_index(self.selected_block.index(), Axis::ALL.len());
                self.selected_block = BlockKey::ALL[index];
            }
            KeyCode::Right => {
                let index = ui_helpers::wrap_next_index(self.selected_block.index(), Axis::ALL.len());
                self.selected_block = BlockKey::ALL[index];
            }
            KeyCode::Char('e') | KeyCode::Char('l') => {
                let kind = if key.code == KeyCode::Char('e') {
                    PlanFieldKind::Title
                } else {
                    PlanFieldKind::Link
                };
                let Some(entry) = self.store.state().plan.get(self.selected_plan_day) else {
                    return;
                };
                let axis = self.selected_block.axis();
                let current = match kind {
                    PlanFieldKind::Title => entry.title(axis),
                    PlanFieldKind::Link => entry.link(axis),
                }
                .to_string();
                let target = InputTarget::PlanField {
                    day: entry.day,
                    field: self.selected_plan_field(kind),
                };
                self.open_input(target, current);
            }
            KeyCode::Char('g') => {
                let result = self.store.generate_full_plan();
                if self.report(result).is_some() {
                    self.selected_task = 0;
                    self.set_status("Full 90-day plan loaded.");
                }
            }
            KeyCode::Char('x') => {
                let result = self.store.clear_plan();
                if self.report(result).is_some() {
                    self.selected_plan_day = 0;
                    self.set_status("Plan cleared.");
                }
            }
            _ => {}
        }
    }

    fn handle_books_key(&mut self, key: KeyEvent) {
        let count = self.store.state().books.len();

        match key.code {
            KeyCode::Up => {
                self.selected_book = ui_helpers::wrap_prev_index(self.selected_book, count);
            }
            KeyCode::Down => {
                self.selected_book = ui_helpers::wrap_next_index(self.selected_book, count);
            }
            KeyCode::Char(' ') => {
                let Some(id) = self
                    .store
                    .state()
                    .books
                    .get(self.selected_book)
                    .map(|b| b.id.clone())
                else {
                    return;
                };
                let result = self.store.toggle_book(&id);
                self.report(result);
            }
            KeyCode::Char('e') => {
                if let Some(book) = self.store.state().books.get(self.selected_book) {
                    let notes = book.notes.clone();
                    self.open_input(InputTarget::BookNotes(self.selected_book), notes);
                }
            }
            KeyCode::Char('l') => {
                if let Some(book) = self.store.state().books.get(self.selected_book) {
                    let link = book.link.clone();
                    self.open_input(InputTarget::BookLink(self.selected_book), link);
                }
            }
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('d') => {
                let start = self.store.state().start_date.format("%Y-%m-%d").to_string();
                self.open_input(InputTarget::StartDate, start);
            }
            KeyCode::Char('c') => {
                let day = self.store.state().current_day.to_string();
                self.open_input(InputTarget::CurrentDay, day);
            }
            KeyCode::Char('x') => {
                let default_path = std::env::current_dir()
                    .map(|dir| dir.join(EXPORT_FILE_NAME))
                    .unwrap_or_else(|_| PathBuf::from(EXPORT_FILE_NAME));
                self.open_input(
                    InputTarget::ExportPath,
                    default_path.display().to_string(),
                );
            }
            KeyCode::Char('i') => self.open_input(InputTarget::ImportPath, String::new()),
            _ => {}
        }
    }
}
