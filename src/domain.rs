use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{catalog::BookSeed, constants::PLAN_DAYS};

pub mod day_cycle;
pub mod insights;
pub mod plan;
pub mod progress;

pub use plan::PlanEntry;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Axis {
    Ai,
    Brand,
    Law,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Ai, Axis::Brand, Axis::Law];

    pub fn label(self) -> &'static str {
        match self {
            Axis::Ai => "AI",
            Axis::Brand => "Brand",
            Axis::Law => "Law",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Axis::Ai => 0,
            Axis::Brand => 1,
            Axis::Law => 2,
        }
    }
}

/// One of the three parallel daily focus areas.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BlockKey {
    A,
    B,
    C,
}

impl BlockKey {
    pub const ALL: [BlockKey; 3] = [BlockKey::A, BlockKey::B, BlockKey::C];

    pub fn axis(self) -> Axis {
        match self {
            BlockKey::A => Axis::Ai,
            BlockKey::B => Axis::Brand,
            BlockKey::C => Axis::Law,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BlockKey::A => "A",
            BlockKey::B => "B",
            BlockKey::C => "C",
        }
    }

    pub fn index(self) -> usize {
        self.axis().index()
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BlockKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "ai" => Ok(BlockKey::A),
            "b" | "brand" => Ok(BlockKey::B),
            "c" | "law" => Ok(BlockKey::C),
            other => Err(format!("unknown block '{}', expected a, b or c", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Task {
    #[serde(alias = "t", default)]
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct Block {
    pub topic: String,
    pub link: String,
    pub tasks: Vec<Task>,
    pub done: bool,
}

impl Block {
    pub fn tasks_complete(&self) -> bool {
        self.tasks.iter().all(|task| task.done)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BlockField {
    Topic,
    Link,
}

impl FromStr for BlockField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "topic" => Ok(BlockField::Topic),
            "link" => Ok(BlockField::Link),
            other => Err(format!("unknown block field '{}', expected topic or link", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct BlockSet {
    pub a: Block,
    pub b: Block,
    pub c: Block,
}

impl BlockSet {
    pub fn get(&self, key: BlockKey) -> &Block {
        match key {
            BlockKey::A => &self.a,
            BlockKey::B => &self.b,
            BlockKey::C => &self.c,
        }
    }

    pub fn get_mut(&mut self, key: BlockKey) -> &mut Block {
        match key {
            BlockKey::A => &mut self.a,
            BlockKey::B => &mut self.b,
            BlockKey::C => &mut self.c,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockKey, &Block)> {
        BlockKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    pub fn all_done(&self) -> bool {
        self.iter().all(|(_, block)| block.done)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct Axes {
    #[serde(rename = "AI")]
    pub ai: u32,
    #[serde(rename = "Brand")]
    pub brand: u32,
    #[serde(rename = "Law")]
    pub law: u32,
}

impl Axes {
    pub fn get(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Ai => self.ai,
            Axis::Brand => self.brand,
            Axis::Law => self.law,
        }
    }

    pub fn get_mut(&mut self, axis: Axis) -> &mut u32 {
        match axis {
            Axis::Ai => &mut self.ai,
            Axis::Brand => &mut self.brand,
            Axis::Law => &mut self.law,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct DayNote {
    pub notes: String,
    pub reflection: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NoteField {
    Notes,
    Reflection,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct BookEntry {
    pub id: String,
    pub title: String,
    pub focus: String,
    pub link: String,
    pub notes: String,
    pub done: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BookField {
    Title,
    Focus,
    Link,
    Notes,
}

impl FromStr for BookField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(BookField::Title),
            "focus" => Ok(BookField::Focus),
            "link" => Ok(BookField::Link),
            "notes" => Ok(BookField::Notes),
            other => Err(format!(
                "unknown book field '{}', expected title, focus, link or notes",
                other
            )),
        }
    }
}

impl BookEntry {
    pub fn field_mut(&mut self, field: BookField) -> &mut String {
        match field {
            BookField::Title => &mut self.title,
            BookField::Focus => &mut self.focus,
            BookField::Link => &mut self.link,
            BookField::Notes => &mut self.notes,
        }
    }
}

/// The single authoritative tracker record. Serialized as-is for persistence
/// and export.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub start_date: NaiveDate,
    pub current_day: u32,
    pub xp: u32,
    pub level: u32,
    pub streak: u32,
    pub axes: Axes,
    pub blocks: BlockSet,
    pub plan: Vec<PlanEntry>,
    pub day_notes: BTreeMap<u32, DayNote>,
    pub books: Vec<BookEntry>,
}

impl AppState {
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            current_day: 1,
            xp: 0,
            level: 1,
            streak: 0,
            axes: Axes::default(),
            blocks: BlockSet::default(),
            plan: Vec::new(),
            day_notes: BTreeMap::new(),
            books: Vec::new(),
        }
    }

    pub fn fresh() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn day_in_range(day: u32) -> bool {
        (1..=PLAN_DAYS).contains(&day)
    }

    pub fn current_note(&self) -> DayNote {
        self.day_notes
            .get(&self.current_day)
            .cloned()
            .unwrap_or_default()
    }

    pub fn edit_current_note(&mut self, field: NoteField, value: String) {
        let note = self.day_notes.entry(self.current_day).or_default();
        match field {
            NoteField::Notes => note.notes = value,
            NoteField::Reflection => note.reflection = value,
        }
    }

    pub fn add_task(&mut self, key: BlockKey, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.blocks.get_mut(key).tasks.push(Task::new(text));
        true
    }

    pub fn toggle_task(&mut self, key: BlockKey, index: usize) -> bool {
        match self.blocks.get_mut(key).tasks.get_mut(index) {
            Some(task) => {
                task.done = !task.done;
                true
            }
            None => false,
        }
    }

    pub fn edit_block_field(&mut self, key: BlockKey, field: BlockField, value: String) {
        let block = self.blocks.get_mut(key);
        match field {
            BlockField::Topic => block.topic = value,
            BlockField::Link => block.link = value,
        }
    }

    pub fn book_mut(&mut self, id: &str) -> Option<&mut BookEntry> {
        self.books.iter_mut().find(|book| book.id == id)
    }

    pub fn toggle_book(&mut self, id: &str) -> bool {
        match self.book_mut(id) {
            Some(book) => {
                book.done = !book.done;
                true
            }
            None => false,
        }
    }

    pub fn edit_book_field(&mut self, id: &str, field: BookField, value: String) -> bool {
        match self.book_mut(id) {
            Some(book) => {
                *book.field_mut(field) = value;
                true
            }
            None => false,
        }
    }

    /// Seeds the reading list once. A non-empty list is never reseeded, even
    /// after the user has removed entries from it.
    pub fn seed_books_if_empty(&mut self, catalog: &[BookSeed]) -> bool {
        if !self.books.is_empty() {
            return false;
        }

        self.books = catalog
            .iter()
            .enumerate()
            .map(|(i, seed)| BookEntry {
                id: format!("b{}", i),
                title: seed.title.to_string(),
                focus: seed.focus.to_string(),
                link: seed.link.to_string(),
                notes: String::new(),
                done: false,
            })
            .collect();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BOOK_CATALOG;

    fn sample_state() -> AppState {
        AppState::new(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap())
    }

    #[test]
    fn test_block_key_maps_to_axis() {
        assert_eq!(BlockKey::A.axis(), Axis::Ai);
        assert_eq!(BlockKey::B.axis(), Axis::Brand);
        assert_eq!(BlockKey::C.axis(), Axis::Law);
        assert_eq!("b".parse::<BlockKey>(), Ok(BlockKey::B));
        assert!("d".parse::<BlockKey>().is_err());
    }

    #[test]
    fn test_add_task_trims_and_ignores_blank() {
        let mut state = sample_state();
        assert!(!state.add_task(BlockKey::A, "   "));
        assert!(state.add_task(BlockKey::A, "  read chapter 3 "));

        let tasks = &state.blocks.a.tasks;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "read chapter 3");
        assert!(!tasks[0].done);
    }

    #[test]
    fn test_toggle_task_out_of_range_is_noop() {
        let mut state = sample_state();
        state.add_task(BlockKey::C, "pitch");
        assert!(state.toggle_task(BlockKey::C, 0));
        assert!(state.blocks.c.tasks[0].done);
        assert!(!state.toggle_task(BlockKey::C, 4));
        assert!(!state.blocks.c.done);
    }

    #[test]
    fn test_day_note_created_lazily() {
        let mut state = sample_state();
        assert!(state.day_notes.is_empty());
        assert_eq!(state.current_note(), DayNote::default());

        state.current_day = 4;
        state.edit_current_note(NoteField::Reflection, "steady".to_string());

        assert_eq!(state.day_notes.len(), 1);
        assert_eq!(state.day_notes[&4].reflection, "steady");
        assert_eq!(state.day_notes[&4].notes, "");
    }

    #[test]
    fn test_books_seeded_once() {
        let mut state = sample_state();
        assert!(state.seed_books_if_empty(BOOK_CATALOG));
        assert_eq!(state.books.len(), BOOK_CATALOG.len());
        assert_eq!(state.books[0].id, "b0");
        assert_eq!(state.books[11].id, "b11");

        state.books.truncate(2);
        assert!(!state.seed_books_if_empty(BOOK_CATALOG));
        assert_eq!(state.books.len(), 2);
    }

    #[test]
    fn test_book_edits_by_id() {
        let mut state = sample_state();
        state.seed_books_if_empty(BOOK_CATALOG);

        assert!(state.toggle_book("b3"));
        assert!(state.books[3].done);
        assert!(state.edit_book_field("b3", BookField::Notes, "position first".to_string()));
        assert_eq!(state.books[3].notes, "position first");

        let before = state.clone();
        assert!(!state.toggle_book("missing"));
        assert!(!state.edit_book_field("missing", BookField::Title, "x".to_string()));
        assert_eq!(state, before);
    }

    #[test]
    fn test_legacy_task_alias() {
        let task: Task = serde_json::from_str(r#"{"t":"Watch Week 1","done":true}"#).unwrap();
        assert_eq!(task.text, "Watch Week 1");
        assert!(task.done);
    }

    #[test]
    fn test_block_set_default_fills_missing_keys() {
        let blocks: BlockSet =
            serde_json::from_str(r#"{"b":{"topic":"Brand story","done":true}}"#).unwrap();
        assert_eq!(blocks.a, Block::default());
        assert_eq!(blocks.b.topic, "Brand story");
        assert!(blocks.b.done);
        assert!(blocks.b.tasks.is_empty());
        assert_eq!(blocks.c, Block::default());
    }
}
