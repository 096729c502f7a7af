use std::path::Path;

use chrono::NaiveDate;
use log::{info, warn};
use serde_json::Value;

use crate::{
    catalog::{BOOK_CATALOG, default_catalogs},
    constants::STORAGE_KEY,
    domain::{
        AppState, BlockField, BlockKey, BookField, NoteField,
        day_cycle,
        plan::{self, PlanCatalogs, PlanField},
        progress::{self, DayCommit},
    },
    error::{ImportError, PersistenceReadError, StoreError},
    storage::{self, KeyValueStore},
};

mod hydrate;

/// Which parts of a settings edit were accepted. Rejected parts are ignored
/// without error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub start_date_applied: bool,
    pub current_day_applied: bool,
}

/// Owns the canonical state and persists it after every mutation.
pub struct StateStore<S: KeyValueStore> {
    backend: S,
    state: AppState,
    catalogs: PlanCatalogs<'static>,
}

impl<S: KeyValueStore> StateStore<S> {
    pub fn load(backend: S) -> Self {
        Self::load_with_catalogs(backend, default_catalogs())
    }

    /// Hydrates from the backend, falling back to defaults on any read
    /// problem, then seeds books and generates the plan if they are missing.
    pub fn load_with_catalogs(backend: S, catalogs: PlanCatalogs<'static>) -> Self {
        let state = match read_snapshot(&backend) {
            Ok(state) => {
                info!("event=state_load status=ok day={}", state.current_day);
                state
            }
            Err(PersistenceReadError::Absent) => {
                info!("event=state_load status=absent");
                AppState::fresh()
            }
            Err(e) => {
                warn!("event=state_load status=fallback reason={}", e);
                AppState::fresh()
            }
        };

        let mut store = Self {
            backend,
            state,
            catalogs,
        };

        let mut changed = store.state.seed_books_if_empty(BOOK_CATALOG);
        if changed {
            info!("event=books_seeded count={}", store.state.books.len());
        }
        if store.state.plan.is_empty() {
            store.regenerate_plan();
            changed = true;
        }
        if changed && let Err(e) = store.save() {
            warn!("event=state_save status=error reason={}", e);
        }

        store
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> AppState {
        self.state.clone()
    }

    #[cfg(test)]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn save(&mut self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.state).map_err(storage_error)?;
        self.backend.set(STORAGE_KEY, &json).inspect_err(|e| {
            warn!("event=state_save status=error reason={}", e);
        })?;
        Ok(())
    }

    pub fn export(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(&self.state).map_err(storage_error)
    }

    pub fn export_to_path(&self, path: &Path) -> Result<(), StoreError> {
        let json = self.export()?;
        storage::write_text_file(path, &json)?;
        info!("event=export status=ok path={}", path.display());
        Ok(())
    }

    /// Replaces present fields with the backup's values. Live state is only
    /// touched once the whole document has been validated.
    pub fn import(&mut self, raw: &str) -> Result<(), StoreError> {
        let next = parse_import(&self.state, raw).inspect_err(|e| {
            warn!("event=import status=rejected reason={}", e);
        })?;

        self.state = next;
        info!("event=import status=ok day={}", self.state.current_day);
        self.save()
    }

    pub fn import_from_path(&mut self, path: &Path) -> Result<(), StoreError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ImportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.import(&raw)
    }

    pub fn add_task(&mut self, key: BlockKey, text: &str) -> Result<bool, StoreError> {
        let added = self.state.add_task(key, text);
        if added {
            self.save()?;
        }
        Ok(added)
    }

    pub fn toggle_task(&mut self, key: BlockKey, index: usize) -> Result<bool, StoreError> {
        let toggled = self.state.toggle_task(key, index);
        if toggled {
            self.save()?;
        }
        Ok(toggled)
    }

    pub fn edit_block_field(
        &mut self,
        key: BlockKey,
        field: BlockField,
        value: String,
    ) -> Result<(), StoreError> {
        self.state.edit_block_field(key, field, value);
        self.save()
    }

    pub fn finish_block(&mut self, key: BlockKey) -> Result<bool, StoreError> {
        let finished = progress::finish_block(&mut self.state, key);
        if finished {
            self.save()?;
        }
        Ok(finished)
    }

    /// The explicit end-of-day action. Always persists, whatever the outcome.
    pub fn save_day(&mut self) -> Result<DayCommit, StoreError> {
        let outcome = progress::commit_day(&mut self.state);
        self.save()?;
        Ok(outcome)
    }

    pub fn advance_day(&mut self) -> Result<bool, StoreError> {
        let advanced = day_cycle::advance_day(&mut self.state);
        if advanced {
            info!("event=advance_day day={}", self.state.current_day);
            self.save()?;
        }
        Ok(advanced)
    }

    pub fn edit_day_note(&mut self, field: NoteField, value: String) -> Result<(), StoreError> {
        self.state.edit_current_note(field, value);
        self.save()
    }

    pub fn edit_plan_field(
        &mut self,
        day: u32,
        field: PlanField,
        value: String,
    ) -> Result<bool, StoreError> {
        let edited = plan::edit_plan_field(&mut self.state.plan, day, field, value);
        if edited {
            self.save()?;
        } else {
            info!("event=plan_edit status=miss day={} field={}", day, field);
        }
        Ok(edited)
    }

    /// Rebuilds the whole plan from the catalogs, discarding edits, and
    /// reloads the current day.
    pub fn generate_full_plan(&mut self) -> Result<(), StoreError> {
        self.regenerate_plan();
        self.save()
    }

    /// Leaves the active blocks as they are until the next day load.
    pub fn clear_plan(&mut self) -> Result<(), StoreError> {
        self.state.plan.clear();
        info!("event=plan_cleared");
        self.save()
    }

    pub fn toggle_book(&mut self, id: &str) -> Result<bool, StoreError> {
        let toggled = self.state.toggle_book(id);
        if toggled {
            self.save()?;
        }
        Ok(toggled)
    }

    pub fn edit_book_field(
        &mut self,
        id: &str,
        field: BookField,
        value: String,
    ) -> Result<bool, StoreError> {
        let edited = self.state.edit_book_field(id, field, value);
        if edited {
            self.save()?;
        }
        Ok(edited)
    }

    /// Applies whichever of the two settings are valid, then reloads the
    /// current day from the plan.
    pub fn update_settings(
        &mut self,
        start_date: Option<&str>,
        current_day: Option<u32>,
    ) -> Result<SettingsUpdate, StoreError> {
        let mut update = SettingsUpdate::default();

        if let Some(date) = start_date.map(str::trim).filter(|d| !d.is_empty()) {
            match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
                Ok(parsed) => {
                    self.state.start_date = parsed;
                    update.start_date_applied = true;
                }
                Err(e) => info!("event=settings status=ignored field=startDate reason={}", e),
            }
        }

        if let Some(day) = current_day {
            if AppState::day_in_range(day) {
                self.state.current_day = day;
                update.current_day_applied = true;
            } else {
                info!("event=settings status=ignored field=currentDay value={}", day);
            }
        }

        let day = self.state.current_day;
        day_cycle::load_day_into_blocks(&mut self.state, day);
        self.save()?;
        Ok(update)
    }

    /// Discards everything and starts a fresh run from day 1.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.backend.remove(STORAGE_KEY)?;
        self.state = AppState::fresh();
        self.state.seed_books_if_empty(BOOK_CATALOG);
        self.regenerate_plan();
        info!("event=state_reset");
        self.save()
    }

    fn regenerate_plan(&mut self) {
        self.state.plan = plan::generate_full_plan(&self.catalogs);
        let day = self.state.current_day;
        day_cycle::load_day_into_blocks(&mut self.state, day);
        info!(
            "event=plan_generated days={} day={}",
            self.state.plan.len(),
            day
        );
    }
}

fn storage_error(e: serde_json::Error) -> StoreError {
    StoreError::Storage(e.into())
}

fn read_snapshot<S: KeyValueStore>(backend: &S) -> Result<AppState, PersistenceReadError> {
    let raw = backend
        .get(STORAGE_KEY)?
        .ok_or(PersistenceReadError::Absent)?;
    let Value::Object(doc) = serde_json::from_str::<Value>(&raw)? else {
        return Err(PersistenceReadError::NotAnObject);
    };
    Ok(hydrate::hydrate(&doc))
}

fn parse_import(current: &AppState, raw: &str) -> Result<AppState, ImportError> {
    let Value::Object(doc) = serde_json::from_str::<Value>(raw)? else {
        return Err(ImportError::NotAnObject);
    };
    hydrate::import_document(current, &doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::plan::PlanFieldKind, domain::Axis, storage::MemoryStore};

    fn fresh_store() -> StateStore<MemoryStore> {
        StateStore::load(MemoryStore::default())
    }

    fn store_with(raw: &str) -> StateStore<MemoryStore> {
        let mut backend = MemoryStore::default();
        backend
            .entries
            .insert(STORAGE_KEY.to_string(), raw.to_string());
        StateStore::load(backend)
    }

    fn persisted(store: &StateStore<MemoryStore>) -> String {
        store.backend().entries[STORAGE_KEY].clone()
    }

    #[test]
    fn test_load_from_empty_backend_seeds_and_plans() {
        let store = fresh_store();
        let state = store.state();

        assert_eq!(state.current_day, 1);
        assert_eq!(state.level, 1);
        assert_eq!(state.books.len(), BOOK_CATALOG.len());
        assert_eq!(state.plan.len(), 90);
        assert_eq!(state.blocks.a.topic, "Elements of AI — Intro");
        assert_eq!(state.blocks.c.tasks.len(), 3);
        assert!(store.backend().entries.contains_key(STORAGE_KEY));
    }

    #[test]
    fn test_load_corrupt_snapshot_falls_back_silently() {
        let store = store_with("{ not json");
        assert_eq!(store.state().current_day, 1);
        assert_eq!(store.state().plan.len(), 90);

        let store = store_with("[1, 2, 3]");
        assert_eq!(store.state().xp, 0);
    }

    #[test]
    fn test_load_keeps_existing_plan_and_progress() {
        let mut first = fresh_store();
        first.toggle_task(BlockKey::A, 0).unwrap();
        first.finish_block(BlockKey::A).unwrap();
        let raw = persisted(&first);

        let second = store_with(&raw);
        assert_eq!(second.state(), first.state());
        assert!(second.state().blocks.a.tasks[0].done);
    }

    #[test]
    fn test_books_not_reseeded_after_deletion() {
        let mut store = fresh_store();
        store.state.books.truncate(3);
        store.save().unwrap();

        let reloaded = store_with(&persisted(&store));
        assert_eq!(reloaded.state().books.len(), 3);
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut store = fresh_store();
        store.finish_block(BlockKey::B).unwrap();
        store.edit_day_note(NoteField::Notes, "radar ideas".to_string()).unwrap();
        store.toggle_book("b2").unwrap();
        store.advance_day().unwrap();
        let original = store.snapshot();
        let exported = store.export().unwrap();

        let mut other = fresh_store();
        other.import(&exported).unwrap();
        assert_eq!(other.snapshot(), original);
    }

    #[test]
    fn test_import_malformed_leaves_state_untouched() {
        let mut store = fresh_store();
        store.finish_block(BlockKey::C).unwrap();
        let before = store.snapshot();
        let persisted_before = persisted(&store);

        for raw in ["not json at all", "42", r#"{"currentDay": 0}"#, r#"{"plan": [{"day": 1}]}"#] {
            let err = store.import(raw).unwrap_err();
            assert!(matches!(err, StoreError::Import(_)), "{raw} -> {err}");
            assert_eq!(store.snapshot(), before);
            assert_eq!(persisted(&store), persisted_before);
        }
    }

    #[test]
    fn test_import_is_shallow_merge() {
        let mut store = fresh_store();
        store.finish_block(BlockKey::A).unwrap();
        let books_before = store.state().books.clone();

        store
            .import(r#"{"streak": 12, "axes": {"AI": 40}, "extra": "ignored"}"#)
            .unwrap();

        assert_eq!(store.state().streak, 12);
        assert_eq!(store.state().axes.ai, 40);
        assert_eq!(store.state().axes.brand, 0);
        assert_eq!(store.state().xp, 25);
        assert_eq!(store.state().books, books_before);
        assert!(persisted(&store).contains("\"streak\": 12"));
    }

    #[test]
    fn test_imported_extreme_counters_stay_usable() {
        let mut store = fresh_store();
        store.import(r#"{"level": 4000000000}"#).unwrap();
        let dash = crate::domain::insights::Dashboard::from_state(store.state());
        assert_eq!(dash.level, 4_000_000_000);
        assert_eq!(dash.xp_next, u32::MAX);
        assert!(store.finish_block(BlockKey::A).unwrap());

        store.import(r#"{"axes":{"AI":4294967295}}"#).unwrap();
        store.import(r#"{"blocks":{}}"#).unwrap();
        assert!(store.finish_block(BlockKey::A).unwrap());
        assert_eq!(store.state().axes.ai, u32::MAX);
        store.save_day().unwrap();
    }

    #[test]
    fn test_save_day_always_persists() {
        let mut store = fresh_store();
        let writes = store.backend().writes;

        assert_eq!(store.save_day().unwrap(), DayCommit::Broken);
        assert_eq!(store.backend().writes, writes + 1);
    }

    #[test]
    fn test_full_day_commit_through_store() {
        let mut store = fresh_store();
        for key in BlockKey::ALL {
            let count = store.state().blocks.get(key).tasks.len();
            for i in 0..count {
                store.toggle_task(key, i).unwrap();
            }
            store.finish_block(key).unwrap();
        }

        assert_eq!(store.save_day().unwrap(), DayCommit::Completed { streak: 1 });
        assert_eq!(store.state().level, 2);
        assert_eq!(store.state().xp, 25);
        assert_eq!(store.state().axes.ai, 2);
    }

    #[test]
    fn test_clear_plan_keeps_blocks() {
        let mut store = fresh_store();
        let blocks = store.state().blocks.clone();

        store.clear_plan().unwrap();
        assert!(store.state().plan.is_empty());
        assert_eq!(store.state().blocks, blocks);

        let field = PlanField::new(Axis::Ai, PlanFieldKind::Title);
        assert!(!store.edit_plan_field(3, field, "x".to_string()).unwrap());
        assert!(store.state().plan.is_empty());
    }

    #[test]
    fn test_generate_plan_replaces_edits() {
        let mut store = fresh_store();
        let field = PlanField::new(Axis::Brand, PlanFieldKind::Title);
        assert!(store.edit_plan_field(5, field, "Custom".to_string()).unwrap());
        assert_eq!(store.state().plan[4].brand_title, "Custom");

        store.generate_full_plan().unwrap();
        assert_eq!(store.state().plan[4].brand_title, "Copywriting Basics (Copyblogger)");
    }

    #[test]
    fn test_update_settings_ignores_invalid_fields() {
        let mut store = fresh_store();
        let start = store.state().start_date;

        let update = store.update_settings(Some(""), Some(91)).unwrap();
        assert_eq!(update, SettingsUpdate::default());
        assert_eq!(store.state().start_date, start);
        assert_eq!(store.state().current_day, 1);

        let update = store.update_settings(Some("2026-05-04"), Some(10)).unwrap();
        assert!(update.start_date_applied && update.current_day_applied);
        assert_eq!(store.state().current_day, 10);
        // day 10 wraps the seven-entry AI catalog back to its third course
        assert_eq!(store.state().blocks.a.topic, "Prompt Engineering Basics");
    }

    #[test]
    fn test_advance_day_at_end_is_noop() {
        let mut store = fresh_store();
        store.update_settings(None, Some(90)).unwrap();
        store.finish_block(BlockKey::A).unwrap();
        let before = store.snapshot();

        assert!(!store.advance_day().unwrap());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut store = fresh_store();
        store.advance_day().unwrap();
        store.finish_block(BlockKey::A).unwrap();
        store.state.books.clear();

        store.reset().unwrap();
        assert_eq!(store.state().current_day, 1);
        assert_eq!(store.state().xp, 0);
        assert_eq!(store.state().books.len(), BOOK_CATALOG.len());
        assert_eq!(store.state().plan.len(), 90);
    }

    #[test]
    fn test_write_failure_is_reported_but_state_mutates() {
        let mut store = fresh_store();
        store.backend.fail_writes = true;

        let err = store.add_task(BlockKey::B, "draft hooks").unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert_eq!(store.state().blocks.b.tasks.last().unwrap().text, "draft hooks");
    }
}
