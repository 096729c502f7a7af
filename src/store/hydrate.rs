//! Field-by-field merge of a JSON document onto a state record.
//!
//! Persisted snapshots are merged leniently: a missing or ill-typed field keeps
//! its default. Imported backups are merged strictly: any ill-typed field
//! rejects the whole document before live state is touched.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{
    domain::{AppState, Axes, BlockSet, BookEntry, DayNote, PlanEntry, plan},
    error::ImportError,
};

#[derive(Debug, Clone, PartialEq)]
pub(super) struct FieldIssue {
    pub field: &'static str,
    pub reason: String,
}

impl From<FieldIssue> for ImportError {
    fn from(issue: FieldIssue) -> Self {
        ImportError::InvalidField {
            field: issue.field,
            reason: issue.reason,
        }
    }
}

fn lookup<'a>(doc: &'a Map<String, Value>, name: &str, aliases: &[&str]) -> Option<&'a Value> {
    doc.get(name)
        .or_else(|| aliases.iter().find_map(|alias| doc.get(*alias)))
}

fn merge_field<T, F>(
    doc: &Map<String, Value>,
    name: &'static str,
    aliases: &[&str],
    validate: fn(&T) -> Result<(), String>,
    issues: &mut Vec<FieldIssue>,
    apply: F,
) where
    T: DeserializeOwned,
    F: FnOnce(T),
{
    let Some(value) = lookup(doc, name, aliases) else {
        return;
    };

    let decoded = T::deserialize(value)
        .map_err(|e| e.to_string())
        .and_then(|decoded| validate(&decoded).map(|_| decoded));

    match decoded {
        Ok(decoded) => apply(decoded),
        Err(reason) => issues.push(FieldIssue {
            field: name,
            reason,
        }),
    }
}

fn any<T>(_: &T) -> Result<(), String> {
    Ok(())
}

fn day_in_range(day: &u32) -> Result<(), String> {
    if AppState::day_in_range(*day) {
        Ok(())
    } else {
        Err(format!("day {} is outside the plan", day))
    }
}

fn level_positive(level: &u32) -> Result<(), String> {
    if *level >= 1 {
        Ok(())
    } else {
        Err("level must be at least 1".to_string())
    }
}

fn plan_well_formed(entries: &Vec<PlanEntry>) -> Result<(), String> {
    if plan::is_well_formed(entries) {
        Ok(())
    } else {
        Err(format!(
            "plan must be empty or list every day in order, got {} entries",
            entries.len()
        ))
    }
}

/// Overwrites every known field that is present and well-typed. Returns the
/// fields that were present but rejected.
pub(super) fn merge(target: &mut AppState, doc: &Map<String, Value>) -> Vec<FieldIssue> {
    let mut issues = Vec::new();

    merge_field(doc, "startDate", &["start"], any::<NaiveDate>, &mut issues, |v| {
        target.start_date = v
    });
    merge_field(doc, "currentDay", &["day"], day_in_range, &mut issues, |v| {
        target.current_day = v
    });
    merge_field(doc, "xp", &[], any::<u32>, &mut issues, |v| target.xp = v);
    merge_field(doc, "level", &["lvl"], level_positive, &mut issues, |v| {
        target.level = v
    });
    merge_field(doc, "streak", &[], any::<u32>, &mut issues, |v| {
        target.streak = v
    });
    merge_field(doc, "axes", &[], any::<Axes>, &mut issues, |v| target.axes = v);
    merge_field(doc, "blocks", &[], any::<BlockSet>, &mut issues, |v| {
        target.blocks = v
    });
    merge_field(doc, "plan", &[], plan_well_formed, &mut issues, |v| {
        target.plan = v
    });
    merge_field(
        doc,
        "dayNotes",
        &[],
        any::<BTreeMap<u32, DayNote>>,
        &mut issues,
        |v| target.day_notes = v,
    );
    merge_field(doc, "books", &[], any::<Vec<BookEntry>>, &mut issues, |v| {
        target.books = v
    });

    issues
}

/// Builds a state from a persisted snapshot, keeping defaults wherever the
/// snapshot is silent or wrong.
pub(super) fn hydrate(doc: &Map<String, Value>) -> AppState {
    let mut state = AppState::fresh();
    for issue in merge(&mut state, doc) {
        warn!(
            "event=hydrate_field_skipped field={} reason={}",
            issue.field, issue.reason
        );
    }
    state
}

/// Shallow-merges a backup over `current`. The result is only returned when
/// every present field is valid, so callers can swap it in atomically.
pub(super) fn import_document(
    current: &AppState,
    doc: &Map<String, Value>,
) -> Result<AppState, ImportError> {
    let mut next = current.clone();
    let mut issues = merge(&mut next, doc);
    if issues.is_empty() {
        Ok(next)
    } else {
        Err(issues.remove(0).into())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test document must be an object"),
        }
    }

    #[test]
    fn test_hydrate_accepts_legacy_keys() {
        let doc = object(json!({
            "key": "sensei_flow_v9_state",
            "start": "2025-11-03",
            "day": 7,
            "lvl": 3,
            "xp": 12,
            "blocks": { "a": { "topic": "Prompting", "tasks": [{ "t": "Write prompts", "done": true }] } },
            "dayNotes": { "7": { "notes": "learned a lot" } }
        }));

        let state = hydrate(&doc);
        assert_eq!(state.start_date, NaiveDate::from_ymd_opt(2025, 11, 3).unwrap());
        assert_eq!(state.current_day, 7);
        assert_eq!(state.level, 3);
        assert_eq!(state.xp, 12);
        assert_eq!(state.blocks.a.tasks[0].text, "Write prompts");
        assert!(state.blocks.a.tasks[0].done);
        assert_eq!(state.blocks.b, Default::default());
        assert_eq!(state.day_notes[&7].notes, "learned a lot");
        assert_eq!(state.day_notes[&7].reflection, "");
    }

    #[test]
    fn test_hydrate_skips_ill_typed_fields() {
        let doc = object(json!({
            "currentDay": 140,
            "xp": "lots",
            "streak": 3,
            "plan": [{ "day": 2 }]
        }));

        let state = hydrate(&doc);
        assert_eq!(state.current_day, 1);
        assert_eq!(state.xp, 0);
        assert_eq!(state.streak, 3);
        assert!(state.plan.is_empty());
    }

    #[test]
    fn test_import_reports_first_bad_field() {
        let current = AppState::fresh();
        let doc = object(json!({ "streak": 2, "level": 0 }));

        let err = import_document(&current, &doc).unwrap_err();
        match err {
            ImportError::InvalidField { field, .. } => assert_eq!(field, "level"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_import_keeps_absent_fields() {
        let mut current = AppState::fresh();
        current.streak = 9;
        current.xp = 40;
        let doc = object(json!({ "xp": 5, "unknownFutureField": true }));

        let next = import_document(&current, &doc).unwrap();
        assert_eq!(next.xp, 5);
        assert_eq!(next.streak, 9);
    }

    #[test]
    fn test_large_counters_are_valid() {
        let current = AppState::fresh();
        let doc = object(json!({
            "level": 4_000_000_000u32,
            "xp": u32::MAX,
            "streak": u32::MAX,
            "axes": { "AI": u32::MAX, "Brand": 0, "Law": 7 }
        }));

        let next = import_document(&current, &doc).unwrap();
        assert_eq!(next.level, 4_000_000_000);
        assert_eq!(next.xp, u32::MAX);
        assert_eq!(next.streak, u32::MAX);
        assert_eq!(next.axes.ai, u32::MAX);
        assert_eq!(hydrate(&doc), next);
    }

    #[test]
    fn test_canonical_key_wins_over_alias() {
        let doc = object(json!({ "currentDay": 4, "day": 9 }));
        assert_eq!(hydrate(&doc).current_day, 4);
    }
}
