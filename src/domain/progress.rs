use log::info;

use crate::constants::XP_SETTINGS;

use super::{AppState, BlockKey};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DayCommit {
    Completed { streak: u32 },
    Broken,
}

pub fn xp_needed_for_level(level: u32) -> u32 {
    level
        .saturating_sub(1)
        .saturating_mul(XP_SETTINGS.per_level_xp)
        .saturating_add(XP_SETTINGS.base_level_xp)
}

/// Adds `amount` and rolls over as many levels as the total covers.
/// Returns the number of levels gained.
pub fn apply_xp(state: &mut AppState, amount: u32) -> u32 {
    state.xp = state.xp.saturating_add(amount);

    let mut gained = 0;
    while state.xp >= xp_needed_for_level(state.level) {
        state.xp -= xp_needed_for_level(state.level);
        state.level = state.level.saturating_add(1);
        gained += 1;
    }

    if gained > 0 {
        info!(
            "event=level_up level={} xp={} gained={}",
            state.level, state.xp, gained
        );
    }
    gained
}

pub fn evaluate_day_completion(state: &AppState) -> bool {
    state
        .blocks
        .iter()
        .all(|(_, block)| block.done && block.tasks_complete())
}

/// Must run once per explicit "save day" action. It is the only place the
/// streak grows or resets.
pub fn commit_day(state: &mut AppState) -> DayCommit {
    if evaluate_day_completion(state) {
        state.streak = state.streak.saturating_add(1);
        apply_xp(state, XP_SETTINGS.day_bonus);
        info!(
            "event=day_commit day={} status=complete streak={}",
            state.current_day, state.streak
        );
        DayCommit::Completed {
            streak: state.streak,
        }
    } else {
        state.streak = 0;
        info!(
            "event=day_commit day={} status=incomplete streak=0",
            state.current_day
        );
        DayCommit::Broken
    }
}

/// Marks the block done and pays out its reward. Returns false when the
/// block was already done, in which case nothing changes.
pub fn finish_block(state: &mut AppState, key: BlockKey) -> bool {
    let block = state.blocks.get_mut(key);
    if block.done {
        return false;
    }
    block.done = true;

    apply_xp(state, XP_SETTINGS.block_reward);
    let score = state.axes.get_mut(key.axis());
    *score = score.saturating_add(XP_SETTINGS.axis_gain);
    true
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::Task;

    fn state() -> AppState {
        AppState::new(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
    }

    #[test]
    fn test_xp_needed_grows_by_forty() {
        assert_eq!(xp_needed_for_level(1), 100);
        assert_eq!(xp_needed_for_level(2), 140);
        assert_eq!(xp_needed_for_level(10), 460);
        for level in 1..50 {
            assert!(xp_needed_for_level(level + 1) > xp_needed_for_level(level));
        }
    }

    #[test]
    fn test_apply_xp_single_level_up() {
        let mut s = state();
        s.xp = 90;
        assert_eq!(apply_xp(&mut s, 30), 1);
        assert_eq!(s.level, 2);
        assert_eq!(s.xp, 20);
    }

    #[test]
    fn test_apply_xp_multiple_level_ups() {
        let mut s = state();
        // 100 + 140 = 240 consumed, 60 left below the 180 needed for level 3.
        assert_eq!(apply_xp(&mut s, 300), 2);
        assert_eq!(s.level, 3);
        assert_eq!(s.xp, 60);
    }

    #[test]
    fn test_huge_level_saturates_instead_of_overflowing() {
        assert_eq!(xp_needed_for_level(u32::MAX), u32::MAX);

        let mut s = state();
        s.level = 4_000_000_000;
        s.streak = u32::MAX;
        s.axes.ai = u32::MAX;
        assert!(finish_block(&mut s, BlockKey::A));
        assert_eq!(s.axes.ai, u32::MAX);
        assert_eq!(s.level, 4_000_000_000);
        assert_eq!(s.xp, 25);

        s.level = u32::MAX;
        s.xp = u32::MAX - 10;
        apply_xp(&mut s, 100);
        assert_eq!(s.level, u32::MAX);
        assert!(s.xp < xp_needed_for_level(s.level));

        for key in [BlockKey::B, BlockKey::C] {
            finish_block(&mut s, key);
        }
        assert_eq!(commit_day(&mut s), DayCommit::Completed { streak: u32::MAX });
    }

    #[test]
    fn test_apply_xp_exact_threshold() {
        let mut s = state();
        apply_xp(&mut s, 100);
        assert_eq!(s.level, 2);
        assert_eq!(s.xp, 0);
    }

    #[test]
    fn test_finish_block_is_idempotent() {
        let mut s = state();
        assert!(finish_block(&mut s, BlockKey::B));
        assert_eq!(s.xp, 25);
        assert_eq!(s.axes.brand, 2);
        assert!(s.blocks.b.done);

        assert!(!finish_block(&mut s, BlockKey::B));
        assert_eq!(s.xp, 25);
        assert_eq!(s.axes.brand, 2);
        assert_eq!(s.axes.ai, 0);
        assert_eq!(s.axes.law, 0);
    }

    #[test]
    fn test_finishing_tasks_does_not_mark_block_done() {
        let mut s = state();
        s.blocks.a.tasks.push(Task::new("only task"));
        s.toggle_task(BlockKey::A, 0);
        assert!(!s.blocks.a.done);
    }

    #[test]
    fn test_day_completion_requires_blocks_and_tasks() {
        let mut s = state();
        assert!(!evaluate_day_completion(&s));

        for key in BlockKey::ALL {
            finish_block(&mut s, key);
        }
        // empty task lists never hold a day back
        assert!(evaluate_day_completion(&s));

        s.blocks.c.tasks.push(Task::new("rehearse"));
        assert!(!evaluate_day_completion(&s));
        s.toggle_task(BlockKey::C, 0);
        assert!(evaluate_day_completion(&s));
    }

    #[test]
    fn test_commit_day_complete_extends_streak() {
        let mut s = state();
        s.streak = 4;
        for key in BlockKey::ALL {
            finish_block(&mut s, key);
        }
        assert_eq!(s.xp, 75);

        assert_eq!(commit_day(&mut s), DayCommit::Completed { streak: 5 });
        assert_eq!(s.streak, 5);
        // 75 + 50 crosses the 100 needed for level 2
        assert_eq!(s.level, 2);
        assert_eq!(s.xp, 25);
    }

    #[test]
    fn test_commit_day_incomplete_resets_streak() {
        let mut s = state();
        s.streak = 7;
        finish_block(&mut s, BlockKey::A);
        let xp_before = s.xp;
        let level_before = s.level;

        assert_eq!(commit_day(&mut s), DayCommit::Broken);
        assert_eq!(s.streak, 0);
        assert_eq!(s.xp, xp_before);
        assert_eq!(s.level, level_before);
    }
}
