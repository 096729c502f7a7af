use crate::constants::PLAN_DAYS;

use super::{AppState, Block, BlockKey, BlockSet, PlanEntry, Task, plan};

fn block_from_plan(entry: &PlanEntry, key: BlockKey) -> Block {
    let axis = key.axis();
    Block {
        topic: entry.title(axis).to_string(),
        link: entry.link(axis).to_string(),
        tasks: entry.tasks(axis).iter().map(Task::new).collect(),
        done: false,
    }
}

/// Replaces all three blocks with fresh copies of the plan's template for
/// `day`, discarding any completion state. No-op when the plan has no such day.
pub fn load_day_into_blocks(state: &mut AppState, day: u32) -> bool {
    let Some(entry) = plan::find_day(&state.plan, day) else {
        return false;
    };

    state.blocks = BlockSet {
        a: block_from_plan(entry, BlockKey::A),
        b: block_from_plan(entry, BlockKey::B),
        c: block_from_plan(entry, BlockKey::C),
    };
    true
}

/// Moves to the next day and materializes it. Stops at the last plan day.
pub fn advance_day(state: &mut AppState) -> bool {
    if state.current_day >= PLAN_DAYS {
        return false;
    }

    state.current_day += 1;
    state.blocks = BlockSet::default();
    let day = state.current_day;
    load_day_into_blocks(state, day);
    true
}
