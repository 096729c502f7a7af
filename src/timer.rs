//! Display-only countdowns. Each slot holds at most one running countdown;
//! none of this touches the tracker state.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use crate::domain::BlockKey;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TimerSlot {
    Block(BlockKey),
    Focus,
}

#[derive(Clone, Copy, Debug)]
struct Countdown {
    started: Instant,
    duration: Duration,
}

impl Countdown {
    fn remaining(&self, now: Instant) -> Duration {
        self.duration
            .saturating_sub(now.saturating_duration_since(self.started))
    }
}

#[derive(Default, Debug)]
pub struct CountdownBoard {
    running: HashMap<TimerSlot, Countdown>,
}

impl CountdownBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a countdown, replacing whatever was running in the slot.
    pub fn start(&mut self, slot: TimerSlot, duration: Duration, now: Instant) {
        self.running.insert(
            slot,
            Countdown {
                started: now,
                duration,
            },
        );
    }

    pub fn cancel(&mut self, slot: TimerSlot) -> bool {
        self.running.remove(&slot).is_some()
    }

    pub fn is_running(&self, slot: TimerSlot) -> bool {
        self.running.contains_key(&slot)
    }

    pub fn remaining(&self, slot: TimerSlot, now: Instant) -> Option<Duration> {
        self.running.get(&slot).map(|c| c.remaining(now))
    }

    /// Removes and returns every slot whose countdown has reached zero.
    pub fn take_finished(&mut self, now: Instant) -> Vec<TimerSlot> {
        let finished: Vec<TimerSlot> = self
            .running
            .iter()
            .filter(|(_, countdown)| countdown.remaining(now).is_zero())
            .map(|(slot, _)| *slot)
            .collect();
        for slot in &finished {
            self.running.remove(slot);
        }
        finished
    }
}

pub fn format_countdown(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restart_replaces_running_countdown() {
        let t0 = Instant::now();
        let mut board = CountdownBoard::new();
        let slot = TimerSlot::Block(BlockKey::A);

        board.start(slot, Duration::from_secs(60), t0);
        board.start(slot, Duration::from_secs(600), t0 + Duration::from_secs(30));

        let left = board
            .remaining(slot, t0 + Duration::from_secs(90))
            .unwrap();
        assert_eq!(left, Duration::from_secs(540));
        assert!(board.take_finished(t0 + Duration::from_secs(90)).is_empty());
    }

    #[test]
    fn test_cancel_has_no_residue() {
        let t0 = Instant::now();
        let mut board = CountdownBoard::new();
        board.start(TimerSlot::Focus, Duration::from_secs(5), t0);
        board.start(TimerSlot::Block(BlockKey::B), Duration::from_secs(5), t0);

        assert!(board.cancel(TimerSlot::Focus));
        assert!(!board.cancel(TimerSlot::Focus));
        assert!(!board.is_running(TimerSlot::Focus));

        let finished = board.take_finished(t0 + Duration::from_secs(10));
        assert_eq!(finished, vec![TimerSlot::Block(BlockKey::B)]);
        assert!(board.remaining(TimerSlot::Block(BlockKey::B), t0).is_none());
    }

    #[test]
    fn test_remaining_saturates() {
        let t0 = Instant::now();
        let mut board = CountdownBoard::new();
        board.start(TimerSlot::Focus, Duration::from_secs(2), t0);
        assert_eq!(
            board.remaining(TimerSlot::Focus, t0 + Duration::from_secs(9)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(Duration::from_secs(90 * 60)), "90:00");
        assert_eq!(format_countdown(Duration::from_secs(61)), "01:01");
        assert_eq!(format_countdown(Duration::ZERO), "00:00");
    }
}
