//! Values derived from the state for the dashboard: day progress, the
//! three-axis radar and the coach line.

use std::{f64::consts::PI, fmt};

use chrono::NaiveDate;

use crate::constants::{INSIGHT_SETTINGS, PLAN_DAYS};

use super::{AppState, Axes, Axis, progress::xp_needed_for_level};

pub fn progress_percent(current_day: u32) -> u32 {
    let elapsed = current_day.saturating_sub(1) as f64;
    (elapsed / PLAN_DAYS as f64 * 100.0).round() as u32
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadarPoint {
    pub axis: Axis,
    pub value: u32,
    pub x: f64,
    pub y: f64,
}

/// Places each axis score on its spoke, starting straight up and going
/// clockwise. Scores are capped so the polygon never leaves the chart.
pub fn radar_points(axes: &Axes, cx: f64, cy: f64, radius: f64) -> Vec<RadarPoint> {
    let spokes = Axis::ALL.len() as f64;
    Axis::ALL
        .iter()
        .enumerate()
        .map(|(i, &axis)| {
            let value = axes.get(axis).min(INSIGHT_SETTINGS.axis_cap);
            let angle = -PI / 2.0 + i as f64 * 2.0 * PI / spokes;
            let r = radius * value as f64 / INSIGHT_SETTINGS.axis_cap as f64;
            RadarPoint {
                axis,
                value,
                x: cx + r * angle.cos(),
                y: cy + r * angle.sin(),
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct CoachMessage {
    pub headline: &'static str,
    pub tip: &'static str,
}

impl fmt::Display for CoachMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Tip: {}", self.headline, self.tip)
    }
}

pub fn coach_message(state: &AppState) -> CoachMessage {
    let headline = if state.blocks.all_done() {
        "Full day complete. Discipline compounds."
    } else {
        "Finish all 3 focus blocks today."
    };

    let tip = if state.current_note().notes.chars().count() > INSIGHT_SETTINGS.deep_notes_chars {
        "Nice depth. Turn this into 1 headline."
    } else {
        "Write 2 bullets: What I learned / How it helps my future."
    };

    CoachMessage { headline, tip }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dashboard {
    pub current_day: u32,
    pub start_date: NaiveDate,
    pub progress_percent: u32,
    pub xp: u32,
    pub xp_next: u32,
    pub level: u32,
    pub streak: u32,
    pub axes: Axes,
    pub coach: CoachMessage,
}

impl Dashboard {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            current_day: state.current_day,
            start_date: state.start_date,
            progress_percent: progress_percent(state.current_day),
            xp: state.xp,
            xp_next: xp_needed_for_level(state.level),
            level: state.level,
            streak: state.streak,
            axes: state.axes.clone(),
            coach: coach_message(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BlockKey, NoteField, progress::finish_block};

    #[test]
    fn test_progress_percent_rounds() {
        assert_eq!(progress_percent(1), 0);
        assert_eq!(progress_percent(2), 1);
        assert_eq!(progress_percent(46), 50);
        assert_eq!(progress_percent(90), 99);
    }

    #[test]
    fn test_radar_points_clamp_and_orient() {
        let axes = Axes {
            ai: 250,
            brand: 0,
            law: 50,
        };
        let points = radar_points(&axes, 130.0, 130.0, 100.0);

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].value, 100);
        assert!((points[0].x - 130.0).abs() < 1e-9);
        assert!((points[0].y - 30.0).abs() < 1e-9);
        assert!((points[1].x - 130.0).abs() < 1e-9);
        assert!((points[1].y - 130.0).abs() < 1e-9);
        // screen y grows downward, so the Law spoke sits lower-left
        assert!(points[2].x < 130.0);
        assert!(points[2].y > 130.0);
    }

    #[test]
    fn test_coach_message_tracks_blocks_and_notes() {
        let mut state = AppState::new(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap());
        let idle = coach_message(&state);
        assert_eq!(idle.headline, "Finish all 3 focus blocks today.");
        assert!(idle.tip.starts_with("Write 2 bullets"));

        for key in BlockKey::ALL {
            finish_block(&mut state, key);
        }
        state.edit_current_note(NoteField::Notes, "n".repeat(61));
        let done = coach_message(&state);
        assert_eq!(done.headline, "Full day complete. Discipline compounds.");
        assert_eq!(done.tip, "Nice depth. Turn this into 1 headline.");
    }

    #[test]
    fn test_dashboard_reports_next_threshold() {
        let mut state = AppState::new(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap());
        state.level = 3;
        state.current_day = 10;
        let dashboard = Dashboard::from_state(&state);
        assert_eq!(dashboard.xp_next, 180);
        assert_eq!(dashboard.progress_percent, 10);
    }
}
