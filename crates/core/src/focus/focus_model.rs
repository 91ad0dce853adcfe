//! Focus state: the single active-goal slot and the focus timer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gamification::SessionOutcome;
use crate::goals::SubGoal;
use crate::utils::format_time;

/// The focused goal and where it sits in the goal grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveGoal<G = SubGoal> {
    pub goal: G,
    pub row_index: usize,
    pub goal_index: usize,
}

impl<G> ActiveGoal<G> {
    pub fn is_at(&self, row_index: usize, goal_index: usize) -> bool {
        self.row_index == row_index && self.goal_index == goal_index
    }
}

/// Outcome of [`ActiveGoalSlot::focus`].
#[derive(Debug, Clone, PartialEq)]
pub enum FocusTransition<G = SubGoal> {
    /// The requested position was already focused.
    Unchanged,
    /// A new goal is focused; the timer should be shown. Carries the goal it
    /// displaced, if any.
    Started { replaced: Option<ActiveGoal<G>> },
}

/// Holds at most one focused goal.
///
/// Transitions take `&mut self`, so only one writer can change the slot and a
/// transition is observed whole by every later read.
#[derive(Debug, Clone)]
pub struct ActiveGoalSlot<G = SubGoal> {
    active: Option<ActiveGoal<G>>,
}

impl<G> Default for ActiveGoalSlot<G> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<G> ActiveGoalSlot<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Focuses `goal` at `(row_index, goal_index)`.
    ///
    /// Re-focusing the current position is a no-op. Otherwise the slot is
    /// replaced in one step.
    pub fn focus(&mut self, goal: G, row_index: usize, goal_index: usize) -> FocusTransition<G> {
        if self
            .active
            .as_ref()
            .is_some_and(|a| a.is_at(row_index, goal_index))
        {
            return FocusTransition::Unchanged;
        }
        let replaced = self.active.replace(ActiveGoal {
            goal,
            row_index,
            goal_index,
        });
        FocusTransition::Started { replaced }
    }

    /// Clears the slot. Returns what was focused, if anything.
    pub fn unfocus(&mut self) -> Option<ActiveGoal<G>> {
        self.active.take()
    }

    pub fn active(&self) -> Option<&ActiveGoal<G>> {
        self.active.as_ref()
    }

    pub fn is_focused(&self) -> bool {
        self.active.is_some()
    }
}

/// Wall-clock timer for the current focus interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTimer {
    started_at: DateTime<Utc>,
}

impl FocusTimer {
    pub fn start(now: DateTime<Utc>) -> Self {
        Self { started_at: now }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Seconds since start. A clock that moved backwards reads as zero.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> u64 {
        (now - self.started_at).num_seconds().max(0) as u64
    }

    pub fn display(&self, now: DateTime<Utc>) -> String {
        format_time(self.elapsed_seconds(now))
    }
}

/// Snapshot of the focus state for display.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FocusStatus {
    pub active: Option<ActiveGoal>,
    pub started_at: Option<DateTime<Utc>>,
    pub elapsed_seconds: u64,
    /// `HH:MM:SS`
    pub elapsed_display: String,
}

/// Result of a focus or unfocus request on the focus service.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FocusChange {
    pub status: FocusStatus,
    /// True when a new goal became focused and the timer was (re)started
    pub timer_started: bool,
    /// The session recorded for the goal that lost focus, if any
    pub finished_session: Option<SessionOutcome>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn goal(id: &str) -> SubGoal {
        SubGoal {
            id: Some(id.to_string()),
            title: id.to_uppercase(),
            description: String::new(),
            progress: 0.0,
            parent_goal_id: Some("p".to_string()),
        }
    }

    #[test]
    fn refocusing_same_position_is_idempotent() {
        let mut slot = ActiveGoalSlot::new();
        assert_eq!(
            slot.focus(goal("a"), 0, 0),
            FocusTransition::Started { replaced: None }
        );
        assert_eq!(slot.focus(goal("a"), 0, 0), FocusTransition::Unchanged);
        assert_eq!(slot.active().map(|a| a.goal.id.as_deref()), Some(Some("a")));
    }

    #[test]
    fn focusing_another_position_replaces() {
        let mut slot = ActiveGoalSlot::new();
        slot.focus(goal("a"), 0, 0);
        match slot.focus(goal("b"), 1, 0) {
            FocusTransition::Started { replaced: Some(prev) } => {
                assert_eq!(prev.goal.id.as_deref(), Some("a"));
            }
            other => panic!("expected replacement, got {:?}", other),
        }
        let active = slot.active().unwrap();
        assert_eq!(active.goal.id.as_deref(), Some("b"));
        assert!(active.is_at(1, 0));
    }

    #[test]
    fn unfocus_is_unconditional() {
        let mut slot: ActiveGoalSlot = ActiveGoalSlot::new();
        assert!(slot.unfocus().is_none());
        slot.focus(goal("a"), 2, 3);
        assert!(slot.unfocus().is_some());
        assert!(!slot.is_focused());
    }

    #[test]
    fn timer_reports_elapsed_time() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let timer = FocusTimer::start(start);
        assert_eq!(timer.elapsed_seconds(start + Duration::seconds(3661)), 3661);
        assert_eq!(timer.display(start + Duration::seconds(3661)), "01:01:01");
        assert_eq!(timer.elapsed_seconds(start - Duration::seconds(5)), 0);
    }
}
