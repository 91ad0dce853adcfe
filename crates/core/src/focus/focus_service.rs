use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, error};

use super::focus_model::{ActiveGoal, ActiveGoalSlot, FocusChange, FocusStatus, FocusTimer};
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};
use crate::gamification::{GamificationServiceTrait, SessionOutcome};
use crate::goals::SubGoal;

/// Runs focus sessions: keeps the single active-goal slot, times the
/// interval and records a session whenever a goal loses focus.
///
/// Methods take `&mut self`; callers sharing one instance wrap it in a mutex
/// so transitions never interleave.
pub struct FocusService {
    slot: ActiveGoalSlot<SubGoal>,
    timer: Option<FocusTimer>,
    gamification_service: Arc<dyn GamificationServiceTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl FocusService {
    pub fn new(
        gamification_service: Arc<dyn GamificationServiceTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        FocusService {
            slot: ActiveGoalSlot::new(),
            timer: None,
            gamification_service,
            event_sink,
        }
    }

    pub fn active(&self) -> Option<&ActiveGoal<SubGoal>> {
        self.slot.active()
    }

    pub fn status(&self, now: DateTime<Utc>) -> FocusStatus {
        let elapsed_seconds = self
            .timer
            .map(|t| t.elapsed_seconds(now))
            .unwrap_or_default();
        FocusStatus {
            active: self.slot.active().cloned(),
            started_at: self.timer.map(|t| t.started_at()),
            elapsed_seconds,
            elapsed_display: crate::utils::format_time(elapsed_seconds),
        }
    }

    /// Focuses `goal`. Re-focusing the current position changes nothing;
    /// focusing elsewhere records the current session first and leaves the
    /// focus untouched if that fails.
    pub async fn focus(
        &mut self,
        goal: SubGoal,
        row_index: usize,
        goal_index: usize,
        now: DateTime<Utc>,
    ) -> Result<FocusChange> {
        if self
            .slot
            .active()
            .is_some_and(|active| active.is_at(row_index, goal_index))
        {
            return Ok(FocusChange {
                status: self.status(now),
                timer_started: false,
                finished_session: None,
            });
        }

        let finished_session = match (self.slot.active().cloned(), self.timer) {
            (Some(previous), Some(timer)) => Some(self.finish(previous, timer, now).await?),
            _ => None,
        };

        let goal_id = goal.id.clone();
        // The outgoing session is already recorded; the transition is a plain replace.
        self.slot.focus(goal, row_index, goal_index);
        self.timer = Some(FocusTimer::start(now));
        debug!(
            "Focused goal {:?} at ({}, {})",
            goal_id, row_index, goal_index
        );
        self.event_sink
            .emit(DomainEvent::focus_started(goal_id, row_index, goal_index));

        Ok(FocusChange {
            status: self.status(now),
            timer_started: true,
            finished_session,
        })
    }

    /// Clears the focused goal. Harmless when nothing is focused.
    pub async fn unfocus(&mut self, now: DateTime<Utc>) -> Result<FocusChange> {
        let previous = self.slot.unfocus();
        let previous_timer = self.timer.take();

        let finished_session = match (previous, previous_timer) {
            (Some(previous), Some(timer)) => Some(self.finish(previous, timer, now).await?),
            _ => None,
        };

        Ok(FocusChange {
            status: self.status(now),
            timer_started: false,
            finished_session,
        })
    }

    async fn finish(
        &self,
        previous: ActiveGoal<SubGoal>,
        timer: FocusTimer,
        now: DateTime<Utc>,
    ) -> Result<SessionOutcome> {
        let ended_at = now.max(timer.started_at());
        self.gamification_service
            .record_session(previous.goal.id, timer.started_at(), ended_at)
            .await
            .map_err(|e| {
                error!("Failed to record focus session: {}", e);
                e
            })
    }
}
