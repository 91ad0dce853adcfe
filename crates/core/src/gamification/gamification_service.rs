use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};

use super::badges::{badges_unlocked_between, Badge, BADGES};
use super::gamification_model::{FocusSession, NewFocusSession, SessionOutcome, UserProgress};
use super::gamification_traits::{FocusSessionRepositoryTrait, GamificationServiceTrait};
use super::points::points_for_elapsed_seconds;
use crate::constants::DEFAULT_SESSION_HISTORY_LIMIT;
use crate::errors::{Error, Result, ValidationError};
use crate::events::{DomainEvent, DomainEventSink};

pub struct GamificationService {
    session_repository: Arc<dyn FocusSessionRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl GamificationService {
    pub fn new(
        session_repository: Arc<dyn FocusSessionRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        GamificationService {
            session_repository,
            event_sink,
        }
    }
}

#[async_trait]
impl GamificationServiceTrait for GamificationService {
    fn get_user_progress(&self) -> Result<UserProgress> {
        let total_points = self.session_repository.get_total_points()?;
        Ok(UserProgress::from_total_points(total_points))
    }

    fn get_badges(&self) -> Vec<Badge> {
        BADGES.to_vec()
    }

    fn list_sessions(&self, limit: Option<i64>) -> Result<Vec<FocusSession>> {
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_SESSION_HISTORY_LIMIT);
        self.session_repository.list_sessions(limit)
    }

    async fn record_session(
        &self,
        goal_id: Option<String>,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> Result<SessionOutcome> {
        if ended_at < started_at {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "focus session ends ({}) before it starts ({})",
                ended_at, started_at
            ))));
        }

        let duration_seconds = (ended_at - started_at).num_seconds();
        let points_earned = points_for_elapsed_seconds(duration_seconds as u64);
        let before = UserProgress::from_total_points(self.session_repository.get_total_points()?);

        let session = self
            .session_repository
            .insert_session(NewFocusSession {
                goal_id: goal_id.clone(),
                started_at,
                ended_at,
                duration_seconds,
                points_earned,
            })
            .await?;
        debug!(
            "Recorded focus session {} ({}s, {} points)",
            session.id, duration_seconds, points_earned
        );

        let progress = UserProgress::from_total_points(before.total_points + points_earned);
        let leveled_up = progress.level > before.level;
        let unlocked_badges: Vec<Badge> = badges_unlocked_between(before.level, progress.level)
            .into_iter()
            .copied()
            .collect();

        let mut events = vec![DomainEvent::focus_ended(
            goal_id,
            duration_seconds,
            points_earned,
        )];
        if leveled_up {
            info!("Level up: {} -> {}", before.level, progress.level);
            events.push(DomainEvent::level_up(
                before.level,
                progress.level,
                unlocked_badges.iter().map(|b| b.name.to_string()).collect(),
            ));
        }
        self.event_sink.emit_batch(events);

        Ok(SessionOutcome {
            session,
            progress,
            leveled_up,
            unlocked_badges,
        })
    }
}
