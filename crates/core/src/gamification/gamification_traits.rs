use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::badges::Badge;
use super::gamification_model::{FocusSession, NewFocusSession, SessionOutcome, UserProgress};
use crate::errors::Result;

/// Trait for focus session repository operations
#[async_trait]
pub trait FocusSessionRepositoryTrait: Send + Sync {
    /// Sum of `points_earned` over every recorded session.
    fn get_total_points(&self) -> Result<i64>;

    /// Most recent sessions first.
    fn list_sessions(&self, limit: i64) -> Result<Vec<FocusSession>>;

    async fn insert_session(&self, new_session: NewFocusSession) -> Result<FocusSession>;
}

/// Trait for point, level and badge operations
#[async_trait]
pub trait GamificationServiceTrait: Send + Sync {
    fn get_user_progress(&self) -> Result<UserProgress>;

    fn get_badges(&self) -> Vec<Badge>;

    fn list_sessions(&self, limit: Option<i64>) -> Result<Vec<FocusSession>>;

    /// Persists a finished focus interval and awards its points.
    async fn record_session(
        &self,
        goal_id: Option<String>,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> Result<SessionOutcome>;
}
