//! Gamification domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::badges::{get_current_badge, get_next_badge, Badge};
use super::points::{
    calculate_time_for_next_level, earned_points_in_level, get_points_for_next_level,
    level_for_points,
};

/// A finished, persisted focus interval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FocusSession {
    pub id: String,
    pub goal_id: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_seconds: i64,
    pub points_earned: i64,
}

/// Input model for recording a focus session
#[derive(Debug, Clone)]
pub struct NewFocusSession {
    pub goal_id: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_seconds: i64,
    pub points_earned: i64,
}

/// Level standing derived from the user's accumulated points.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub total_points: i64,
    pub level: i64,
    /// Points accumulated inside the current level
    pub earned_points: i64,
    pub points_for_next_level: i64,
    /// Unclamped; can be 0 but never negative for derived progress
    pub hours_to_next_level: i64,
    pub current_badge: Badge,
    pub next_badge: Option<Badge>,
}

impl UserProgress {
    pub fn from_total_points(total_points: i64) -> Self {
        let level = level_for_points(total_points);
        let earned_points = earned_points_in_level(total_points);
        let points_for_next_level = get_points_for_next_level(level);
        Self {
            total_points,
            level,
            earned_points,
            points_for_next_level,
            hours_to_next_level: calculate_time_for_next_level(
                earned_points,
                points_for_next_level,
            ),
            current_badge: *get_current_badge(level),
            next_badge: get_next_badge(level).copied(),
        }
    }
}

/// Result of recording a focus session.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionOutcome {
    pub session: FocusSession,
    pub progress: UserProgress,
    pub leveled_up: bool,
    pub unlocked_badges: Vec<Badge>,
}
