//! Domain event types.

use serde::{Deserialize, Serialize};

/// Domain events emitted by core services after successful mutations.
///
/// These events represent facts about domain data changes. Runtime adapters
/// translate them into platform-specific actions (timer display, level-up
/// notifications, cache refreshes).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// Parent goals or sub-goals were created, updated, reordered, or deleted.
    GoalsChanged { parent_goal_ids: Vec<String> },

    /// A goal became the focused goal. The focus timer should be shown.
    FocusStarted {
        goal_id: Option<String>,
        row_index: usize,
        goal_index: usize,
    },

    /// A focus interval finished and was recorded.
    FocusEnded {
        goal_id: Option<String>,
        duration_seconds: i64,
        points_earned: i64,
    },

    /// A recorded session pushed the user past one or more level boundaries.
    LevelUp {
        old_level: i64,
        new_level: i64,
        /// Names of badges unlocked by this level change
        unlocked_badges: Vec<String>,
    },
}

impl DomainEvent {
    /// Creates a GoalsChanged event.
    pub fn goals_changed(parent_goal_ids: Vec<String>) -> Self {
        Self::GoalsChanged { parent_goal_ids }
    }

    /// Creates a FocusStarted event.
    pub fn focus_started(goal_id: Option<String>, row_index: usize, goal_index: usize) -> Self {
        Self::FocusStarted {
            goal_id,
            row_index,
            goal_index,
        }
    }

    /// Creates a FocusEnded event.
    pub fn focus_ended(goal_id: Option<String>, duration_seconds: i64, points_earned: i64) -> Self {
        Self::FocusEnded {
            goal_id,
            duration_seconds,
            points_earned,
        }
    }

    /// Creates a LevelUp event.
    pub fn level_up(old_level: i64, new_level: i64, unlocked_badges: Vec<String>) -> Self {
        Self::LevelUp {
            old_level,
            new_level,
            unlocked_badges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_event_serialization() {
        let event = DomainEvent::goals_changed(vec!["goal-1".to_string()]);

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("goals_changed"));

        let deserialized: DomainEvent = serde_json::from_str(&json).unwrap();
        match deserialized {
            DomainEvent::GoalsChanged { parent_goal_ids } => {
                assert_eq!(parent_goal_ids, vec!["goal-1"]);
            }
            _ => panic!("Expected GoalsChanged"),
        }
    }

    #[test]
    fn test_level_up_serialization() {
        let event = DomainEvent::level_up(9, 10, vec!["Soldier".to_string()]);

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: DomainEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, event);
    }
}
