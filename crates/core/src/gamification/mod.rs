//! Gamification module - points, levels, badges and focus session history.

pub mod badges;
mod gamification_model;
mod gamification_service;
mod gamification_traits;
pub mod points;

pub use badges::{
    badges_unlocked_between, get_current_badge, get_next_badge, Badge, BADGES,
};
pub use gamification_model::{FocusSession, NewFocusSession, SessionOutcome, UserProgress};
pub use gamification_service::GamificationService;
pub use gamification_traits::{FocusSessionRepositoryTrait, GamificationServiceTrait};
pub use points::{
    calculate_time_for_next_level, earned_points_in_level, get_points_for_next_level,
    level_for_points, points_for_elapsed_seconds,
};
