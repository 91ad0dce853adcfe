//! Property-based tests for progress roll-up, level math, badges, and
//! selection.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use focusgoals_core::gamification::{
    calculate_time_for_next_level, get_current_badge, get_next_badge, level_for_points,
    UserProgress, BADGES,
};
use focusgoals_core::goals::{aggregate_progress, SubGoal};
use focusgoals_core::selection::GoalSelection;
use focusgoals_core::utils::format_time;
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

fn arb_sub_goal() -> impl Strategy<Value = SubGoal> {
    (
        proptest::option::of("[a-z0-9]{4,12}"),
        "[a-z ]{1,20}",
        0.0f64..=100.0,
    )
        .prop_map(|(id, title, progress)| SubGoal {
            id,
            title,
            description: String::new(),
            progress,
            parent_goal_id: Some("parent".to_string()),
        })
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Formatted time always has two-digit minutes and seconds in range and
    /// parses back to the input.
    #[test]
    fn prop_format_time_shape(seconds in 0u64..10_000_000) {
        let formatted = format_time(seconds);
        let parts: Vec<&str> = formatted.split(':').collect();
        prop_assert_eq!(parts.len(), 3);
        prop_assert!(parts[0].len() >= 2);
        prop_assert_eq!(parts[1].len(), 2);
        prop_assert_eq!(parts[2].len(), 2);

        let h: u64 = parts[0].parse().unwrap();
        let m: u64 = parts[1].parse().unwrap();
        let s: u64 = parts[2].parse().unwrap();
        prop_assert!(m <= 59 && s <= 59);
        prop_assert_eq!(h * 3600 + m * 60 + s, seconds);
    }

    /// The current badge is the highest one the level meets.
    #[test]
    fn prop_current_badge_is_maximal(level in 1i64..1000) {
        let current = get_current_badge(level);
        prop_assert!(current.level <= level);
        prop_assert!(!BADGES
            .iter()
            .any(|b| current.level < b.level && b.level <= level));
    }

    /// The next badge is the lowest one above the level.
    #[test]
    fn prop_next_badge_is_minimal(level in -5i64..300) {
        match get_next_badge(level) {
            Some(next) => {
                prop_assert!(level < next.level);
                prop_assert!(!BADGES
                    .iter()
                    .any(|b| level < b.level && b.level < next.level));
            }
            None => prop_assert!(level >= BADGES[BADGES.len() - 1].level),
        }
    }

    /// Roll-up of in-range values stays in range.
    #[test]
    fn prop_aggregate_progress_in_bounds(goals in proptest::collection::vec(arb_sub_goal(), 0..20)) {
        let progress = aggregate_progress(&goals);
        prop_assert!((0..=100).contains(&progress));
        if goals.is_empty() {
            prop_assert_eq!(progress, 0);
        }
    }

    /// Levels never go down as points accumulate.
    #[test]
    fn prop_level_is_monotonic(a in 0i64..1_000_000, extra in 0i64..100_000) {
        prop_assert!(level_for_points(a) <= level_for_points(a + extra));
    }

    /// Derived progress never reports negative hours left.
    #[test]
    fn prop_hours_left_within_a_day(total in 0i64..10_000_000) {
        let progress = UserProgress::from_total_points(total);
        prop_assert!((1..=24).contains(&progress.hours_to_next_level));
        prop_assert_eq!(
            progress.hours_to_next_level,
            calculate_time_for_next_level(progress.earned_points, progress.points_for_next_level)
        );
    }

    /// Toggling the same goal twice restores the selection.
    #[test]
    fn prop_toggle_is_its_own_inverse(
        existing in proptest::collection::vec(arb_sub_goal(), 0..10),
        goal in arb_sub_goal(),
    ) {
        let mut selection = GoalSelection::new();
        for g in &existing {
            selection.toggle_selection(g);
        }
        let before = selection.snapshot();
        // A goal already selected is toggled with the stored value.
        let goal = goal
            .id
            .as_ref()
            .and_then(|id| before.get(id).cloned())
            .unwrap_or(goal);

        selection.toggle_selection(&goal);
        selection.toggle_selection(&goal);

        prop_assert_eq!(&*selection.snapshot(), &*before);
    }
}
