//! Point and level math.
//!
//! One point is one minute of focus. Every level costs the same flat
//! [`POINTS_FOR_LEVEL_UP`] points.

use crate::constants::{POINTS_FOR_LEVEL_UP, SECONDS_PER_POINT, STARTING_LEVEL};

/// Points needed to go from `level` to `level + 1`. Flat for every level.
pub fn get_points_for_next_level(_level: i64) -> i64 {
    POINTS_FOR_LEVEL_UP
}

/// Whole hours of focus still needed to reach the next level.
///
/// Remaining points are converted to minutes (1:1) and then to hours,
/// rounding up at each step. The result is 0 or negative once
/// `earned_points >= points_for_next_level`; display code clamps it.
pub fn calculate_time_for_next_level(earned_points: i64, points_for_next_level: i64) -> i64 {
    let remaining_points = (points_for_next_level - earned_points) as f64;
    let minutes = (remaining_points / 1.0).ceil();
    (minutes / 60.0).ceil() as i64
}

/// Points earned by a focus interval: whole minutes only.
pub fn points_for_elapsed_seconds(elapsed_seconds: u64) -> i64 {
    (elapsed_seconds / SECONDS_PER_POINT) as i64
}

/// Level reached with `total_points` accumulated. Negative totals stay at the
/// starting level.
pub fn level_for_points(total_points: i64) -> i64 {
    STARTING_LEVEL + total_points.max(0) / POINTS_FOR_LEVEL_UP
}

/// Points accumulated inside the current level.
pub fn earned_points_in_level(total_points: i64) -> i64 {
    total_points.max(0) % POINTS_FOR_LEVEL_UP
}
