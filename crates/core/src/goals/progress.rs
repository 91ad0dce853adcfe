//! Progress roll-up from sub-goals to their parent.

use super::goals_model::SubGoal;

/// Mean of the sub-goal progress values, rounded to the nearest integer.
///
/// An empty list rolls up to 0. Values outside 0-100 are averaged as-is;
/// clamping for display is done with [`clamp_progress`] by the consumer.
pub fn aggregate_progress(goals: &[SubGoal]) -> i64 {
    if goals.is_empty() {
        return 0;
    }
    let total: f64 = goals.iter().map(|g| g.progress).sum();
    (total / goals.len() as f64).round() as i64
}

/// Clamps a progress value into the displayable 0-100 range.
pub fn clamp_progress(value: f64) -> f64 {
    value.max(0.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_progress(values: &[f64]) -> Vec<SubGoal> {
        values
            .iter()
            .enumerate()
            .map(|(i, p)| SubGoal {
                id: Some(format!("sub-{}", i)),
                title: format!("Step {}", i),
                description: String::new(),
                progress: *p,
                parent_goal_id: None,
            })
            .collect()
    }

    #[test]
    fn empty_rolls_up_to_zero() {
        assert_eq!(aggregate_progress(&[]), 0);
    }

    #[test]
    fn mean_of_values() {
        assert_eq!(aggregate_progress(&with_progress(&[50.0, 100.0])), 75);
        assert_eq!(aggregate_progress(&with_progress(&[0.0, 0.0, 100.0])), 33);
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(aggregate_progress(&with_progress(&[0.0, 1.0])), 1);
        assert_eq!(aggregate_progress(&with_progress(&[10.0, 20.0, 20.0])), 17);
    }

    #[test]
    fn out_of_range_values_are_not_clamped() {
        assert_eq!(aggregate_progress(&with_progress(&[150.0, 150.0])), 150);
        assert_eq!(aggregate_progress(&with_progress(&[-20.0])), -20);
    }

    #[test]
    fn clamp_bounds_display_values() {
        assert_eq!(clamp_progress(120.0), 100.0);
        assert_eq!(clamp_progress(-5.0), 0.0);
        assert_eq!(clamp_progress(42.5), 42.5);
    }
}
