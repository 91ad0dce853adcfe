//! Goals domain models.

use serde::{Deserialize, Serialize};

use super::progress::aggregate_progress;

/// Fields shared by every goal shape.
///
/// There is no standalone base goal value; parent goals and sub-goals both
/// expose these through this trait so selection and validation can work over
/// either.
pub trait GoalLike {
    fn id(&self) -> Option<&str>;
    fn title(&self) -> &str;
    fn description(&self) -> &str;

    /// Drafts have no id until the store assigns one.
    fn is_draft(&self) -> bool {
        self.id().is_none()
    }
}

/// Concrete trackable unit with its own progress percentage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubGoal {
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Conventionally 0-100. Not clamped here.
    #[serde(default)]
    pub progress: f64,
    pub parent_goal_id: Option<String>,
}

/// Top-level goal grouping an ordered list of sub-goals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParentGoal {
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub position: Option<i32>,
    #[serde(default)]
    pub goals: Vec<SubGoal>,
}

impl ParentGoal {
    /// Rolled-up progress of the sub-goals, see [`aggregate_progress`].
    pub fn progress(&self) -> i64 {
        aggregate_progress(&self.goals)
    }
}

impl GoalLike for SubGoal {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl GoalLike for ParentGoal {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Form payload for creating a parent goal.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParentGoalFormValues {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub position: Option<i32>,
}

/// Update payload for an existing parent goal. Sub-goals are edited separately.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParentGoalUpdate {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub position: Option<i32>,
}

/// Form payload for creating a sub-goal under a known parent.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubGoalFormValues {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Flattened sub-goal transfer shape used for update payloads.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubGoalData {
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub progress: Option<f64>,
    pub parent_goal_id: Option<String>,
}

/// Validated input handed to the repository when inserting a parent goal.
#[derive(Debug, Clone)]
pub struct NewParentGoal {
    pub title: String,
    pub description: String,
    pub position: Option<i32>,
}

/// Validated input handed to the repository when inserting a sub-goal.
#[derive(Debug, Clone)]
pub struct NewSubGoal {
    pub parent_goal_id: String,
    pub title: String,
    pub description: String,
    pub progress: f64,
}

/// A parent goal together with its rolled-up progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalSummary {
    #[serde(flatten)]
    pub parent_goal: ParentGoal,
    pub progress: i64,
    pub sub_goal_count: usize,
}

impl From<ParentGoal> for GoalSummary {
    fn from(parent_goal: ParentGoal) -> Self {
        let progress = parent_goal.progress();
        let sub_goal_count = parent_goal.goals.len();
        Self {
            parent_goal,
            progress,
            sub_goal_count,
        }
    }
}
