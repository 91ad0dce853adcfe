use crate::errors::Result;
use crate::goals::goals_model::{
    GoalSummary, NewParentGoal, NewSubGoal, ParentGoal, ParentGoalFormValues, ParentGoalUpdate,
    SubGoal, SubGoalData, SubGoalFormValues,
};
use async_trait::async_trait;

/// Trait for goal repository operations.
///
/// Implementations must list parent goals by `position` ascending, then by
/// creation time descending, with each parent's sub-goals embedded in
/// creation order.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn load_parent_goals(&self) -> Result<Vec<ParentGoal>>;
    fn get_parent_goal(&self, parent_goal_id: &str) -> Result<ParentGoal>;
    fn get_sub_goal(&self, sub_goal_id: &str) -> Result<SubGoal>;
    async fn insert_parent_goal(&self, new_goal: NewParentGoal) -> Result<ParentGoal>;
    async fn update_parent_goal(&self, goal_update: ParentGoalUpdate) -> Result<ParentGoal>;
    /// Deletes the parent and, through the store's cascade, its sub-goals.
    async fn delete_parent_goal(&self, parent_goal_id: String) -> Result<usize>;
    /// Assigns `position = index` to each id in order.
    async fn update_positions(&self, ordered_ids: Vec<String>) -> Result<usize>;
    async fn insert_sub_goal(&self, new_sub_goal: NewSubGoal) -> Result<SubGoal>;
    async fn update_sub_goal(&self, sub_goal: SubGoal) -> Result<SubGoal>;
    async fn update_sub_goal_progress(&self, sub_goal_id: String, progress: f64)
        -> Result<SubGoal>;
    async fn delete_sub_goals(&self, sub_goal_ids: Vec<String>) -> Result<usize>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_parent_goals(&self) -> Result<Vec<ParentGoal>>;
    fn get_parent_goal(&self, parent_goal_id: &str) -> Result<ParentGoal>;
    fn get_goal_summaries(&self) -> Result<Vec<GoalSummary>>;
    async fn create_parent_goal(&self, values: ParentGoalFormValues) -> Result<ParentGoal>;
    async fn update_parent_goal(&self, goal_update: ParentGoalUpdate) -> Result<ParentGoal>;
    async fn delete_parent_goal(&self, parent_goal_id: String) -> Result<usize>;
    async fn reorder_parent_goals(&self, ordered_ids: Vec<String>) -> Result<usize>;
    async fn create_sub_goal(
        &self,
        parent_goal_id: String,
        values: SubGoalFormValues,
    ) -> Result<SubGoal>;
    async fn update_sub_goal(&self, data: SubGoalData) -> Result<SubGoal>;
    async fn update_sub_goal_progress(&self, sub_goal_id: String, progress: f64)
        -> Result<SubGoal>;
    async fn delete_sub_goal(&self, sub_goal_id: String) -> Result<usize>;
    async fn delete_sub_goals(&self, sub_goal_ids: Vec<String>) -> Result<usize>;
}
