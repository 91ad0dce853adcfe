//! Goals module - domain models, progress roll-up, services, and traits.

mod goals_model;
mod goals_service;
mod goals_traits;
pub mod progress;

pub use goals_model::{
    GoalLike, GoalSummary, NewParentGoal, NewSubGoal, ParentGoal, ParentGoalFormValues,
    ParentGoalUpdate, SubGoal, SubGoalData, SubGoalFormValues,
};
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
pub use progress::{aggregate_progress, clamp_progress};
