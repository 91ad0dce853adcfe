//! SQLite storage implementation for goals.

mod model;
mod repository;

pub use model::{NewParentGoalDB, ParentGoalDB, SubGoalDB};
pub use repository::GoalRepository;
