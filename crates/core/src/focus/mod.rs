//! Focus module - single active-goal selection, focus timer and sessions.

mod focus_model;
mod focus_service;

pub use focus_model::{
    ActiveGoal, ActiveGoalSlot, FocusChange, FocusStatus, FocusTimer, FocusTransition,
};
pub use focus_service::FocusService;
