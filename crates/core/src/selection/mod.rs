//! Selection module - copy-on-write multi-select over goals.

mod goal_selection;

pub use goal_selection::{GoalSelection, SelectionSnapshot};
