//! SQLite storage implementation for focus sessions.

mod model;
mod repository;

pub use model::{FocusSessionDB, NewFocusSessionDB};
pub use repository::FocusSessionRepository;
