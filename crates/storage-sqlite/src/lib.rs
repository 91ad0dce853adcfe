//! SQLite storage implementation for FocusGoals.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `focusgoals-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for goals and focus sessions
//!
//! This crate is the only place in the application where Diesel dependencies exist.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod goals;
pub mod sessions;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use goals::GoalRepository;
pub use sessions::FocusSessionRepository;

// Re-export from focusgoals-core for convenience
pub use focusgoals_core::errors::{DatabaseError, Error, Result};
