//! FocusGoals Core - Domain entities, derivations, services, and traits.
//!
//! This crate contains the goal hierarchy, progress roll-up, focus sessions
//! and the level/badge model. It is database- and transport-agnostic and
//! defines traits that are implemented by the `storage-sqlite` and
//! `connect` crates.

pub mod auth;
pub mod constants;
pub mod errors;
pub mod events;
pub mod focus;
pub mod gamification;
pub mod goals;
pub mod selection;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
