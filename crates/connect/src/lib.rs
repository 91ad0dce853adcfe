//! Client for the hosted authentication backend.
//!
//! The backend speaks the Supabase/GoTrue REST protocol. This crate only wraps
//! it: the client keeps no session, callers pass their own access token, and
//! every failure is surfaced as an [`focusgoals_core::errors::AuthError`]
//! carrying the backend's message.

pub mod client;

pub use client::{AuthClient, DEFAULT_TIMEOUT_SECS};
