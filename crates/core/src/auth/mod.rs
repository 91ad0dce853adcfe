//! Auth module - boundary to the external authentication backend.

mod auth_model;
mod auth_traits;

pub use auth_model::{validate_credentials, AuthSession, AuthUser, Credentials};
pub use auth_traits::AuthProviderTrait;
