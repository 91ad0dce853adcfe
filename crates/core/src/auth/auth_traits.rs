use async_trait::async_trait;

use super::auth_model::{AuthSession, AuthUser};
use crate::errors::AuthError;

/// Wrapper around the hosted authentication backend.
///
/// Implementations keep no session of their own: sign-in hands the session to
/// the caller, and every later call carries the caller's access token. Every
/// call either succeeds or yields the backend's [`AuthError`]; nothing is
/// retried and messages are passed through unchanged.
#[async_trait]
pub trait AuthProviderTrait: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    /// Revokes the session behind `access_token`.
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;

    /// The user owning `access_token`, or `None` for an anonymous caller.
    async fn get_current_user(
        &self,
        access_token: Option<&str>,
    ) -> Result<Option<AuthUser>, AuthError>;

    /// The caller's session as seen by the backend, or `None` for an
    /// anonymous caller.
    async fn get_session(
        &self,
        access_token: Option<&str>,
    ) -> Result<Option<AuthSession>, AuthError>;
}
