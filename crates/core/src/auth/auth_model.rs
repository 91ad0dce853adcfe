use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AuthError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub user: AuthUser,
}

/// Email/password pair submitted by the sign-in and sign-up forms.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Rejects blank credentials before any request leaves the process.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() {
        return Err(AuthError::new("Email is required"));
    }
    if password.is_empty() {
        return Err(AuthError::new("Password is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_credentials_are_rejected() {
        assert_eq!(
            validate_credentials(" ", "secret").unwrap_err().message,
            "Email is required"
        );
        assert_eq!(
            validate_credentials("a@b.c", "").unwrap_err().message,
            "Password is required"
        );
        assert!(validate_credentials("a@b.c", "secret").is_ok());
    }
}
