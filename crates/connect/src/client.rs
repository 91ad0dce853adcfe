//! HTTP client for the hosted authentication backend.

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

use focusgoals_core::auth::{validate_credentials, AuthProviderTrait, AuthSession, AuthUser};
use focusgoals_core::errors::AuthError;

/// Default timeout for auth requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_KEY_HEADER: HeaderName = HeaderName::from_static("apikey");

// ─────────────────────────────────────────────────────────────────────────────
// API Response Types (internal, for parsing backend responses)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, serde::Deserialize)]
struct ApiUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Token responses carry a session; sign-up with email confirmation enabled
/// returns only the bare user.
#[derive(Debug, serde::Deserialize)]
struct ApiSessionResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    user: Option<ApiUser>,
}

impl From<ApiUser> for AuthUser {
    fn from(user: ApiUser) -> Self {
        AuthUser {
            id: user.id,
            email: user.email,
        }
    }
}

/// Builds a session from a token response, or explains why none was issued.
fn session_from_response(
    response: ApiSessionResponse,
    now: DateTime<Utc>,
) -> Result<AuthSession, AuthError> {
    let access_token = response
        .access_token
        .ok_or_else(|| AuthError::new("Check your email to confirm your account"))?;
    let user = response
        .user
        .ok_or_else(|| AuthError::new("Auth response did not include a user"))?;

    let expires_at = match (response.expires_at, response.expires_in) {
        (Some(at), _) => Utc.timestamp_opt(at, 0).single(),
        (None, Some(secs)) => Some(now + ChronoDuration::seconds(secs)),
        (None, None) => None,
    };

    Ok(AuthSession {
        access_token,
        refresh_token: response.refresh_token,
        expires_at,
        user: user.into(),
    })
}

/// Picks the human-readable message out of an error body. The backend uses
/// different fields depending on the endpoint and version.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["msg", "message", "error_description", "error"] {
            if let Some(msg) = value.get(field).and_then(|v| v.as_str()) {
                if !msg.trim().is_empty() {
                    return msg.to_string();
                }
            }
        }
    }
    if body.trim().is_empty() {
        return format!("HTTP {}", status);
    }
    format!(
        "HTTP {}: {}",
        status,
        body.chars().take(200).collect::<String>()
    )
}

fn request_failed(e: reqwest::Error) -> AuthError {
    AuthError::new(format!("Auth request failed: {}", e))
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth Client
// ─────────────────────────────────────────────────────────────────────────────

/// Client for a Supabase/GoTrue compatible auth backend.
///
/// Stateless: one client serves every caller, and sessions live with the
/// callers that received them.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
    api_key: HeaderValue,
}

impl AuthClient {
    /// Create a new auth client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The backend's base URL (e.g., "https://project.supabase.co")
    /// * `api_key` - The project's anonymous API key
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, AuthError> {
        let api_key = HeaderValue::from_str(api_key)
            .map_err(|e| AuthError::new(format!("Invalid API key format: {}", e)))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| AuthError::new(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Headers for a request; the bearer is the user's token when signed in,
    /// the API key otherwise.
    fn headers(&self, access_token: Option<&str>) -> Result<HeaderMap, AuthError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(API_KEY_HEADER, self.api_key.clone());

        let bearer = match access_token {
            Some(token) => HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| AuthError::new(format!("Invalid access token format: {}", e)))?,
            None => {
                let key = self.api_key.to_str().unwrap_or_default();
                HeaderValue::from_str(&format!("Bearer {}", key))
                    .map_err(|e| AuthError::new(format!("Invalid API key format: {}", e)))?
            }
        };
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }

    async fn parse_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AuthError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::new(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(AuthError::new(error_message(status, &body)));
        }

        serde_json::from_str(&body)
            .map_err(|e| AuthError::new(format!("Failed to parse response: {}", e)))
    }

    /// POSTs credentials to a token-issuing endpoint.
    async fn request_session(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        validate_credentials(email, password)?;

        let url = format!("{}{}", self.base_url, path);
        debug!("[AuthApi] POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers(None)?)
            .json(&serde_json::json!({ "email": email.trim(), "password": password }))
            .send()
            .await
            .map_err(request_failed)?;

        let api_response: ApiSessionResponse = self.parse_response(response).await?;
        session_from_response(api_response, Utc::now())
    }
}

#[async_trait]
impl AuthProviderTrait for AuthClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        self.request_session("/auth/v1/signup", email, password)
            .await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        self.request_session("/auth/v1/token?grant_type=password", email, password)
            .await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let url = format!("{}/auth/v1/logout", self.base_url);
        debug!("[AuthApi] POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers(Some(access_token))?)
            .send()
            .await
            .map_err(request_failed)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        warn!("[AuthApi] Sign-out rejected with {}", status);
        Err(AuthError::new(error_message(status, &body)))
    }

    async fn get_current_user(
        &self,
        access_token: Option<&str>,
    ) -> Result<Option<AuthUser>, AuthError> {
        let Some(access_token) = access_token else {
            return Ok(None);
        };

        let url = format!("{}/auth/v1/user", self.base_url);
        debug!("[AuthApi] GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers(Some(access_token))?)
            .send()
            .await
            .map_err(request_failed)?;

        let user: ApiUser = self.parse_response(response).await?;
        Ok(Some(user.into()))
    }

    async fn get_session(
        &self,
        access_token: Option<&str>,
    ) -> Result<Option<AuthSession>, AuthError> {
        let Some(user) = self.get_current_user(access_token).await? else {
            return Ok(None);
        };
        Ok(access_token.map(|token| AuthSession {
            access_token: token.to_string(),
            refresh_token: None,
            expires_at: None,
            user,
        }))
    }
}
