use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use focusgoals_core::auth::{AuthProviderTrait, AuthSession, AuthUser, Credentials};

fn provider(state: &AppState) -> ApiResult<Arc<dyn AuthProviderTrait>> {
    state
        .auth_provider
        .clone()
        .ok_or_else(|| ApiError::NotImplemented("Authentication is not configured".to_string()))
}

/// The caller's access token from `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<Json<AuthSession>> {
    let session = provider(&state)?
        .sign_up(&credentials.email, &credentials.password)
        .await?;
    Ok(Json(session))
}

async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<Json<AuthSession>> {
    let session = provider(&state)?
        .sign_in(&credentials.email, &credentials.password)
        .await?;
    Ok(Json(session))
}

async fn sign_out(State(state): State<Arc<AppState>>, headers: HeaderMap) -> ApiResult<StatusCode> {
    let provider = provider(&state)?;
    // Nothing to revoke for an anonymous caller.
    if let Some(token) = bearer_token(&headers) {
        provider.sign_out(token).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn get_current_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Option<AuthUser>>> {
    let user = provider(&state)?
        .get_current_user(bearer_token(&headers))
        .await?;
    Ok(Json(user))
}

async fn get_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Option<AuthSession>>> {
    let session = provider(&state)?.get_session(bearer_token(&headers)).await?;
    Ok(Json(session))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/sign-up", post(sign_up))
        .route("/auth/sign-in", post(sign_in))
        .route("/auth/sign-out", post(sign_out))
        .route("/auth/user", get(get_current_user))
        .route("/auth/session", get(get_session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_requires_bearer_scheme() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer alice-jwt"));
        assert_eq!(bearer_token(&headers), Some("alice-jwt"));
    }
}
