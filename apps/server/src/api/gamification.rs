use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use focusgoals_core::gamification::{Badge, FocusSession, UserProgress};
use serde::Deserialize;

#[derive(Deserialize)]
struct SessionsQuery {
    limit: Option<i64>,
}

async fn get_user_progress(State(state): State<Arc<AppState>>) -> ApiResult<Json<UserProgress>> {
    let progress = state.gamification_service.get_user_progress()?;
    Ok(Json(progress))
}

async fn get_badges(State(state): State<Arc<AppState>>) -> Json<Vec<Badge>> {
    Json(state.gamification_service.get_badges())
}

async fn list_sessions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SessionsQuery>,
) -> ApiResult<Json<Vec<FocusSession>>> {
    let sessions = state.gamification_service.list_sessions(query.limit)?;
    Ok(Json(sessions))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/progress", get(get_user_progress))
        .route("/badges", get(get_badges))
        .route("/sessions", get(list_sessions))
}
