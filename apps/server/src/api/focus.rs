use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use focusgoals_core::focus::{FocusChange, FocusStatus};
use serde::Deserialize;

/// Grid position of the goal to focus: parent row, then sub-goal within it.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FocusRequest {
    row_index: usize,
    goal_index: usize,
}

async fn get_focus(State(state): State<Arc<AppState>>) -> Json<FocusStatus> {
    let focus = state.focus_service.lock().await;
    Json(focus.status(Utc::now()))
}

async fn focus_goal(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FocusRequest>,
) -> ApiResult<Json<FocusChange>> {
    let parents = state.goal_service.get_parent_goals()?;
    let goal = parents
        .into_iter()
        .nth(body.row_index)
        .and_then(|parent| parent.goals.into_iter().nth(body.goal_index))
        .ok_or(ApiError::NotFound)?;

    let mut focus = state.focus_service.lock().await;
    let change = focus
        .focus(goal, body.row_index, body.goal_index, Utc::now())
        .await?;
    Ok(Json(change))
}

async fn unfocus_goal(State(state): State<Arc<AppState>>) -> ApiResult<Json<FocusChange>> {
    let mut focus = state.focus_service.lock().await;
    let change = focus.unfocus(Utc::now()).await?;
    Ok(Json(change))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/focus",
        get(get_focus).post(focus_goal).delete(unfocus_goal),
    )
}
