use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use focusgoals_core::goals::{
    GoalSummary, ParentGoal, ParentGoalFormValues, ParentGoalUpdate, SubGoal, SubGoalData,
    SubGoalFormValues,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReorderRequest {
    ordered_ids: Vec<String>,
}

#[derive(Deserialize)]
struct ProgressRequest {
    progress: f64,
}

#[derive(Deserialize)]
struct BatchDeleteRequest {
    ids: Vec<String>,
}

#[derive(Serialize)]
struct DeletedResponse {
    deleted: usize,
}

async fn get_parent_goals(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<ParentGoal>>> {
    let goals = state.goal_service.get_parent_goals()?;
    Ok(Json(goals))
}

async fn get_goal_summaries(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<GoalSummary>>> {
    let summaries = state.goal_service.get_goal_summaries()?;
    Ok(Json(summaries))
}

async fn get_parent_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ParentGoal>> {
    let goal = state.goal_service.get_parent_goal(&id)?;
    Ok(Json(goal))
}

async fn create_parent_goal(
    State(state): State<Arc<AppState>>,
    Json(values): Json<ParentGoalFormValues>,
) -> ApiResult<(StatusCode, Json<ParentGoal>)> {
    let goal = state.goal_service.create_parent_goal(values).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

async fn update_parent_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(values): Json<ParentGoalFormValues>,
) -> ApiResult<Json<ParentGoal>> {
    let goal = state
        .goal_service
        .update_parent_goal(ParentGoalUpdate {
            id,
            title: values.title,
            description: values.description,
            position: values.position,
        })
        .await?;
    Ok(Json(goal))
}

async fn delete_parent_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.goal_service.delete_parent_goal(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reorder_parent_goals(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ReorderRequest>,
) -> ApiResult<StatusCode> {
    let _ = state
        .goal_service
        .reorder_parent_goals(body.ordered_ids)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_sub_goal(
    Path(parent_goal_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(values): Json<SubGoalFormValues>,
) -> ApiResult<(StatusCode, Json<SubGoal>)> {
    let sub_goal = state
        .goal_service
        .create_sub_goal(parent_goal_id, values)
        .await?;
    Ok((StatusCode::CREATED, Json(sub_goal)))
}

async fn update_sub_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(data): Json<SubGoalData>,
) -> ApiResult<Json<SubGoal>> {
    let sub_goal = state
        .goal_service
        .update_sub_goal(SubGoalData {
            id: Some(id),
            ..data
        })
        .await?;
    Ok(Json(sub_goal))
}

async fn update_sub_goal_progress(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<ProgressRequest>,
) -> ApiResult<Json<SubGoal>> {
    let sub_goal = state
        .goal_service
        .update_sub_goal_progress(id, body.progress)
        .await?;
    Ok(Json(sub_goal))
}

async fn delete_sub_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.goal_service.delete_sub_goal(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_sub_goals(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BatchDeleteRequest>,
) -> ApiResult<Json<DeletedResponse>> {
    let deleted = state.goal_service.delete_sub_goals(body.ids).await?;
    Ok(Json(DeletedResponse { deleted }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(get_parent_goals).post(create_parent_goal))
        .route("/goals/summaries", get(get_goal_summaries))
        .route("/goals/reorder", put(reorder_parent_goals))
        .route(
            "/goals/{id}",
            get(get_parent_goal)
                .put(update_parent_goal)
                .delete(delete_parent_goal),
        )
        .route("/goals/{id}/sub-goals", post(create_sub_goal))
        .route("/sub-goals/batch-delete", post(delete_sub_goals))
        .route(
            "/sub-goals/{id}",
            put(update_sub_goal).delete(delete_sub_goal),
        )
        .route("/sub-goals/{id}/progress", put(update_sub_goal_progress))
}
