use crate::db::models::{
    api::ApiResponse,
    comment::CreateCommentRequest,
    employee::AuthEmployee,
    task::TaskRequest,
};
use crate::error::AppResult;
use crate::filters::TaskFilterQuery;
use crate::services::{CommentsService, TasksService, context::RequestContext};
use crate::validation::ValidatedJson;
use crate::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use std::sync::Arc;

pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    employee: AuthEmployee,
    Query(query): Query<TaskFilterQuery>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let page = TasksService::list(&mut conn, &RequestContext::from(&employee), &query)?;
    let (tasks, meta) = page.into_parts();
    Ok(Json(ApiResponse::success_with_meta(tasks, "Tasks retrieved successfully", meta)))
}

pub async fn create_task(
    State(state): State<Arc<AppState>>,
    employee: AuthEmployee,
    ValidatedJson(payload): ValidatedJson<TaskRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let task = TasksService::create(&mut conn, &RequestContext::from(&employee), &payload)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(task, "Task created successfully")),
    ))
}

pub async fn task_detail(
    State(state): State<Arc<AppState>>,
    employee: AuthEmployee,
    Path(task_id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let detail = TasksService::detail(&mut conn, &RequestContext::from(&employee), task_id)?;
    Ok(Json(ApiResponse::success(detail, "Task retrieved successfully")))
}

/// `POST` on the task page adds a comment to it.
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    employee: AuthEmployee,
    Path(task_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<CreateCommentRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let comment = CommentsService::create(&mut conn, &RequestContext::from(&employee), task_id, &payload)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(comment, "Comment added successfully")),
    ))
}

pub async fn update_task(
    State(state): State<Arc<AppState>>,
    employee: AuthEmployee,
    Path(task_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<TaskRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let task = TasksService::update(&mut conn, &RequestContext::from(&employee), task_id, &payload)?;
    Ok(Json(ApiResponse::success(task, "Task updated successfully")))
}

pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    employee: AuthEmployee,
    Path(task_id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    TasksService::delete(&mut conn, &RequestContext::from(&employee), task_id)?;
    Ok(Json(ApiResponse::<()>::ok("Task deleted successfully")))
}

pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    employee: AuthEmployee,
    Path(comment_id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let task_id = CommentsService::delete(&mut conn, &RequestContext::from(&employee), comment_id)?;
    Ok(Json(ApiResponse::success(
        json!({ "task_id": task_id }),
        "Comment deleted successfully",
    )))
}
