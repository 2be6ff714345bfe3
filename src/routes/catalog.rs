use crate::db::models::{api::ApiResponse, employee::AuthEmployee, task::CreateTaskTypeRequest};
use crate::error::AppResult;
use crate::services::CatalogService;
use crate::validation::ValidatedJson;
use crate::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

pub async fn list_positions(
    State(state): State<Arc<AppState>>,
    _employee: AuthEmployee,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let positions = CatalogService::positions(&mut conn)?;
    Ok(Json(ApiResponse::success(positions, "Positions retrieved successfully")))
}

pub async fn list_task_types(
    State(state): State<Arc<AppState>>,
    _employee: AuthEmployee,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let task_types = CatalogService::task_types(&mut conn)?;
    Ok(Json(ApiResponse::success(task_types, "Task types retrieved successfully")))
}

pub async fn create_task_type(
    State(state): State<Arc<AppState>>,
    _employee: AuthEmployee,
    ValidatedJson(payload): ValidatedJson<CreateTaskTypeRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let task_type = CatalogService::create_task_type(&mut conn, &payload)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(task_type, "Task type created successfully")),
    ))
}
