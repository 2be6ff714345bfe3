use crate::db::models::{api::ApiResponse, employee::AuthEmployee, project::ProjectRequest};
use crate::error::AppResult;
use crate::filters::{StatusFilter, StatusQuery};
use crate::pagination::PageQuery;
use crate::services::{ProjectsService, context::RequestContext};
use crate::validation::ValidatedJson;
use crate::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    employee: AuthEmployee,
    Query(query): Query<StatusQuery>,
) -> AppResult<impl IntoResponse> {
    let status = StatusFilter::parse(query.status.as_deref())?;
    let mut conn = state.db.get()?;
    let page = ProjectsService::list(
        &mut conn,
        &RequestContext::from(&employee),
        status,
        query.page.as_deref(),
    )?;
    let (projects, meta) = page.into_parts();
    Ok(Json(ApiResponse::success_with_meta(projects, "Projects retrieved successfully", meta)))
}

pub async fn create_project(
    State(state): State<Arc<AppState>>,
    employee: AuthEmployee,
    ValidatedJson(payload): ValidatedJson<ProjectRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let project = ProjectsService::create(&mut conn, &RequestContext::from(&employee), &payload)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(project, "Project created successfully")),
    ))
}

pub async fn project_detail(
    State(state): State<Arc<AppState>>,
    employee: AuthEmployee,
    Path(project_id): Path<i32>,
    Query(query): Query<PageQuery>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let (detail, meta) = ProjectsService::detail(
        &mut conn,
        &RequestContext::from(&employee),
        project_id,
        query.page.as_deref(),
    )?;
    Ok(Json(ApiResponse::success_with_meta(detail, "Project retrieved successfully", meta)))
}

pub async fn update_project(
    State(state): State<Arc<AppState>>,
    employee: AuthEmployee,
    Path(project_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<ProjectRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let project = ProjectsService::update(&mut conn, &RequestContext::from(&employee), project_id, &payload)?;
    Ok(Json(ApiResponse::success(project, "Project updated successfully")))
}

pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    employee: AuthEmployee,
    Path(project_id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    ProjectsService::delete(&mut conn, &RequestContext::from(&employee), project_id)?;
    Ok(Json(ApiResponse::<()>::ok("Project deleted successfully")))
}
