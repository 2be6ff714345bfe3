use crate::db::models::{
    api::ApiResponse,
    employee::AuthEmployee,
    team::{AddMemberRequest, CreateTeamRequest, UpdateTeamRequest},
};
use crate::error::AppResult;
use crate::pagination::PageQuery;
use crate::services::{TeamMembersService, TeamsService, context::RequestContext};
use crate::validation::ValidatedJson;
use crate::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn list_teams(
    State(state): State<Arc<AppState>>,
    employee: AuthEmployee,
    Query(query): Query<PageQuery>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let page = TeamsService::list(&mut conn, &RequestContext::from(&employee), query.page.as_deref())?;
    let (teams, meta) = page.into_parts();
    Ok(Json(ApiResponse::success_with_meta(teams, "Teams retrieved successfully", meta)))
}

pub async fn create_team(
    State(state): State<Arc<AppState>>,
    employee: AuthEmployee,
    ValidatedJson(payload): ValidatedJson<CreateTeamRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let team = TeamsService::create(&mut conn, &RequestContext::from(&employee), &payload)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(team, "Team created successfully")),
    ))
}

pub async fn team_detail(
    State(state): State<Arc<AppState>>,
    employee: AuthEmployee,
    Path(team_id): Path<i32>,
    Query(query): Query<PageQuery>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let (detail, meta) = TeamsService::detail(
        &mut conn,
        &RequestContext::from(&employee),
        team_id,
        query.page.as_deref(),
    )?;
    Ok(Json(ApiResponse::success_with_meta(detail, "Team retrieved successfully", meta)))
}

pub async fn add_member(
    State(state): State<Arc<AppState>>,
    employee: AuthEmployee,
    Path(team_id): Path<i32>,
    Json(payload): Json<AddMemberRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let members = TeamMembersService::add(
        &mut conn,
        &RequestContext::from(&employee),
        team_id,
        payload.employee_id,
    )?;
    Ok(Json(ApiResponse::success(members, "Member added successfully")))
}

pub async fn remove_member(
    State(state): State<Arc<AppState>>,
    employee: AuthEmployee,
    Path((team_id, member_id)): Path<(i32, i32)>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    TeamMembersService::remove(&mut conn, &RequestContext::from(&employee), team_id, member_id)?;
    Ok(Json(ApiResponse::<()>::ok("Member removed successfully")))
}

pub async fn update_team(
    State(state): State<Arc<AppState>>,
    employee: AuthEmployee,
    Path(team_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateTeamRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let team = TeamsService::update(&mut conn, &RequestContext::from(&employee), team_id, &payload)?;
    Ok(Json(ApiResponse::success(team, "Team updated successfully")))
}

pub async fn delete_team(
    State(state): State<Arc<AppState>>,
    employee: AuthEmployee,
    Path(team_id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    TeamsService::delete(&mut conn, &RequestContext::from(&employee), team_id)?;
    Ok(Json(ApiResponse::<()>::ok("Team deleted successfully")))
}
