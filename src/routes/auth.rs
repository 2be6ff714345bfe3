use crate::cache;
use crate::db::models::{
    api::ApiResponse,
    employee::{
        AuthEmployee, ChangePasswordRequest, EmployeeBasicInfo, LoginRequest, LoginResponse, PasswordResetConfirmRequest,
        PasswordResetRequest, RegisterRequest, UpdateProfileRequest,
    },
};
use crate::error::{AppError, AppResult};
use crate::pagination::PageQuery;
use crate::services::{AuthService, context::RequestContext};
use crate::validation::{ValidatedJson, auth::validate_passwords_match};
use crate::AppState;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

fn login_response(state: &AppState, employee: EmployeeBasicInfo) -> AppResult<LoginResponse> {
    let access_token = state.tokens.generate_access_token(employee.id, &employee.username)?;
    Ok(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expires_in(),
        employee,
    })
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let employee = AuthService::register(&mut conn, &payload, state.config.bcrypt_cost)?;
    let response = login_response(&state, employee)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(response, "Registration successful")),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let employee = AuthService::authenticate(&mut conn, &payload)?;
    let response = login_response(&state, employee)?;
    Ok(Json(ApiResponse::success(response, "Login successful")))
}

pub async fn password_change(
    State(state): State<Arc<AppState>>,
    employee: AuthEmployee,
    ValidatedJson(payload): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    AuthService::change_password(
        &mut conn,
        &RequestContext::from(&employee),
        &payload,
        state.config.bcrypt_cost,
    )?;
    Ok(Json(ApiResponse::<()>::ok("Password changed successfully")))
}

/// Issues a reset token. Mail delivery is outside this service, so the
/// link is written to the log.
pub async fn password_reset(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<PasswordResetRequest>,
) -> AppResult<impl IntoResponse> {
    let employee = {
        let mut conn = state.db.get()?;
        AuthService::employee_for_reset(&mut conn, &payload.email)?
    };

    let token = cache::issue_reset_token(
        &state.redis,
        employee.id,
        state.config.password_reset_expires_in,
    )
    .await?;
    tracing::info!(
        employee_id = employee.id,
        link = %format!("{}/password-reset/confirm/?token={}", state.config.public_url, token),
        "Password reset link issued"
    );

    Ok(Json(ApiResponse::<()>::ok(
        "We've emailed you instructions for setting your password.",
    )))
}

pub async fn password_reset_confirm(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<PasswordResetConfirmRequest>,
) -> AppResult<impl IntoResponse> {
    validate_passwords_match("new_password2", &payload.new_password1, &payload.new_password2)?;

    let token = payload.token.trim();
    let claim = cache::consume_reset_token(&state.redis, token)
        .await?
        .ok_or_else(|| {
            AppError::field(
                "token",
                "The password reset link was invalid, possibly because it has already been used.",
            )
        })?;

    let reset = state.db.get().map_err(AppError::from).and_then(|mut conn| {
        AuthService::reset_password(
            &mut conn,
            claim.employee_id,
            &payload.new_password1,
            state.config.bcrypt_cost,
        )
    });
    if let Err(err) = reset {
        if let Err(restore_err) = cache::restore_reset_token(&state.redis, token, &claim).await {
            tracing::error!(employee_id = claim.employee_id, "Failed to restore reset token: {}", restore_err);
        }
        return Err(err);
    }
    Ok(Json(ApiResponse::<()>::ok("Your password has been set.")))
}

pub async fn profile(
    State(state): State<Arc<AppState>>,
    employee: AuthEmployee,
    Query(query): Query<PageQuery>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let (profile, meta) =
        AuthService::profile(&mut conn, &RequestContext::from(&employee), query.page.as_deref())?;
    Ok(Json(ApiResponse::success_with_meta(
        profile,
        "Profile retrieved successfully",
        meta,
    )))
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    employee: AuthEmployee,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.db.get()?;
    let updated = AuthService::update_profile(&mut conn, &RequestContext::from(&employee), &payload)?;
    Ok(Json(ApiResponse::success(updated, "Profile updated successfully")))
}
