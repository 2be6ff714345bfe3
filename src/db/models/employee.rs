use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::position::Position;
use crate::error::AppError;
use crate::validation::rules::{validate_password_strength, validate_username_format};

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Employee {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub position_id: Option<i32>,
    pub is_active: bool,
    pub date_joined: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::employees)]
pub struct NewEmployee {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub position_id: Option<i32>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::employees)]
pub struct EmployeeChanges {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub position_id: Option<i32>,
}

/// Identity attached to authenticated requests by the auth middleware.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AuthEmployee {
    pub id: i32,
    pub username: String,
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthEmployee
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthEmployee>()
            .cloned()
            .ok_or_else(|| AppError::auth("Authentication required"))
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct EmployeeBasicInfo {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<Position>,
}

impl EmployeeBasicInfo {
    pub fn from_parts(employee: Employee, position: Option<Position>) -> Self {
        Self {
            id: employee.id,
            username: employee.username,
            email: employee.email,
            first_name: employee.first_name,
            last_name: employee.last_name,
            position,
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 150, message = "Username must be between 3 and 150 characters"),
        custom(function = "validate_username_format")
    )]
    pub username: String,

    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, max = 100, message = "Position is required"))]
    pub position: String,

    #[validate(custom(function = "validate_password_strength"))]
    pub password1: String,

    pub password2: String,
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub employee: EmployeeBasicInfo,
}

#[derive(Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,

    #[validate(custom(function = "validate_password_strength"))]
    pub new_password1: String,

    pub new_password2: String,
}

#[derive(Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
}

#[derive(Deserialize, Validate)]
pub struct PasswordResetConfirmRequest {
    #[validate(length(min = 1, message = "Reset token is required"))]
    pub token: String,

    #[validate(custom(function = "validate_password_strength"))]
    pub new_password1: String,

    pub new_password2: String,
}

#[derive(Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(
        length(min = 3, max = 150, message = "Username must be between 3 and 150 characters"),
        custom(function = "validate_username_format")
    )]
    pub username: String,

    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 150))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = 150))]
    pub last_name: String,

    pub position_id: Option<i32>,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub employee: EmployeeBasicInfo,
    pub active_tasks: i64,
    pub finished_tasks: i64,
    pub active_projects: i64,
    pub finished_projects: i64,
    pub tasks: Vec<super::task::TaskListItem>,
}
