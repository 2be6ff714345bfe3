use bcrypt::{hash, verify};
use diesel::prelude::*;

use crate::{
    db::models::{
        api::{ResponseMeta, error_codes},
        employee::{
            ChangePasswordRequest, Employee, EmployeeBasicInfo, EmployeeChanges, LoginRequest,
            NewEmployee, ProfileResponse, RegisterRequest, UpdateProfileRequest,
        },
    },
    db::repositories::{
        employees::EmployeeRepo, positions::PositionsRepo, projects::ProjectsRepo,
        tasks::TasksRepo, teams::TeamsRepo,
    },
    error::{AppError, AppResult, violated_unique_constraint},
    pagination::{PROFILE_TASKS_PER_PAGE, Page, Paginator},
    services::context::RequestContext,
    validation::auth::{validate_passwords_match, validate_registration},
};

pub struct AuthService;

/// Reports a unique violation on insert against the column it hit.
fn registration_conflict(err: diesel::result::Error) -> AppError {
    let on_email = violated_unique_constraint(&err).is_some_and(|name| name.contains("email"));
    if on_email {
        AppError::unique_or(
            err,
            "email",
            "A user with that email already exists.",
            error_codes::USER_EMAIL_EXISTS,
        )
    } else {
        AppError::unique_or(
            err,
            "username",
            "A user with that username already exists.",
            error_codes::USER_USERNAME_EXISTS,
        )
    }
}

impl AuthService {
    /// Creates the employee and, if needed, its position. Returns the stored
    /// employee with position.
    pub fn register(
        conn: &mut PgConnection,
        req: &RegisterRequest,
        bcrypt_cost: u32,
    ) -> AppResult<EmployeeBasicInfo> {
        validate_registration(req)?;

        if EmployeeRepo::username_taken(conn, &req.username, None)? {
            return Err(AppError::conflict_with_code(
                "A user with that username already exists.",
                Some("username".to_string()),
                error_codes::USER_USERNAME_EXISTS,
            ));
        }
        if EmployeeRepo::email_taken(conn, &req.email, None)? {
            return Err(AppError::conflict_with_code(
                "A user with that email already exists.",
                Some("email".to_string()),
                error_codes::USER_EMAIL_EXISTS,
            ));
        }

        let password_hash = hash(&req.password1, bcrypt_cost)?;

        conn.transaction::<_, AppError, _>(|conn| {
            let position = PositionsRepo::get_or_create(conn, req.position.trim())?;
            let new_employee = NewEmployee {
                username: req.username.clone(),
                email: req.email.clone(),
                first_name: String::new(),
                last_name: String::new(),
                password_hash,
                position_id: Some(position.id),
            };
            let employee = EmployeeRepo::insert(conn, &new_employee).map_err(registration_conflict)?;
            tracing::info!(employee_id = employee.id, username = %employee.username, "Employee registered");
            Ok(EmployeeBasicInfo::from_parts(employee, Some(position)))
        })
    }

    /// Checks username and password. Inactive accounts cannot log in.
    pub fn authenticate(conn: &mut PgConnection, req: &LoginRequest) -> AppResult<EmployeeBasicInfo> {
        let employee = EmployeeRepo::find_by_username(conn, &req.username)?
            .filter(|employee| employee.is_active)
            .ok_or_else(|| AppError::auth("Invalid username or password"))?;

        if !verify(&req.password, &employee.password_hash)? {
            tracing::warn!(username = %req.username, "Failed login attempt");
            return Err(AppError::auth("Invalid username or password"));
        }

        Self::basic_info(conn, employee.id)
    }

    pub fn change_password(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &ChangePasswordRequest,
        bcrypt_cost: u32,
    ) -> AppResult<()> {
        let employee = EmployeeRepo::find_by_id(conn, ctx.employee_id)?
            .ok_or_else(|| AppError::not_found("Employee"))?;

        if !verify(&req.old_password, &employee.password_hash)? {
            return Err(AppError::field(
                "old_password",
                "Your old password was entered incorrectly. Please enter it again.",
            ));
        }
        validate_passwords_match("new_password2", &req.new_password1, &req.new_password2)?;

        let new_hash = hash(&req.new_password1, bcrypt_cost)?;
        conn.transaction::<_, AppError, _>(|conn| {
            EmployeeRepo::update_password(conn, employee.id, &new_hash)?;
            Ok(())
        })?;
        tracing::info!(employee_id = employee.id, "Password changed");
        Ok(())
    }

    /// The employee a reset link should be issued for.
    pub fn employee_for_reset(conn: &mut PgConnection, email: &str) -> AppResult<Employee> {
        EmployeeRepo::find_by_email(conn, email)?
            .filter(|employee| employee.is_active)
            .ok_or_else(|| AppError::field("email", "This email is not registered in the system."))
    }

    pub fn reset_password(
        conn: &mut PgConnection,
        employee_id: i32,
        new_password: &str,
        bcrypt_cost: u32,
    ) -> AppResult<()> {
        let new_hash = hash(new_password, bcrypt_cost)?;
        conn.transaction::<_, AppError, _>(|conn| {
            let updated = EmployeeRepo::update_password(conn, employee_id, &new_hash)?;
            if updated == 0 {
                return Err(AppError::not_found("Employee"));
            }
            Ok(())
        })?;
        tracing::info!(employee_id, "Password reset completed");
        Ok(())
    }

    pub fn update_profile(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &UpdateProfileRequest,
    ) -> AppResult<EmployeeBasicInfo> {
        if EmployeeRepo::username_taken(conn, &req.username, Some(ctx.employee_id))? {
            return Err(AppError::conflict_with_code(
                "A user with that username already exists.",
                Some("username".to_string()),
                error_codes::USER_USERNAME_EXISTS,
            ));
        }
        if EmployeeRepo::email_taken(conn, &req.email, Some(ctx.employee_id))? {
            return Err(AppError::conflict_with_code(
                "A user with that email already exists.",
                Some("email".to_string()),
                error_codes::USER_EMAIL_EXISTS,
            ));
        }
        if let Some(position_id) = req.position_id {
            if PositionsRepo::find_by_id(conn, position_id)?.is_none() {
                return Err(AppError::field("position_id", "Select a valid position."));
            }
        }

        let changes = EmployeeChanges {
            username: req.username.clone(),
            email: req.email.clone(),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            position_id: req.position_id,
        };
        conn.transaction::<_, AppError, _>(|conn| {
            EmployeeRepo::update_profile(conn, ctx.employee_id, &changes)?;
            Ok(())
        })?;

        Self::basic_info(conn, ctx.employee_id)
    }

    /// Profile summary plus one page of the caller's active assigned tasks.
    pub fn profile(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        page: Option<&str>,
    ) -> AppResult<(ProfileResponse, ResponseMeta)> {
        let employee = Self::basic_info(conn, ctx.employee_id)?;
        let (active_tasks, finished_tasks) = TasksRepo::assigned_counts(conn, ctx.employee_id)?;
        let team_ids = TeamsRepo::ids_for_employee(conn, ctx.employee_id)?;
        let (active_projects, finished_projects) = ProjectsRepo::completion_counts(conn, &team_ids)?;

        let paginator = Paginator::new(active_tasks, PROFILE_TASKS_PER_PAGE);
        let page_number = paginator.page_number(page);
        let tasks = TasksRepo::list_active_assigned(
            conn,
            ctx.employee_id,
            paginator.offset(page_number),
            paginator.limit(),
        )?;
        let (tasks, meta) = Page::new(tasks, &paginator, page_number).into_parts();

        Ok((
            ProfileResponse {
                employee,
                active_tasks,
                finished_tasks,
                active_projects,
                finished_projects,
                tasks,
            },
            meta,
        ))
    }

    fn basic_info(conn: &mut PgConnection, employee_id: i32) -> AppResult<EmployeeBasicInfo> {
        EmployeeRepo::with_position(conn, employee_id)?.ok_or_else(|| AppError::not_found("Employee"))
    }
}
