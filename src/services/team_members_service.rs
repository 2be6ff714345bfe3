use diesel::prelude::*;

use crate::{
    access::{MembershipLookup, Resource, authorize, ensure_not_self_removal},
    db::models::employee::EmployeeBasicInfo,
    db::repositories::{employees::EmployeeRepo, teams::TeamsRepo},
    error::{AppError, AppResult},
    services::context::RequestContext,
    validation::team::validate_new_member,
};

pub struct TeamMembersService;

impl TeamMembersService {
    /// Adds one employee to the team and returns the new member list.
    pub fn add(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        team_id: i32,
        employee_id: Option<i32>,
    ) -> AppResult<Vec<EmployeeBasicInfo>> {
        authorize(conn, ctx.employee_id, Resource::Team(team_id))?;

        let employee_id = validate_new_member(
            conn,
            ctx.employee_id,
            employee_id,
            |conn, id| conn.is_member(team_id, id),
            |conn, id| Ok(EmployeeRepo::exists(conn, id)?),
        )?;

        conn.transaction::<_, AppError, _>(|conn| {
            TeamsRepo::add_member(conn, team_id, employee_id)?;
            Ok(())
        })?;
        tracing::info!(team_id, employee_id, added_by = ctx.employee_id, "Team member added");

        Ok(TeamsRepo::members(conn, team_id)?)
    }

    /// Removes another member from the team. The caller cannot remove
    /// themselves this way.
    pub fn remove(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        team_id: i32,
        member_id: i32,
    ) -> AppResult<()> {
        authorize(conn, ctx.employee_id, Resource::Team(team_id))?;

        if !EmployeeRepo::exists(conn, member_id)? {
            return Err(AppError::not_found("Employee"));
        }
        ensure_not_self_removal(ctx.employee_id, member_id)?;

        let removed = conn.transaction::<_, AppError, _>(|conn| {
            Ok(TeamsRepo::remove_member(conn, team_id, member_id)?)
        })?;
        if removed == 0 {
            return Err(AppError::not_found("Team member"));
        }
        tracing::info!(team_id, member_id, removed_by = ctx.employee_id, "Team member removed");
        Ok(())
    }
}
