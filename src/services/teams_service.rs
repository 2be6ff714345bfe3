use diesel::prelude::*;

use crate::{
    access::{Resource, authorize},
    db::models::{
        api::{ResponseMeta, error_codes},
        team::{CreateTeamRequest, NewTeam, Team, TeamDetailResponse, TeamListItem, UpdateTeamRequest},
    },
    db::repositories::{employees::EmployeeDirectory, projects::ProjectsRepo, teams::TeamsRepo},
    error::{AppError, AppResult},
    pagination::{Page, Paginator, TEAM_PROJECTS_PER_PAGE, TEAMS_PER_PAGE},
    resolver::resolve_ids,
    services::context::RequestContext,
    validation::team::validate_team_name,
};

const MEMBER_IDS_FIELD: &str = "member_ids";

fn name_conflict() -> AppError {
    AppError::conflict_with_code(
        "Team with this name already exists.",
        Some("name".to_string()),
        error_codes::TEAM_NAME_EXISTS,
    )
}

pub struct TeamsService;

impl TeamsService {
    /// Creates a team whose members are the resolved `member_ids`, or just
    /// the creator when the field is omitted.
    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateTeamRequest,
    ) -> AppResult<Team> {
        validate_team_name(&req.name)?;
        if TeamsRepo::name_taken(conn, req.name.trim(), None)? {
            return Err(name_conflict());
        }

        let member_ids: Vec<i32> = match req.member_ids.as_deref() {
            Some(raw) => resolve_ids(&mut EmployeeDirectory(conn), MEMBER_IDS_FIELD, raw)?
                .into_iter()
                .map(|employee| employee.id)
                .collect(),
            None => vec![ctx.employee_id],
        };

        conn.transaction::<_, AppError, _>(|conn| {
            let team = TeamsRepo::insert(
                conn,
                &NewTeam {
                    name: req.name.trim(),
                    description: &req.description,
                },
            )
            .map_err(|e| {
                AppError::unique_or(e, "name", "Team with this name already exists.", error_codes::TEAM_NAME_EXISTS)
            })?;
            TeamsRepo::set_members(conn, team.id, &member_ids)?;
            tracing::info!(team_id = team.id, members = member_ids.len(), "Team created");
            Ok(team)
        })
    }

    /// Renames the team and replaces its member set wholesale.
    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        team_id: i32,
        req: &UpdateTeamRequest,
    ) -> AppResult<Team> {
        authorize(conn, ctx.employee_id, Resource::Team(team_id))?;
        validate_team_name(&req.name)?;
        if TeamsRepo::name_taken(conn, req.name.trim(), Some(team_id))? {
            return Err(name_conflict());
        }

        let member_ids: Vec<i32> =
            resolve_ids(&mut EmployeeDirectory(conn), MEMBER_IDS_FIELD, &req.member_ids)?
                .into_iter()
                .map(|employee| employee.id)
                .collect();

        conn.transaction::<_, AppError, _>(|conn| {
            let team = TeamsRepo::update(conn, team_id, req.name.trim(), &req.description)
                .map_err(|e| {
                    AppError::unique_or(e, "name", "Team with this name already exists.", error_codes::TEAM_NAME_EXISTS)
                })?;
            TeamsRepo::set_members(conn, team_id, &member_ids)?;
            Ok(team)
        })
    }

    pub fn delete(conn: &mut PgConnection, ctx: &RequestContext, team_id: i32) -> AppResult<()> {
        authorize(conn, ctx.employee_id, Resource::Team(team_id))?;
        conn.transaction::<_, AppError, _>(|conn| {
            TeamsRepo::delete_cascade(conn, team_id)?;
            Ok(())
        })?;
        tracing::info!(team_id, employee_id = ctx.employee_id, "Team deleted");
        Ok(())
    }

    pub fn detail(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        team_id: i32,
        page: Option<&str>,
    ) -> AppResult<(TeamDetailResponse, ResponseMeta)> {
        authorize(conn, ctx.employee_id, Resource::Team(team_id))?;
        let team = TeamsRepo::find_by_id(conn, team_id)?.ok_or_else(|| AppError::not_found("Team"))?;
        let members = TeamsRepo::members(conn, team_id)?;

        let paginator = Paginator::new(ProjectsRepo::count_by_team(conn, team_id)?, TEAM_PROJECTS_PER_PAGE);
        let page_number = paginator.page_number(page);
        let projects = ProjectsRepo::list_by_team(
            conn,
            team_id,
            paginator.offset(page_number),
            paginator.limit(),
        )?;
        let (projects, meta) = Page::new(projects, &paginator, page_number).into_parts();

        Ok((
            TeamDetailResponse {
                team,
                members,
                projects,
            },
            meta,
        ))
    }

    /// The caller's own teams, ordered by name.
    pub fn list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        page: Option<&str>,
    ) -> AppResult<Page<TeamListItem>> {
        let paginator = Paginator::new(
            TeamsRepo::count_for_employee(conn, ctx.employee_id)?,
            TEAMS_PER_PAGE,
        );
        let page_number = paginator.page_number(page);
        let teams = TeamsRepo::list_for_employee(
            conn,
            ctx.employee_id,
            paginator.offset(page_number),
            paginator.limit(),
        )?;
        let ids: Vec<i32> = teams.iter().map(|team| team.id).collect();
        let counts = TeamsRepo::member_counts(conn, &ids)?;

        Ok(Page::new(teams, &paginator, page_number).map(|team| TeamListItem {
            member_count: counts.get(&team.id).copied().unwrap_or(0),
            id: team.id,
            name: team.name,
            description: team.description,
        }))
    }
}
