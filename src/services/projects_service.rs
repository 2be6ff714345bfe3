use diesel::prelude::*;

use crate::{
    access::{Resource, authorize},
    db::models::{
        api::{ResponseMeta, error_codes},
        project::{Project, ProjectDetailResponse, ProjectForm, ProjectListItem, ProjectRequest},
    },
    db::repositories::{projects::ProjectsRepo, tasks::TasksRepo, teams::TeamsRepo},
    error::{AppError, AppResult},
    filters::StatusFilter,
    pagination::{PROJECT_TASKS_PER_PAGE, PROJECTS_PER_PAGE, Page, Paginator},
    services::context::RequestContext,
    validation::{deadline::today, project::validate_project_request},
};

const NAME_TAKEN: &str = "Project with this name already exists.";

pub struct ProjectsService;

impl ProjectsService {
    /// Field rules plus the checks that need the database: the team must be
    /// one of the caller's and the name must be free.
    fn check_request(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &ProjectRequest,
        except_id: Option<i32>,
    ) -> AppResult<()> {
        validate_project_request(req, today())?;

        let team_ids = TeamsRepo::ids_for_employee(conn, ctx.employee_id)?;
        if !team_ids.contains(&req.team_id) {
            return Err(AppError::field("team_id", "Select a valid team."));
        }
        if ProjectsRepo::name_taken(conn, req.name.trim(), except_id)? {
            return Err(AppError::conflict_with_code(
                NAME_TAKEN,
                Some("name".to_string()),
                error_codes::PROJECT_NAME_EXISTS,
            ));
        }
        Ok(())
    }

    fn form(req: &ProjectRequest) -> ProjectForm<'_> {
        ProjectForm {
            name: req.name.trim(),
            description: &req.description,
            deadline: req.deadline,
            is_completed: req.is_completed,
            team_id: req.team_id,
        }
    }

    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &ProjectRequest,
    ) -> AppResult<Project> {
        Self::check_request(conn, ctx, req, None)?;
        let project = conn.transaction::<_, AppError, _>(|conn| {
            ProjectsRepo::insert(conn, &Self::form(req))
                .map_err(|e| AppError::unique_or(e, "name", NAME_TAKEN, error_codes::PROJECT_NAME_EXISTS))
        })?;
        tracing::info!(project_id = project.id, team_id = project.team_id, "Project created");
        Ok(project)
    }

    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: i32,
        req: &ProjectRequest,
    ) -> AppResult<Project> {
        authorize(conn, ctx.employee_id, Resource::Project(project_id))?;
        Self::check_request(conn, ctx, req, Some(project_id))?;
        conn.transaction::<_, AppError, _>(|conn| {
            ProjectsRepo::update(conn, project_id, &Self::form(req))
                .map_err(|e| AppError::unique_or(e, "name", NAME_TAKEN, error_codes::PROJECT_NAME_EXISTS))
        })
    }

    pub fn delete(conn: &mut PgConnection, ctx: &RequestContext, project_id: i32) -> AppResult<()> {
        authorize(conn, ctx.employee_id, Resource::Project(project_id))?;
        conn.transaction::<_, AppError, _>(|conn| {
            ProjectsRepo::delete_cascade(conn, &[project_id])?;
            Ok(())
        })?;
        tracing::info!(project_id, employee_id = ctx.employee_id, "Project deleted");
        Ok(())
    }

    pub fn detail(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        project_id: i32,
        page: Option<&str>,
    ) -> AppResult<(ProjectDetailResponse, ResponseMeta)> {
        authorize(conn, ctx.employee_id, Resource::Project(project_id))?;
        let (project, team) = ProjectsRepo::find_with_team(conn, project_id)?
            .ok_or_else(|| AppError::not_found("Project"))?;

        let paginator = Paginator::new(
            TasksRepo::count_by_project(conn, project_id)?,
            PROJECT_TASKS_PER_PAGE,
        );
        let page_number = paginator.page_number(page);
        let tasks = TasksRepo::list_by_project(
            conn,
            project_id,
            paginator.offset(page_number),
            paginator.limit(),
        )?;
        let (tasks, meta) = Page::new(tasks, &paginator, page_number).into_parts();

        Ok((
            ProjectDetailResponse {
                status: project.status_display(),
                project,
                team,
                tasks,
            },
            meta,
        ))
    }

    /// Projects of the caller's teams, ordered by deadline.
    pub fn list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        status: StatusFilter,
        page: Option<&str>,
    ) -> AppResult<Page<ProjectListItem>> {
        let team_ids = TeamsRepo::ids_for_employee(conn, ctx.employee_id)?;
        let is_completed = status.is_completed();

        let paginator = Paginator::new(
            ProjectsRepo::count_for_teams(conn, &team_ids, is_completed)?,
            PROJECTS_PER_PAGE,
        );
        let page_number = paginator.page_number(page);
        let rows = ProjectsRepo::list_for_teams(
            conn,
            &team_ids,
            is_completed,
            paginator.offset(page_number),
            paginator.limit(),
        )?;

        Ok(Page::new(rows, &paginator, page_number).map(|(project, team)| ProjectListItem {
            status: project.status_display(),
            project,
            team,
        }))
    }
}
