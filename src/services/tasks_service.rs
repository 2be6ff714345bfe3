use diesel::prelude::*;

use crate::{
    access::{Resource, authorize},
    db::models::{
        api::error_codes,
        task::{Task, TaskDetailResponse, TaskForm, TaskListItem, TaskRequest},
    },
    db::repositories::{
        comments::CommentRepo, employees::EmployeeDirectory, projects::ProjectsRepo,
        task_types::TaskTypesRepo, tasks::TasksRepo, teams::TeamsRepo,
    },
    error::{AppError, AppResult},
    filters::{TaskFilter, TaskFilterQuery},
    pagination::{Page, Paginator, TASKS_PER_PAGE},
    resolver::resolve_ids,
    services::context::RequestContext,
    validation::{deadline::today, task::validate_task_request},
};

const ASSIGNEE_IDS_FIELD: &str = "assignee_ids";
const NAME_TAKEN: &str = "Task with this name already exists.";

pub struct TasksService;

impl TasksService {
    fn check_request(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &TaskRequest,
        except_id: Option<i32>,
    ) -> AppResult<()> {
        validate_task_request(req, today())?;

        if TaskTypesRepo::find_by_id(conn, req.task_type_id)?.is_none() {
            return Err(AppError::field("task_type_id", "Select a valid task type."));
        }
        let team_ids = TeamsRepo::ids_for_employee(conn, ctx.employee_id)?;
        if !ProjectsRepo::belongs_to_teams(conn, req.project_id, &team_ids)? {
            return Err(AppError::field("project_id", "Select a valid project."));
        }
        if TasksRepo::name_taken(conn, req.name.trim(), except_id)? {
            return Err(AppError::conflict_with_code(
                NAME_TAKEN,
                Some("name".to_string()),
                error_codes::TASK_NAME_EXISTS,
            ));
        }
        Ok(())
    }

    fn form(req: &TaskRequest) -> TaskForm<'_> {
        TaskForm {
            name: req.name.trim(),
            description: &req.description,
            deadline: req.deadline,
            is_completed: req.is_completed,
            priority: req.priority,
            task_type_id: req.task_type_id,
            project_id: req.project_id,
        }
    }

    fn resolve_assignees(conn: &mut PgConnection, raw: &str) -> AppResult<Vec<i32>> {
        Ok(resolve_ids(&mut EmployeeDirectory(conn), ASSIGNEE_IDS_FIELD, raw)?
            .into_iter()
            .map(|employee| employee.id)
            .collect())
    }

    /// Creates the task; assignees default to the creator.
    pub fn create(conn: &mut PgConnection, ctx: &RequestContext, req: &TaskRequest) -> AppResult<Task> {
        Self::check_request(conn, ctx, req, None)?;
        let assignee_ids = match req.assignee_ids.as_deref() {
            Some(raw) => Self::resolve_assignees(conn, raw)?,
            None => vec![ctx.employee_id],
        };

        let task = conn.transaction::<_, AppError, _>(|conn| {
            let task = TasksRepo::insert(conn, &Self::form(req))
                .map_err(|e| AppError::unique_or(e, "name", NAME_TAKEN, error_codes::TASK_NAME_EXISTS))?;
            TasksRepo::set_assignees(conn, task.id, &assignee_ids)?;
            Ok(task)
        })?;
        tracing::info!(task_id = task.id, project_id = task.project_id, "Task created");
        Ok(task)
    }

    /// Saves the task fields and replaces the assignee set wholesale. The
    /// assignee list is required here; an omitted one fails as empty.
    pub fn update(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        task_id: i32,
        req: &TaskRequest,
    ) -> AppResult<Task> {
        authorize(conn, ctx.employee_id, Resource::Task(task_id))?;
        Self::check_request(conn, ctx, req, Some(task_id))?;
        let assignee_ids =
            Self::resolve_assignees(conn, req.assignee_ids.as_deref().unwrap_or_default())?;

        conn.transaction::<_, AppError, _>(|conn| {
            let task = TasksRepo::update(conn, task_id, &Self::form(req))
                .map_err(|e| AppError::unique_or(e, "name", NAME_TAKEN, error_codes::TASK_NAME_EXISTS))?;
            TasksRepo::set_assignees(conn, task_id, &assignee_ids)?;
            Ok(task)
        })
    }

    pub fn delete(conn: &mut PgConnection, ctx: &RequestContext, task_id: i32) -> AppResult<()> {
        authorize(conn, ctx.employee_id, Resource::Task(task_id))?;
        conn.transaction::<_, AppError, _>(|conn| {
            TasksRepo::delete_cascade(conn, &[task_id])?;
            Ok(())
        })?;
        tracing::info!(task_id, employee_id = ctx.employee_id, "Task deleted");
        Ok(())
    }

    pub fn detail(conn: &mut PgConnection, ctx: &RequestContext, task_id: i32) -> AppResult<TaskDetailResponse> {
        authorize(conn, ctx.employee_id, Resource::Task(task_id))?;
        let task = TasksRepo::find_by_id(conn, task_id)?.ok_or_else(|| AppError::not_found("Task"))?;
        let task_type = TaskTypesRepo::find_by_id(conn, task.task_type_id)?
            .ok_or_else(|| AppError::not_found("Task type"))?;
        let (project, team) = ProjectsRepo::find_with_team(conn, task.project_id)?
            .ok_or_else(|| AppError::not_found("Project"))?;
        let assignees = TasksRepo::assignees(conn, task_id)?;
        let comments = CommentRepo::list_for_task(conn, task_id)?;

        Ok(TaskDetailResponse {
            status: task.status_display(),
            task,
            task_type,
            project,
            team,
            assignees,
            comments,
        })
    }

    /// Tasks of projects owned by the caller's teams, filtered and ordered
    /// by deadline.
    pub fn list(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        query: &TaskFilterQuery,
    ) -> AppResult<Page<TaskListItem>> {
        let team_ids = TeamsRepo::ids_for_employee(conn, ctx.employee_id)?;
        let filter = TaskFilter::from_query(query, &team_ids)?;

        let paginator = Paginator::new(
            TasksRepo::count_for_teams(conn, &team_ids, &filter)?,
            TASKS_PER_PAGE,
        );
        let page_number = paginator.page_number(query.page.as_deref());
        let tasks = TasksRepo::list_for_teams(
            conn,
            &team_ids,
            &filter,
            paginator.offset(page_number),
            paginator.limit(),
        )?;
        Ok(Page::new(tasks, &paginator, page_number))
    }
}
