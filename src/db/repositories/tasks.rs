use diesel::prelude::*;

use super::projects::split_counts;
use crate::db::models::employee::{Employee, EmployeeBasicInfo};
use crate::db::models::position::Position;
use crate::db::models::task::{NewTaskAssignee, Task, TaskForm, TaskListItem};
use crate::filters::TaskFilter;
use crate::schema::{comments, employees, positions, projects, task_assignees, task_types, tasks, teams};

/// Task plus its type name and owning team name.
type TaskRow = (Task, String, String);

fn to_list_item((task, task_type, team): TaskRow) -> TaskListItem {
    TaskListItem {
        id: task.id,
        status: task.status_display(),
        name: task.name,
        deadline: task.deadline,
        is_completed: task.is_completed,
        priority: task.priority,
        task_type,
        team,
    }
}

pub struct TasksRepo;

impl TasksRepo {
    pub fn find_by_id(conn: &mut PgConnection, task_id: i32) -> Result<Option<Task>, diesel::result::Error> {
        tasks::table
            .find(task_id)
            .select(Task::as_select())
            .first(conn)
            .optional()
    }

    pub fn name_taken(
        conn: &mut PgConnection,
        task_name: &str,
        except_id: Option<i32>,
    ) -> Result<bool, diesel::result::Error> {
        let mut query = tasks::table.filter(tasks::name.eq(task_name)).into_boxed();
        if let Some(id) = except_id {
            query = query.filter(tasks::id.ne(id));
        }
        diesel::select(diesel::dsl::exists(query)).get_result(conn)
    }

    pub fn insert(conn: &mut PgConnection, form: &TaskForm) -> Result<Task, diesel::result::Error> {
        diesel::insert_into(tasks::table)
            .values(form)
            .returning(Task::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut PgConnection,
        task_id: i32,
        form: &TaskForm,
    ) -> Result<Task, diesel::result::Error> {
        diesel::update(tasks::table.find(task_id))
            .set(form)
            .returning(Task::as_returning())
            .get_result(conn)
    }

    /// Replaces the whole assignee set of `task_id`.
    pub fn set_assignees(
        conn: &mut PgConnection,
        task_id: i32,
        employee_ids: &[i32],
    ) -> Result<(), diesel::result::Error> {
        diesel::delete(task_assignees::table.filter(task_assignees::task_id.eq(task_id)))
            .execute(conn)?;
        let rows: Vec<NewTaskAssignee> = employee_ids
            .iter()
            .map(|&employee_id| NewTaskAssignee {
                task_id,
                employee_id,
            })
            .collect();
        if !rows.is_empty() {
            diesel::insert_into(task_assignees::table)
                .values(&rows)
                .execute(conn)?;
        }
        Ok(())
    }

    pub fn assignees(
        conn: &mut PgConnection,
        task_id: i32,
    ) -> Result<Vec<EmployeeBasicInfo>, diesel::result::Error> {
        let rows = task_assignees::table
            .inner_join(employees::table.left_join(positions::table))
            .filter(task_assignees::task_id.eq(task_id))
            .order(employees::username.asc())
            .select((Employee::as_select(), positions::all_columns.nullable()))
            .load::<(Employee, Option<Position>)>(conn)?;
        Ok(rows
            .into_iter()
            .map(|(employee, position)| EmployeeBasicInfo::from_parts(employee, position))
            .collect())
    }

    pub fn count_for_teams(
        conn: &mut PgConnection,
        team_ids: &[i32],
        filter: &TaskFilter,
    ) -> Result<i64, diesel::result::Error> {
        let mut query = tasks::table
            .inner_join(projects::table)
            .filter(projects::team_id.eq_any(team_ids))
            .select(diesel::dsl::count_star())
            .into_boxed();
        if let Some(done) = filter.status.is_completed() {
            query = query.filter(tasks::is_completed.eq(done));
        }
        if let Some(priority) = filter.priority.priority() {
            query = query.filter(tasks::priority.eq(priority));
        }
        if let Some(team_id) = filter.team.team_id() {
            query = query.filter(projects::team_id.eq(team_id));
        }
        query.first(conn)
    }

    pub fn list_for_teams(
        conn: &mut PgConnection,
        team_ids: &[i32],
        filter: &TaskFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<TaskListItem>, diesel::result::Error> {
        let mut query = tasks::table
            .inner_join(projects::table.inner_join(teams::table))
            .inner_join(task_types::table)
            .filter(projects::team_id.eq_any(team_ids))
            .select((Task::as_select(), task_types::name, teams::name))
            .into_boxed();
        if let Some(done) = filter.status.is_completed() {
            query = query.filter(tasks::is_completed.eq(done));
        }
        if let Some(priority) = filter.priority.priority() {
            query = query.filter(tasks::priority.eq(priority));
        }
        if let Some(team_id) = filter.team.team_id() {
            query = query.filter(projects::team_id.eq(team_id));
        }
        let rows = query
            .order((tasks::deadline.asc(), tasks::id.asc()))
            .offset(offset)
            .limit(limit)
            .load::<TaskRow>(conn)?;
        Ok(rows.into_iter().map(to_list_item).collect())
    }

    pub fn count_by_project(conn: &mut PgConnection, project_id: i32) -> Result<i64, diesel::result::Error> {
        tasks::table
            .filter(tasks::project_id.eq(project_id))
            .count()
            .get_result(conn)
    }

    pub fn list_by_project(
        conn: &mut PgConnection,
        project_id: i32,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<TaskListItem>, diesel::result::Error> {
        let rows = tasks::table
            .inner_join(projects::table.inner_join(teams::table))
            .inner_join(task_types::table)
            .filter(tasks::project_id.eq(project_id))
            .select((Task::as_select(), task_types::name, teams::name))
            .order((tasks::deadline.asc(), tasks::id.asc()))
            .offset(offset)
            .limit(limit)
            .load::<TaskRow>(conn)?;
        Ok(rows.into_iter().map(to_list_item).collect())
    }

    /// `(active, finished)` counts of the tasks assigned to `employee_id`.
    pub fn assigned_counts(
        conn: &mut PgConnection,
        employee_id: i32,
    ) -> Result<(i64, i64), diesel::result::Error> {
        let rows = tasks::table
            .inner_join(task_assignees::table)
            .filter(task_assignees::employee_id.eq(employee_id))
            .group_by(tasks::is_completed)
            .select((tasks::is_completed, diesel::dsl::count_star()))
            .load::<(bool, i64)>(conn)?;
        Ok(split_counts(&rows))
    }

    pub fn list_active_assigned(
        conn: &mut PgConnection,
        employee_id: i32,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<TaskListItem>, diesel::result::Error> {
        let rows = tasks::table
            .inner_join(task_assignees::table)
            .inner_join(projects::table.inner_join(teams::table))
            .inner_join(task_types::table)
            .filter(task_assignees::employee_id.eq(employee_id))
            .filter(tasks::is_completed.eq(false))
            .select((Task::as_select(), task_types::name, teams::name))
            .order((tasks::deadline.asc(), tasks::id.asc()))
            .offset(offset)
            .limit(limit)
            .load::<TaskRow>(conn)?;
        Ok(rows.into_iter().map(to_list_item).collect())
    }

    pub fn ids_for_projects(
        conn: &mut PgConnection,
        project_ids: &[i32],
    ) -> Result<Vec<i32>, diesel::result::Error> {
        tasks::table
            .filter(tasks::project_id.eq_any(project_ids))
            .select(tasks::id)
            .load(conn)
    }

    /// Deletes the tasks with their comments and assignments. Run inside a
    /// transaction.
    pub fn delete_cascade(conn: &mut PgConnection, task_ids: &[i32]) -> Result<usize, diesel::result::Error> {
        if task_ids.is_empty() {
            return Ok(0);
        }
        diesel::delete(comments::table.filter(comments::task_id.eq_any(task_ids))).execute(conn)?;
        diesel::delete(task_assignees::table.filter(task_assignees::task_id.eq_any(task_ids)))
            .execute(conn)?;
        diesel::delete(tasks::table.filter(tasks::id.eq_any(task_ids))).execute(conn)
    }
}
