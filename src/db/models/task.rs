use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::comment::CommentInfo;
use super::employee::EmployeeBasicInfo;
use super::project::Project;
use super::team::Team;
use crate::db::enums::TaskPriority;

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::task_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskType {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::task_types)]
pub struct NewTaskType<'a> {
    pub name: &'a str,
}

#[derive(Deserialize, Validate)]
pub struct CreateTaskTypeRequest {
    #[validate(length(min = 1, max = 255, message = "Task type name must be between 1 and 255 characters"))]
    pub name: String,
}

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Task {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub deadline: chrono::NaiveDate,
    pub is_completed: bool,
    pub priority: TaskPriority,
    pub task_type_id: i32,
    pub project_id: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Task {
    pub fn status_display(&self) -> &'static str {
        if self.is_completed { "Completed" } else { "In Progress" }
    }
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::tasks)]
pub struct TaskForm<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub deadline: chrono::NaiveDate,
    pub is_completed: bool,
    pub priority: TaskPriority,
    pub task_type_id: i32,
    pub project_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::task_assignees)]
pub struct NewTaskAssignee {
    pub task_id: i32,
    pub employee_id: i32,
}

#[derive(Deserialize, Validate)]
pub struct TaskRequest {
    #[validate(length(min = 1, max = 100, message = "Task name must be between 1 and 100 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub deadline: chrono::NaiveDate,
    #[serde(default)]
    pub is_completed: bool,
    pub priority: TaskPriority,
    pub task_type_id: i32,
    pub project_id: i32,
    /// Comma-separated employee ids. Defaults to the creator on create and is
    /// required on update.
    pub assignee_ids: Option<String>,
}

/// Row shape used by the task list views.
#[derive(Serialize, Clone, Debug)]
pub struct TaskListItem {
    pub id: i32,
    pub name: String,
    pub deadline: chrono::NaiveDate,
    pub is_completed: bool,
    pub status: &'static str,
    pub priority: TaskPriority,
    pub task_type: String,
    pub team: String,
}

#[derive(Serialize)]
pub struct TaskDetailResponse {
    #[serde(flatten)]
    pub task: Task,
    pub status: &'static str,
    pub task_type: TaskType,
    pub project: Project,
    pub team: Team,
    pub assignees: Vec<EmployeeBasicInfo>,
    pub comments: Vec<CommentInfo>,
}
