use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::task::TaskListItem;
use super::team::Team;

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub deadline: chrono::NaiveDate,
    pub is_completed: bool,
    pub team_id: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Project {
    pub fn status_display(&self) -> &'static str {
        if self.is_completed { "Completed" } else { "In Progress" }
    }
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::projects)]
pub struct ProjectForm<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub deadline: chrono::NaiveDate,
    pub is_completed: bool,
    pub team_id: i32,
}

#[derive(Deserialize, Validate)]
pub struct ProjectRequest {
    #[validate(length(min = 1, max = 100, message = "Project name must be between 1 and 100 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub deadline: chrono::NaiveDate,
    #[serde(default)]
    pub is_completed: bool,
    pub team_id: i32,
}

#[derive(Serialize)]
pub struct ProjectListItem {
    #[serde(flatten)]
    pub project: Project,
    pub status: &'static str,
    pub team: Team,
}

#[derive(Serialize)]
pub struct ProjectDetailResponse {
    #[serde(flatten)]
    pub project: Project,
    pub status: &'static str,
    pub team: Team,
    pub tasks: Vec<TaskListItem>,
}
