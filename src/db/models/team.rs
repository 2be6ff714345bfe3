use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::employee::EmployeeBasicInfo;
use super::project::Project;

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::teams)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Team {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::teams)]
pub struct NewTeam<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::team_members)]
pub struct NewTeamMember {
    pub team_id: i32,
    pub employee_id: i32,
}

#[derive(Serialize)]
pub struct TeamDetailResponse {
    pub team: Team,
    pub members: Vec<EmployeeBasicInfo>,
    pub projects: Vec<Project>,
}

#[derive(Serialize)]
pub struct TeamListItem {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub member_count: i64,
}

#[derive(Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 100, message = "Team name must be between 1 and 100 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Comma-separated employee ids. Defaults to the creator.
    pub member_ids: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct UpdateTeamRequest {
    #[validate(length(min = 1, max = 100, message = "Team name must be between 1 and 100 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub member_ids: String,
}

#[derive(Deserialize)]
pub struct AddMemberRequest {
    pub employee_id: Option<i32>,
}
