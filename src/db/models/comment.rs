use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::employee::EmployeeBasicInfo;

#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Comment {
    pub id: i32,
    pub employee_id: i32,
    pub task_id: i32,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::comments)]
pub struct NewComment<'a> {
    pub employee_id: i32,
    pub task_id: i32,
    pub content: &'a str,
}

#[derive(Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 10000, message = "Comment content must be between 1 and 10000 characters"))]
    pub content: String,
}

#[derive(Serialize)]
pub struct CommentInfo {
    pub id: i32,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub author: EmployeeBasicInfo,
}
