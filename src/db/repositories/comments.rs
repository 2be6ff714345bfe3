use diesel::prelude::*;

use crate::db::models::comment::{Comment, CommentInfo, NewComment};
use crate::db::models::employee::{Employee, EmployeeBasicInfo};
use crate::db::models::position::Position;
use crate::schema::{comments, employees, positions};

pub struct CommentRepo;

impl CommentRepo {
    pub fn insert(conn: &mut PgConnection, new_comment: &NewComment) -> Result<Comment, diesel::result::Error> {
        diesel::insert_into(comments::table)
            .values(new_comment)
            .returning(Comment::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        comment_id: i32,
    ) -> Result<Option<Comment>, diesel::result::Error> {
        comments::table
            .find(comment_id)
            .select(Comment::as_select())
            .first(conn)
            .optional()
    }

    /// Comments on `task_id` with their authors, newest first.
    pub fn list_for_task(
        conn: &mut PgConnection,
        task_id: i32,
    ) -> Result<Vec<CommentInfo>, diesel::result::Error> {
        let rows = comments::table
            .inner_join(employees::table.left_join(positions::table))
            .filter(comments::task_id.eq(task_id))
            .order((comments::created_at.desc(), comments::id.desc()))
            .select((
                Comment::as_select(),
                Employee::as_select(),
                positions::all_columns.nullable(),
            ))
            .load::<(Comment, Employee, Option<Position>)>(conn)?;
        Ok(rows
            .into_iter()
            .map(|(comment, author, position)| CommentInfo {
                id: comment.id,
                content: comment.content,
                created_at: comment.created_at,
                author: EmployeeBasicInfo::from_parts(author, position),
            })
            .collect())
    }

    pub fn delete(conn: &mut PgConnection, comment_id: i32) -> Result<usize, diesel::result::Error> {
        diesel::delete(comments::table.find(comment_id)).execute(conn)
    }
}
