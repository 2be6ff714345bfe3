use diesel::prelude::*;

use crate::{
    access::{Resource, authorize},
    db::models::comment::{Comment, CreateCommentRequest, NewComment},
    db::repositories::comments::CommentRepo,
    error::{AppError, AppResult},
    services::context::RequestContext,
    validation::comment::validate_create_comment,
};

pub struct CommentsService;

impl CommentsService {
    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        task_id: i32,
        req: &CreateCommentRequest,
    ) -> AppResult<Comment> {
        authorize(conn, ctx.employee_id, Resource::Task(task_id))?;
        validate_create_comment(&req.content)?;

        conn.transaction::<_, AppError, _>(|conn| {
            Ok(CommentRepo::insert(
                conn,
                &NewComment {
                    employee_id: ctx.employee_id,
                    task_id,
                    content: req.content.trim(),
                },
            )?)
        })
    }

    /// Any member of the owning team may delete a comment. Returns the id of
    /// the task it belonged to.
    pub fn delete(conn: &mut PgConnection, ctx: &RequestContext, comment_id: i32) -> AppResult<i32> {
        authorize(conn, ctx.employee_id, Resource::Comment(comment_id))?;
        let comment = CommentRepo::find_by_id(conn, comment_id)?
            .ok_or_else(|| AppError::not_found("Comment"))?;

        conn.transaction::<_, AppError, _>(|conn| {
            CommentRepo::delete(conn, comment_id)?;
            Ok(())
        })?;
        tracing::info!(comment_id, task_id = comment.task_id, employee_id = ctx.employee_id, "Comment deleted");
        Ok(comment.task_id)
    }
}
