//! `PostgreSQL` comment storage.

use super::{PostgresTaskRepository, models::CommentRow, schema::task_comments};
use crate::actor::UserId;
use crate::task::{
    domain::{CommentId, PersistedCommentData, TaskComment, TaskId},
    ports::{TaskCommentRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

#[async_trait]
impl TaskCommentRepository for PostgresTaskRepository {
    async fn add_comment(&self, comment: &TaskComment) -> TaskRepositoryResult<()> {
        let task_id = comment.task_id();
        let row = CommentRow {
            id: comment.id().into_inner(),
            task_id: task_id.into_inner(),
            author_id: comment.author().into_inner(),
            content: comment.content().to_owned(),
            created_at: comment.created_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(task_comments::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::NotFound(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn comments(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskComment>> {
        self.run_blocking(move |connection| {
            let rows = task_comments::table
                .filter(task_comments::task_id.eq(task_id.into_inner()))
                .order((task_comments::created_at.asc(), task_comments::id.asc()))
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)?;
            Ok(rows.into_iter().map(row_to_comment).collect())
        })
        .await
    }
}

fn row_to_comment(row: CommentRow) -> TaskComment {
    TaskComment::from_persisted(PersistedCommentData {
        id: CommentId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        author: UserId::from_uuid(row.author_id),
        content: row.content,
        created_at: row.created_at,
    })
}
