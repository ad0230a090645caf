//! `PostgreSQL` repository implementation for issue and comment content.

use super::{
    models::{CommentRow, IssueRow, NewCommentRow, NewIssueRow},
    schema::{comments, issues},
};
use crate::ingestion::{
    domain::{
        AuthorId, CommentNodeId, CommentRecord, IssueNodeId, IssueRecord, Markdown, Visibility,
    },
    ports::{ContentRepository, ContentRepositoryError, ContentRepositoryResult},
};
use async_trait::async_trait;
use diesel::dsl::now;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by content adapters.
pub type ContentPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed content repository.
#[derive(Debug, Clone)]
pub struct PostgresContentRepository {
    pool: ContentPgPool,
}

impl PostgresContentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ContentPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ContentRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ContentRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ContentRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ContentRepositoryError::persistence)?
    }
}

#[async_trait]
impl ContentRepository for PostgresContentRepository {
    async fn find_issue(&self, id: &IssueNodeId) -> ContentRepositoryResult<Option<IssueRecord>> {
        let lookup_id = id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = issues::table
                .find(lookup_id)
                .select(IssueRow::as_select())
                .first::<IssueRow>(connection)
                .optional()
                .map_err(ContentRepositoryError::persistence)?;
            row.map(row_to_issue).transpose()
        })
        .await
    }

    async fn create_issue(&self, issue: &IssueRecord) -> ContentRepositoryResult<()> {
        let new_row = to_new_issue_row(issue);
        self.run_blocking(move |connection| {
            // Parallel comment deliveries may race to create the same parent.
            // The first insert wins and later ones are no-ops.
            diesel::insert_into(issues::table)
                .values(&new_row)
                .on_conflict(issues::id)
                .do_nothing()
                .execute(connection)
                .map_err(ContentRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn create_comment(&self, comment: &CommentRecord) -> ContentRepositoryResult<()> {
        let comment_id = comment.id().clone();
        let new_row = to_new_comment_row(comment);
        self.run_blocking(move |connection| {
            diesel::insert_into(comments::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ContentRepositoryError::DuplicateComment(comment_id.clone())
                    }
                    _ => ContentRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_comment(
        &self,
        markdown: &Markdown,
        id: &CommentNodeId,
        visibility: Visibility,
    ) -> ContentRepositoryResult<()> {
        let comment_id = id.clone();
        let lookup_id = id.as_str().to_owned();
        let text = markdown.as_str().to_owned();
        let stored_private = self
            .run_blocking(move |connection| {
                diesel::update(comments::table.find(lookup_id))
                    .set((comments::markdown.eq(text), comments::modified_at.eq(now)))
                    .returning(comments::is_private)
                    .get_result::<bool>(connection)
                    .optional()
                    .map_err(ContentRepositoryError::persistence)?
                    .ok_or(ContentRepositoryError::CommentNotFound(comment_id))
            })
            .await?;

        let stored = Visibility::from_private_flag(stored_private);
        if stored != visibility {
            tracing::warn!(
                comment_id = %id,
                ?stored,
                reported = ?visibility,
                "edit reports a different repository visibility; keeping the stored value"
            );
        }
        Ok(())
    }

    async fn find_comment(
        &self,
        id: &CommentNodeId,
    ) -> ContentRepositoryResult<Option<CommentRecord>> {
        let lookup_id = id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = comments::table
                .find(lookup_id)
                .select(CommentRow::as_select())
                .first::<CommentRow>(connection)
                .optional()
                .map_err(ContentRepositoryError::persistence)?;
            row.map(row_to_comment).transpose()
        })
        .await
    }
}

fn to_new_issue_row(issue: &IssueRecord) -> NewIssueRow {
    NewIssueRow {
        id: issue.id().as_str().to_owned(),
        author_id: issue.author_id().value(),
        is_private: issue.visibility().is_private(),
        markdown: issue.markdown().as_str().to_owned(),
        payload: issue.payload().clone(),
    }
}

fn to_new_comment_row(comment: &CommentRecord) -> NewCommentRow {
    NewCommentRow {
        id: comment.id().as_str().to_owned(),
        issue_id: comment.issue_id().as_str().to_owned(),
        author_id: comment.author_id().value(),
        is_private: comment.visibility().is_private(),
        markdown: comment.markdown().as_str().to_owned(),
        payload: comment.payload().clone(),
    }
}

fn row_to_issue(row: IssueRow) -> ContentRepositoryResult<IssueRecord> {
    let IssueRow {
        id,
        author_id,
        is_private,
        markdown,
        payload,
    } = row;

    Ok(IssueRecord::new(
        IssueNodeId::new(id).map_err(ContentRepositoryError::persistence)?,
        AuthorId::new(author_id),
        Visibility::from_private_flag(is_private),
        Markdown::new(markdown).map_err(ContentRepositoryError::persistence)?,
        payload,
    ))
}

fn row_to_comment(row: CommentRow) -> ContentRepositoryResult<CommentRecord> {
    let CommentRow {
        id,
        issue_id,
        author_id,
        is_private,
        markdown,
        payload,
    } = row;

    Ok(CommentRecord::new(
        CommentNodeId::new(id).map_err(ContentRepositoryError::persistence)?,
        IssueNodeId::new(issue_id).map_err(ContentRepositoryError::persistence)?,
        AuthorId::new(author_id),
        Visibility::from_private_flag(is_private),
        Markdown::new(markdown).map_err(ContentRepositoryError::persistence)?,
        payload,
    ))
}
