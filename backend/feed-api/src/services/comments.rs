/// Comment service - handles comment creation and retrieval
use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::{Comment, CommentWithAuthor};
use crate::services::posts::require_content;
use sqlx::PgPool;
use uuid::Uuid;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a comment on an existing post
    ///
    /// Content is checked for emptiness but stored exactly as sent.
    pub async fn create_comment(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        content: &str,
    ) -> Result<Comment> {
        let content = require_content(content, "comment")?;

        if !post_repo::post_exists(&self.pool, post_id).await? {
            return Err(AppError::NotFound(format!("post {post_id} does not exist")));
        }

        let comment = comment_repo::create_comment(&self.pool, post_id, user_id, content).await?;
        tracing::info!(comment_id = %comment.id, %post_id, %user_id, "comment created");
        Ok(comment)
    }

    /// Get all comments on a post, authors embedded, oldest first
    pub async fn get_post_comments(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>> {
        if !post_repo::post_exists(&self.pool, post_id).await? {
            return Err(AppError::NotFound(format!("post {post_id} does not exist")));
        }

        let comments = comment_repo::get_comments_by_post(&self.pool, post_id).await?;
        Ok(comments)
    }
}
