/// Post service - handles post creation, enriched retrieval, and deletion
use crate::db::{comment_repo, like_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::{FeedPost, Post};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

/// Reject content that is empty or whitespace-only without altering what the
/// caller sent. The returned slice is the original input, padding included;
/// what gets stored is exactly what came in.
pub(crate) fn require_content<'a>(content: &'a str, what: &str) -> Result<&'a str> {
    if content.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "{what} content must not be empty"
        )));
    }
    Ok(content)
}

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new post
    ///
    /// Content must be non-empty after trimming, but is stored and echoed
    /// back exactly as the caller sent it (the echo is the whole contract).
    pub async fn create_post(&self, user_id: Uuid, content: &str) -> Result<Post> {
        let content = require_content(content, "post")?;

        let post = post_repo::create_post(&self.pool, user_id, content).await?;
        tracing::info!(post_id = %post.id, user_id = %user_id, "post created");
        Ok(post)
    }

    /// Get the full post set, each post enriched with its author, likes, and
    /// comments-with-authors.
    ///
    /// No pagination and no ordering guarantee; callers that need an order
    /// impose it themselves. The nested collections are denormalized query
    /// results, rebuilt wholesale on every call.
    pub async fn get_all_posts(&self) -> Result<Vec<FeedPost>> {
        let posts = post_repo::get_all_posts_with_authors(&self.pool).await?;
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<Uuid> = posts.iter().map(|(post, _)| post.id).collect();

        let mut comments_by_post: HashMap<Uuid, Vec<_>> = HashMap::new();
        for comment in comment_repo::get_comments_for_posts(&self.pool, &post_ids).await? {
            comments_by_post
                .entry(comment.post_id)
                .or_default()
                .push(comment);
        }

        let mut likes_by_post: HashMap<Uuid, Vec<_>> = HashMap::new();
        for like in like_repo::get_likes_for_posts(&self.pool, &post_ids).await? {
            likes_by_post.entry(like.post_id).or_default().push(like);
        }

        let feed = posts
            .into_iter()
            .map(|(post, author)| FeedPost {
                likes: likes_by_post.remove(&post.id).unwrap_or_default(),
                comments: comments_by_post.remove(&post.id).unwrap_or_default(),
                id: post.id,
                user_id: post.user_id,
                content: post.content,
                created_at: post.created_at,
                author,
            })
            .collect();

        Ok(feed)
    }

    /// Soft delete a post
    ///
    /// Owner-scoped: deleting someone else's post (or a missing one) reports
    /// false rather than distinguishing the two cases.
    pub async fn delete_post(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let deleted = post_repo::soft_delete_post(&self.pool, post_id, user_id).await?;
        if deleted {
            tracing::info!(%post_id, %user_id, "post deleted");
        }
        Ok(deleted)
    }
}
