/// Like service - like/unlike actions over existing posts
use crate::db::{like_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::Like;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Seam between the HTTP layer and the like actions.
#[async_trait]
pub trait LikeStore: Send + Sync {
    /// Idempotent like: `was_created` is false when the association already
    /// existed, and the existing association is returned either way.
    async fn like_post(&self, post_id: Uuid, user_id: Uuid) -> Result<(Like, bool)>;

    /// Remove a like. True only when a like existed.
    async fn unlike_post(&self, post_id: Uuid, user_id: Uuid) -> Result<bool>;
}

pub struct LikeService {
    pool: PgPool,
}

impl LikeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Like a post. Idempotent: liking an already-liked post succeeds with
    /// `was_created = false`.
    pub async fn like_post(&self, post_id: Uuid, user_id: Uuid) -> Result<(Like, bool)> {
        if !post_repo::post_exists(&self.pool, post_id).await? {
            return Err(AppError::NotFound(format!("post {post_id} does not exist")));
        }

        let (like, was_created) = like_repo::create_like(&self.pool, post_id, user_id).await?;
        if was_created {
            tracing::info!(%post_id, %user_id, "post liked");
        }
        Ok((like, was_created))
    }

    /// Remove a like. Returns true if a like existed.
    pub async fn unlike_post(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let removed = like_repo::delete_like(&self.pool, post_id, user_id).await?;
        if removed {
            tracing::info!(%post_id, %user_id, "like removed");
        }
        Ok(removed)
    }
}

#[async_trait]
impl LikeStore for LikeService {
    async fn like_post(&self, post_id: Uuid, user_id: Uuid) -> Result<(Like, bool)> {
        LikeService::like_post(self, post_id, user_id).await
    }

    async fn unlike_post(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        LikeService::unlike_post(self, post_id, user_id).await
    }
}
