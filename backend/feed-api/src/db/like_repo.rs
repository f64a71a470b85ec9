use crate::models::Like;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new like (idempotent - liking twice is not an error)
/// Returns (Like, was_created) where was_created is true for a new like
pub async fn create_like(
    pool: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<(Like, bool), sqlx::Error> {
    let already_liked = check_user_liked(pool, post_id, user_id).await?;

    let like = sqlx::query_as::<_, Like>(
        r#"
        INSERT INTO likes (post_id, user_id)
        VALUES ($1, $2)
        ON CONFLICT (post_id, user_id) DO UPDATE
        SET user_id = EXCLUDED.user_id
        RETURNING id, post_id, user_id, created_at
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok((like, !already_liked))
}

/// Delete a like
/// Returns true if a like existed and was removed
pub async fn delete_like(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM likes
        WHERE post_id = $1 AND user_id = $2
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Check if a user has liked a post
pub async fn check_user_liked(
    pool: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM likes
            WHERE post_id = $1 AND user_id = $2
        )
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Get likes for a batch of posts in one query
pub async fn get_likes_for_posts(
    pool: &PgPool,
    post_ids: &[Uuid],
) -> Result<Vec<Like>, sqlx::Error> {
    let likes = sqlx::query_as::<_, Like>(
        r#"
        SELECT id, post_id, user_id, created_at
        FROM likes
        WHERE post_id = ANY($1)
        ORDER BY created_at ASC
        "#,
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    Ok(likes)
}
