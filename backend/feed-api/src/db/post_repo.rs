use crate::models::{Post, UserSummary};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Create a new post
/// Returns the created post
pub async fn create_post(
    pool: &PgPool,
    user_id: Uuid,
    content: &str,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (user_id, content)
        VALUES ($1, $2)
        RETURNING id, user_id, content, created_at
        "#,
    )
    .bind(user_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID (excluding soft-deleted posts)
pub async fn find_post_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, user_id, content, created_at
        FROM posts
        WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Check that a post exists and is not soft-deleted
pub async fn post_exists(pool: &PgPool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM posts
            WHERE id = $1 AND deleted_at IS NULL
        )
        "#,
    )
    .bind(post_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Fetch every live post together with its author columns.
///
/// The full set, unpaginated. No ORDER BY: ordering is imposed by the caller,
/// not guaranteed by this query.
pub async fn get_all_posts_with_authors(
    pool: &PgPool,
) -> Result<Vec<(Post, UserSummary)>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT p.id, p.user_id, p.content, p.created_at,
               u.name AS author_name, u.image AS author_image
        FROM posts p
        JOIN users u ON p.user_id = u.id
        WHERE p.deleted_at IS NULL
        "#,
    )
    .fetch_all(pool)
    .await?;

    let posts = rows
        .iter()
        .map(|r| {
            let post = Post {
                id: r.get("id"),
                user_id: r.get("user_id"),
                content: r.get("content"),
                created_at: r.get("created_at"),
            };
            let author = UserSummary {
                id: post.user_id,
                name: r.get("author_name"),
                image: r.get("author_image"),
            };
            (post, author)
        })
        .collect();

    Ok(posts)
}

/// Soft delete a post owned by the given user
/// Returns true if a row was affected (post existed and belonged to the user)
pub async fn soft_delete_post(
    pool: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET deleted_at = NOW()
        WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
