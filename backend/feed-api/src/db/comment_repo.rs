use crate::models::{Comment, CommentWithAuthor, UserSummary};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Create a new comment on a post
pub async fn create_comment(
    pool: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (post_id, user_id, content)
        VALUES ($1, $2, $3)
        RETURNING id, post_id, user_id, content, created_at
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

fn comment_from_row(r: &sqlx::postgres::PgRow) -> CommentWithAuthor {
    CommentWithAuthor {
        id: r.get("id"),
        post_id: r.get("post_id"),
        content: r.get("content"),
        created_at: r.get("created_at"),
        author: UserSummary {
            id: r.get("user_id"),
            name: r.get("author_name"),
            image: r.get("author_image"),
        },
    }
}

/// Get all comments for a post, each with its author, oldest first
pub async fn get_comments_by_post(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT c.id, c.post_id, c.user_id, c.content, c.created_at,
               u.name AS author_name, u.image AS author_image
        FROM comments c
        JOIN users u ON c.user_id = u.id
        WHERE c.post_id = $1
        ORDER BY c.created_at ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(comment_from_row).collect())
}

/// Get comments with authors for a batch of posts in one query
pub async fn get_comments_for_posts(
    pool: &PgPool,
    post_ids: &[Uuid],
) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT c.id, c.post_id, c.user_id, c.content, c.created_at,
               u.name AS author_name, u.image AS author_image
        FROM comments c
        JOIN users u ON c.user_id = u.id
        WHERE c.post_id = ANY($1)
        ORDER BY c.created_at ASC
        "#,
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(comment_from_row).collect())
}
