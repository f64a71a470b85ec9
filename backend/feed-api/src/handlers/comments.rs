/// Comment handlers - HTTP endpoints for comment operations
use crate::error::Result;
use crate::handlers::feed::FeedHandlerState;
use crate::middleware::SessionUser;
use crate::services::CommentService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Request body for creating a comment
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 500, message = "comment content must be 1-500 characters"))]
    pub content: String,
}

/// Create a new comment on a post
pub async fn create_comment(
    pool: web::Data<PgPool>,
    state: web::Data<FeedHandlerState>,
    post_id: web::Path<Uuid>,
    session: SessionUser,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = CommentService::new((**pool).clone());
    let comment = service
        .create_comment(*post_id, session.0, &req.content)
        .await?;

    state.refresh().await;
    Ok(HttpResponse::Created().json(comment))
}

/// Get comments for a post, authors embedded
pub async fn get_post_comments(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let comments = service.get_post_comments(*post_id).await?;

    Ok(HttpResponse::Ok().json(comments))
}
