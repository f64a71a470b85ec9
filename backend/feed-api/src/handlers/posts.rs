/// Post handlers - HTTP endpoints for post operations
use crate::error::Result;
use crate::handlers::feed::FeedHandlerState;
use crate::middleware::{MaybeSessionUser, SessionUser};
use crate::services::{NewPostOutcome, PostService};
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub const MAX_POST_CONTENT_CHARS: u64 = 500;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(max = MAX_POST_CONTENT_CHARS, message = "post content is too long"))]
    pub content: String,
}

fn redirect_to_signin() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/signin"))
        .finish()
}

/// Create a new post
///
/// Runs the new-post flow through the feed view: anonymous callers are sent
/// to sign-in, empty content is rejected with a message, and a created post
/// triggers a feed re-fetch before the echo is returned.
pub async fn create_post(
    state: web::Data<FeedHandlerState>,
    session: MaybeSessionUser,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let outcome = {
        let view = state.view.read().await;
        view.submit_post(session.0, &req.content).await?
    };

    match outcome {
        NewPostOutcome::RedirectToSignIn => Ok(redirect_to_signin()),
        NewPostOutcome::Rejected(message) => {
            Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": message,
                "status": 400,
            })))
        }
        NewPostOutcome::Created(post) => {
            state.refresh().await;
            Ok(HttpResponse::Created().json(post))
        }
    }
}

/// Get the raw post set, enriched but with no ordering guarantee
pub async fn get_all_posts(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let posts = service.get_all_posts().await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Delete a post (owner only)
///
/// A missing post and someone else's post both answer 404; nothing reveals
/// which it was.
pub async fn delete_post(
    state: web::Data<FeedHandlerState>,
    post_id: web::Path<Uuid>,
    session: SessionUser,
) -> Result<HttpResponse> {
    let deleted = {
        let view = state.view.read().await;
        view.delete_post(*post_id, session.0).await?
    };

    if deleted {
        state.refresh().await;
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::test_support::{init_test_session_key, issue_token};
    use crate::error::Result as AppResult;
    use crate::models::{FeedPost, Post};
    use crate::services::PostStore;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use chrono::Utc;

    /// A store holding exactly one post with a known owner.
    struct SinglePostStore {
        post_id: Uuid,
        owner: Uuid,
    }

    #[async_trait]
    impl PostStore for SinglePostStore {
        async fn get_all_posts(&self) -> AppResult<Vec<FeedPost>> {
            Ok(Vec::new())
        }

        async fn create_post(&self, user_id: Uuid, content: &str) -> AppResult<Post> {
            Ok(Post {
                id: Uuid::new_v4(),
                user_id,
                content: content.to_string(),
                created_at: Utc::now(),
            })
        }

        async fn delete_post(&self, post_id: Uuid, user_id: Uuid) -> AppResult<bool> {
            Ok(post_id == self.post_id && user_id == self.owner)
        }
    }

    async fn delete_as(caller: Uuid, post_id: Uuid, owner: Uuid) -> StatusCode {
        init_test_session_key();

        let state = web::Data::new(FeedHandlerState::new(Box::new(SinglePostStore {
            post_id,
            owner,
        })));
        let app = test::init_service(
            App::new()
                .app_data(state)
                .route("/posts/{post_id}", web::delete().to(delete_post)),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri(&format!("/posts/{post_id}"))
            .insert_header(("Authorization", format!("Bearer {}", issue_token(caller, 60))))
            .to_request();
        test::call_service(&app, req).await.status()
    }

    #[actix_web::test]
    async fn test_owner_delete_answers_no_content() {
        let owner = Uuid::new_v4();
        let post_id = Uuid::new_v4();

        assert_eq!(
            delete_as(owner, post_id, owner).await,
            StatusCode::NO_CONTENT
        );
    }

    #[actix_web::test]
    async fn test_non_owner_delete_answers_not_found() {
        let owner = Uuid::new_v4();
        let post_id = Uuid::new_v4();

        assert_eq!(
            delete_as(Uuid::new_v4(), post_id, owner).await,
            StatusCode::NOT_FOUND
        );
    }

    #[::core::prelude::v1::test]
    fn test_redirect_targets_signin() {
        let resp = redirect_to_signin();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/signin"
        );
    }

    #[::core::prelude::v1::test]
    fn test_create_request_length_limit() {
        let ok = CreatePostRequest {
            content: "a".repeat(MAX_POST_CONTENT_CHARS as usize),
        };
        assert!(ok.validate().is_ok());

        let too_long = CreatePostRequest {
            content: "a".repeat(MAX_POST_CONTENT_CHARS as usize + 1),
        };
        assert!(too_long.validate().is_err());
    }
}
