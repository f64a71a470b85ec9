/// Like handlers - HTTP endpoints for liking and unliking posts
use crate::error::Result;
use crate::handlers::feed::FeedHandlerState;
use crate::middleware::SessionUser;
use crate::services::LikeStore;
use actix_web::{web, HttpResponse};
use std::sync::Arc;
use uuid::Uuid;

/// Like a post
///
/// Idempotent: a repeated like answers 200 with the existing association
/// instead of 201.
pub async fn like_post(
    store: web::Data<Arc<dyn LikeStore>>,
    state: web::Data<FeedHandlerState>,
    post_id: web::Path<Uuid>,
    session: SessionUser,
) -> Result<HttpResponse> {
    let (like, was_created) = store.like_post(*post_id, session.0).await?;

    state.refresh().await;

    if was_created {
        Ok(HttpResponse::Created().json(like))
    } else {
        Ok(HttpResponse::Ok().json(like))
    }
}

/// Remove a like from a post
pub async fn unlike_post(
    store: web::Data<Arc<dyn LikeStore>>,
    state: web::Data<FeedHandlerState>,
    post_id: web::Path<Uuid>,
    session: SessionUser,
) -> Result<HttpResponse> {
    let removed = store.unlike_post(*post_id, session.0).await?;

    if removed {
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
    use crate::models::{FeedPost, Like, Post};
    use crate::services::PostStore;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Store that tracks (post, user) like pairs like the unique constraint
    /// does: a second like for the same pair is reported as already existing.
    struct InMemoryLikes {
        likes: Mutex<HashSet<(Uuid, Uuid)>>,
    }

    impl InMemoryLikes {
        fn new() -> Self {
            Self {
                likes: Mutex::new(HashSet::new()),
            }
        }
    }

    #[async_trait]
    impl LikeStore for InMemoryLikes {
        async fn like_post(&self, post_id: Uuid, user_id: Uuid) -> AppResult<(Like, bool)> {
            let was_created = self.likes.lock().unwrap().insert((post_id, user_id));
            Ok((
                Like {
                    id: Uuid::new_v4(),
                    post_id,
                    user_id,
                    created_at: Utc::now(),
                },
                was_created,
            ))
        }

        async fn unlike_post(&self, post_id: Uuid, user_id: Uuid) -> AppResult<bool> {
            Ok(self.likes.lock().unwrap().remove(&(post_id, user_id)))
        }
    }

    struct EmptyPostStore;

    #[async_trait]
    impl PostStore for EmptyPostStore {
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

        async fn delete_post(&self, _post_id: Uuid, _user_id: Uuid) -> AppResult<bool> {
            Ok(false)
        }
    }

    #[actix_web::test]
    async fn test_repeated_like_answers_ok_not_created() {
        init_test_session_key();

        let store: Arc<dyn LikeStore> = Arc::new(InMemoryLikes::new());
        let state = web::Data::new(FeedHandlerState::new(Box::new(EmptyPostStore)));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store))
                .app_data(state)
                .route("/posts/{post_id}/like", web::post().to(like_post)),
        )
        .await;

        let post_id = Uuid::new_v4();
        let token = issue_token(Uuid::new_v4(), 60);

        let first = test::TestRequest::post()
            .uri(&format!("/posts/{post_id}/like"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        assert_eq!(
            test::call_service(&app, first).await.status(),
            StatusCode::CREATED
        );

        let second = test::TestRequest::post()
            .uri(&format!("/posts/{post_id}/like"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        assert_eq!(
            test::call_service(&app, second).await.status(),
            StatusCode::OK
        );
    }

    #[actix_web::test]
    async fn test_unlike_without_like_answers_not_found() {
        init_test_session_key();

        let store: Arc<dyn LikeStore> = Arc::new(InMemoryLikes::new());
        let state = web::Data::new(FeedHandlerState::new(Box::new(EmptyPostStore)));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store))
                .app_data(state)
                .route("/posts/{post_id}/like", web::delete().to(unlike_post)),
        )
        .await;

        let token = issue_token(Uuid::new_v4(), 60);
        let req = test::TestRequest::delete()
            .uri(&format!("/posts/{}/like", Uuid::new_v4()))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
