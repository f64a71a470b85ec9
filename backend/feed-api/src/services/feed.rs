/// Feed view state
///
/// `FeedView` is the orchestration core between the post store and the
/// rendered list: it holds the ordered posts and a loading flag, re-fetches
/// the whole set on every load, and runs the new-post flow. The sort is a
/// pure function over the raw fetch result; `load_posts` is the thin
/// effectful wrapper around it.
use crate::error::Result;
use crate::models::{FeedPost, Post};
use crate::services::PostService;
use async_trait::async_trait;
use uuid::Uuid;

/// Seam between the feed view and the post repository actions.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Full post set, enriched, ordering unspecified.
    async fn get_all_posts(&self) -> Result<Vec<FeedPost>>;

    /// Insert one post and echo the created record, content byte-for-byte
    /// as submitted.
    async fn create_post(&self, user_id: Uuid, content: &str) -> Result<Post>;

    /// Owner-scoped delete. False when the post is missing or belongs to
    /// someone else; the two cases are not distinguished.
    async fn delete_post(&self, post_id: Uuid, user_id: Uuid) -> Result<bool>;
}

#[async_trait]
impl PostStore for PostService {
    async fn get_all_posts(&self) -> Result<Vec<FeedPost>> {
        PostService::get_all_posts(self).await
    }

    async fn create_post(&self, user_id: Uuid, content: &str) -> Result<Post> {
        PostService::create_post(self, user_id, content).await
    }

    async fn delete_post(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        PostService::delete_post(self, post_id, user_id).await
    }
}

// The HTTP layer holds the store behind a trait object so handlers can be
// exercised against in-memory stores.
#[async_trait]
impl PostStore for Box<dyn PostStore> {
    async fn get_all_posts(&self) -> Result<Vec<FeedPost>> {
        (**self).get_all_posts().await
    }

    async fn create_post(&self, user_id: Uuid, content: &str) -> Result<Post> {
        (**self).create_post(user_id, content).await
    }

    async fn delete_post(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        (**self).delete_post(post_id, user_id).await
    }
}

/// Sort a raw fetch result into feed order: newest first.
pub fn sort_newest_first(posts: &mut [FeedPost]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Outcome of the new-post flow.
///
/// The missing-session redirect is an explicit result variant rather than a
/// side effect; the HTTP layer decides how to surface it.
#[derive(Debug)]
pub enum NewPostOutcome {
    /// No authenticated session: send the caller to the sign-in page.
    RedirectToSignIn,
    /// Input rejected before any create call was made.
    Rejected(String),
    /// Post created; the caller should re-trigger a load.
    Created(Post),
}

/// The feed's client-facing state: ordered posts plus a loading flag.
///
/// State is owned exclusively by this struct and replaced wholesale on each
/// load; there are no partial patch paths. The loading flag walks
/// `idle -> loading -> idle` on every load, with no separate error state.
pub struct FeedView<S> {
    store: S,
    posts: Vec<FeedPost>,
    loading: bool,
}

impl<S: PostStore> FeedView<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            posts: Vec::new(),
            loading: false,
        }
    }

    /// The currently stored feed, newest first.
    pub fn posts(&self) -> &[FeedPost] {
        &self.posts
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Re-fetch the full post set, sort it, and store it.
    ///
    /// A failed fetch is logged and leaves the previously stored list
    /// untouched; it never propagates to the caller. The loading flag is
    /// cleared on every exit path.
    pub async fn load_posts(&mut self) {
        self.loading = true;

        match self.store.get_all_posts().await {
            Ok(mut posts) => {
                sort_newest_first(&mut posts);
                self.posts = posts;
            }
            Err(err) => {
                tracing::warn!("failed to fetch posts: {}", err);
            }
        }

        self.loading = false;
    }

    /// Run the new-post flow for the given session identity.
    ///
    /// No create call is made unless a session is present and the content is
    /// non-empty. Does not update the stored list; the caller re-triggers
    /// `load_posts` on `Created`.
    pub async fn submit_post(
        &self,
        session: Option<Uuid>,
        content: &str,
    ) -> Result<NewPostOutcome> {
        let Some(user_id) = session else {
            return Ok(NewPostOutcome::RedirectToSignIn);
        };

        if content.trim().is_empty() {
            return Ok(NewPostOutcome::Rejected(
                "post content must not be empty".to_string(),
            ));
        }

        let post = self.store.create_post(user_id, content).await?;
        Ok(NewPostOutcome::Created(post))
    }

    /// Run the delete action against the store. The caller re-triggers
    /// `load_posts` when this reports true.
    pub async fn delete_post(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        self.store.delete_post(post_id, user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::UserSummary;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Mutex;

    struct FakeStore {
        posts: Vec<FeedPost>,
        fail_fetch: bool,
        created: Mutex<Vec<String>>,
    }

    impl FakeStore {
        fn with_posts(posts: Vec<FeedPost>) -> Self {
            Self {
                posts,
                fail_fetch: false,
                created: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                posts: Vec::new(),
                fail_fetch: true,
                created: Mutex::new(Vec::new()),
            }
        }

        fn created_contents(&self) -> Vec<String> {
            self.created.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PostStore for FakeStore {
        async fn get_all_posts(&self) -> Result<Vec<FeedPost>> {
            if self.fail_fetch {
                return Err(AppError::Internal("store unavailable".into()));
            }
            Ok(self.posts.clone())
        }

        async fn create_post(&self, user_id: Uuid, content: &str) -> Result<Post> {
            self.created.lock().unwrap().push(content.to_string());
            Ok(Post {
                id: Uuid::new_v4(),
                user_id,
                content: content.to_string(),
                created_at: Utc::now(),
            })
        }

        async fn delete_post(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
            Ok(self
                .posts
                .iter()
                .any(|p| p.id == post_id && p.user_id == user_id))
        }
    }

    fn feed_post(created_at: DateTime<Utc>) -> FeedPost {
        let user_id = Uuid::new_v4();
        FeedPost {
            id: Uuid::new_v4(),
            user_id,
            content: format!("posted at {created_at}"),
            created_at,
            author: UserSummary {
                id: user_id,
                name: "ada".to_string(),
                image: None,
            },
            likes: Vec::new(),
            comments: Vec::new(),
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[tokio::test]
    async fn load_sorts_newest_first() {
        let store = FakeStore::with_posts(vec![feed_post(at(1)), feed_post(at(3)), feed_post(at(2))]);
        let mut view = FeedView::new(store);

        view.load_posts().await;

        assert!(!view.is_loading());
        let stored = view.posts();
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[0].created_at, at(3));
        assert_eq!(stored[1].created_at, at(2));
        assert_eq!(stored[2].created_at, at(1));
        for pair in stored.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_posts_and_clears_loading() {
        let mut view = FeedView::new(FakeStore::with_posts(vec![feed_post(at(5))]));
        view.load_posts().await;
        assert_eq!(view.posts().len(), 1);

        // Swap the store for a failing one without touching the stored list.
        view.store = FakeStore::failing();
        view.load_posts().await;

        assert!(!view.is_loading());
        assert_eq!(view.posts().len(), 1);
        assert_eq!(view.posts()[0].created_at, at(5));
    }

    #[tokio::test]
    async fn submit_without_session_redirects_and_skips_create() {
        let view = FeedView::new(FakeStore::with_posts(Vec::new()));

        let outcome = view.submit_post(None, "hello").await.unwrap();

        assert!(matches!(outcome, NewPostOutcome::RedirectToSignIn));
        assert!(view.store.created_contents().is_empty());
    }

    #[tokio::test]
    async fn submit_empty_content_rejects_and_skips_create() {
        let view = FeedView::new(FakeStore::with_posts(Vec::new()));

        let outcome = view
            .submit_post(Some(Uuid::new_v4()), "   ")
            .await
            .unwrap();

        match outcome {
            NewPostOutcome::Rejected(msg) => assert!(!msg.is_empty()),
            other => panic!("expected Rejected, got {other:?}"),
        }
        assert!(view.store.created_contents().is_empty());
    }

    #[tokio::test]
    async fn submit_creates_post_echoing_content() {
        let view = FeedView::new(FakeStore::with_posts(Vec::new()));
        let author = Uuid::new_v4();

        let outcome = view.submit_post(Some(author), "first post").await.unwrap();

        match outcome {
            NewPostOutcome::Created(post) => {
                assert_eq!(post.content, "first post");
                assert_eq!(post.user_id, author);
            }
            other => panic!("expected Created, got {other:?}"),
        }
        assert_eq!(view.store.created_contents(), vec!["first post".to_string()]);
    }

    #[tokio::test]
    async fn submit_preserves_surrounding_whitespace() {
        let view = FeedView::new(FakeStore::with_posts(Vec::new()));

        let outcome = view
            .submit_post(Some(Uuid::new_v4()), "  padded post  ")
            .await
            .unwrap();

        match outcome {
            NewPostOutcome::Created(post) => assert_eq!(post.content, "  padded post  "),
            other => panic!("expected Created, got {other:?}"),
        }
        // The store received the content exactly as submitted, untrimmed.
        assert_eq!(
            view.store.created_contents(),
            vec!["  padded post  ".to_string()]
        );
    }

    #[tokio::test]
    async fn delete_is_owner_scoped() {
        let post = feed_post(at(1));
        let (post_id, owner) = (post.id, post.user_id);
        let view = FeedView::new(FakeStore::with_posts(vec![post]));

        assert!(!view.delete_post(post_id, Uuid::new_v4()).await.unwrap());
        assert!(view.delete_post(post_id, owner).await.unwrap());
    }
}
