use actix_web::{web, HttpResponse};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::FeedResponse;
use crate::services::{FeedView, PostStore};

/// Shared feed state: one view instance per process, loads serialized behind
/// the write lock so a finished load always replaces the list wholesale.
///
/// The store sits behind a trait object so handler tests can swap in an
/// in-memory store.
pub struct FeedHandlerState {
    pub view: RwLock<FeedView<Box<dyn PostStore>>>,
}

impl FeedHandlerState {
    pub fn new(store: Box<dyn PostStore>) -> Self {
        Self {
            view: RwLock::new(FeedView::new(store)),
        }
    }

    /// Re-fetch after a successful mutation, mirroring the UI's
    /// on-success callback.
    pub async fn refresh(&self) {
        self.view.write().await.load_posts().await;
    }
}

/// Load the feed and return it newest-first.
///
/// Public: the feed renders with or without a session. A failed fetch
/// degrades to whatever list was stored before, never an error response.
pub async fn get_feed(state: web::Data<FeedHandlerState>) -> Result<HttpResponse> {
    let mut view = state.view.write().await;
    view.load_posts().await;

    Ok(HttpResponse::Ok().json(FeedResponse {
        posts: view.posts().to_vec(),
    }))
}
