/// HTTP handlers for feed endpoints
///
/// - Feed: load-and-render contract over the shared feed view
/// - Posts: create, list, delete
/// - Comments and likes: engagement actions; every successful mutation
///   re-triggers a feed load
pub mod comments;
pub mod feed;
pub mod likes;
pub mod posts;

// Re-export handler functions at module level
pub use comments::{create_comment, get_post_comments};
pub use feed::{get_feed, FeedHandlerState};
pub use likes::{like_post, unlike_post};
pub use posts::{create_post, delete_post, get_all_posts};
