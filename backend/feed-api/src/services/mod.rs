/// Business logic layer
///
/// - Post service: creation, enriched listing, deletion
/// - Comment and like services: engagement actions with existence checks
/// - Feed: the view state over the post store (load, sort, new-post flow)
pub mod comments;
pub mod feed;
pub mod likes;
pub mod posts;

pub use comments::CommentService;
pub use feed::{FeedView, NewPostOutcome, PostStore};
pub use likes::{LikeService, LikeStore};
pub use posts::PostService;
