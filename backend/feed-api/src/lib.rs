/// Feed API Library
///
/// Handles the post feed for the Ripple social platform: users create text
/// posts, like them, and comment on them; the feed renders posts newest-first
/// with nested author, like, and comment data. Session issuance lives in an
/// external identity provider; this service only validates session tokens.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Data structures for users, posts, comments, likes
/// - `services`: Business logic layer, including the feed view state
/// - `db`: Database access layer and repositories
/// - `middleware`: Session extraction for authenticated routes
/// - `auth`: Session token validation
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
