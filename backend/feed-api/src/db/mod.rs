/// Database access layer
///
/// Repository functions are free functions over a `PgPool`, one module per
/// aggregate. They return raw rows; nesting and ordering are the business
/// layer's job.
pub mod comment_repo;
pub mod like_repo;
pub mod post_repo;
