//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] and takes the acting
//! [`Viewer`](social_core::Viewer) explicitly on every call.

pub mod auth;
pub mod comment;
pub mod context;
pub mod error;
pub mod post;
pub mod reaction;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::AuthService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use post::{PostService, DEFAULT_FEED_LIMIT, MAX_FEED_LIMIT};
pub use reaction::ReactionService;
pub use user::{UserService, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
