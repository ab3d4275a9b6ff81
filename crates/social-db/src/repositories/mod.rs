//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in social-core.

mod comment;
mod error;
mod post;
mod reaction;
mod user;

pub use comment::PgCommentRepository;
pub use error::{map_db_error, map_unique_violation};
pub use post::PgPostRepository;
pub use reaction::PgReactionRepository;
pub use user::PgUserRepository;
