//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod post;
mod reaction;
mod user;

pub use comment::CommentModel;
pub use post::PostModel;
pub use reaction::{ReactionCountModel, ReactionModel, UserReactionModel};
pub use user::UserModel;
