//! Domain entities - core business objects

mod comment;
mod content;
mod post;
mod reaction;
mod user;

pub use comment::Comment;
pub use content::normalize_text;
pub use post::Post;
pub use reaction::{Reaction, ReactionSet};
pub use user::User;
