mod repositories;

pub use repositories::{
    CommentRepository, FeedQuery, PostRepository, ReactionRepository, RepoResult, UserRepository,
};
