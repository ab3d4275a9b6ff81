//! # social-core
//!
//! Domain layer containing entities, value objects, reaction aggregation and
//! repository traits. This crate has zero dependencies on infrastructure
//! (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod reactions;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{normalize_text, Comment, Post, Reaction, ReactionSet, User};
pub use error::DomainError;
pub use reactions::{
    format_reaction_counts, next_reaction, ReactionBreakdown, ReactionRequest, ReactionSummary,
    ReactionToggle, ToggleState,
};
pub use traits::{
    CommentRepository, FeedQuery, PostRepository, ReactionRepository, RepoResult, UserRepository,
};
pub use value_objects::{
    ReactionCounts, ReactionType, Snowflake, SnowflakeGenerator, SnowflakeParseError, Subject,
    SubjectKind, Viewer,
};
