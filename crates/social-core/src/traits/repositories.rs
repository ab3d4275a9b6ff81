//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::entities::{Comment, Post, Reaction, User};
use crate::error::DomainError;
use crate::value_objects::{ReactionCounts, ReactionType, Snowflake, Subject, SubjectKind};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by (lowercased) email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user; fails with `EmailAlreadyExists` on a duplicate email
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Users by id; unknown ids are absent from the map
    async fn find_many(&self, ids: &[Snowflake]) -> RepoResult<HashMap<Snowflake, User>>;

    /// Users whose username contains `query`, ignoring case, ordered by
    /// username
    async fn search(&self, query: &str, limit: i64, offset: i64) -> RepoResult<Vec<User>>;

    /// How many users `search` matches in total
    async fn count_matching(&self, query: &str) -> RepoResult<i64>;
}

// ============================================================================
// Post Repository
// ============================================================================

/// Query parameters for the post feed
#[derive(Debug, Clone, Default)]
pub struct FeedQuery {
    /// Only posts with an id strictly lower than this
    pub before: Option<Snowflake>,
    /// Only posts by this author
    pub author_id: Option<Snowflake>,
    pub limit: i64,
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// Posts newest first
    async fn find_feed(&self, query: FeedQuery) -> RepoResult<Vec<Post>>;

    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Update text and media of an existing post
    async fn update(&self, post: &Post) -> RepoResult<()>;

    /// Delete a post together with its comments and every reaction on them
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Comments on a post in insertion order
    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<Comment>>;

    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    async fn update(&self, comment: &Comment) -> RepoResult<()>;

    /// Delete a comment and its reactions in one unit
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Comment counts per post; posts without comments are absent
    async fn count_by_posts(&self, post_ids: &[Snowflake]) -> RepoResult<HashMap<Snowflake, i64>>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// The user's reaction on a subject, if any
    async fn find(&self, subject: Subject, user_id: Snowflake) -> RepoResult<Option<Reaction>>;

    /// Insert or replace the (subject, user) reaction
    ///
    /// Fails with the subject's not-found error when the subject no longer
    /// exists; nothing is written in that case.
    async fn upsert(&self, reaction: &Reaction) -> RepoResult<()>;

    /// Apply the add/change/remove rule for `requested` as one atomic step
    ///
    /// Returns the user's reaction afterwards. Concurrent toggles by the
    /// same user on the same subject observe each other's result.
    async fn toggle(
        &self,
        subject: Subject,
        user_id: Snowflake,
        requested: ReactionType,
    ) -> RepoResult<Option<ReactionType>>;

    /// Remove the (subject, user) reaction; returns whether one existed
    async fn delete(&self, subject: Subject, user_id: Snowflake) -> RepoResult<bool>;

    /// Per-type tally of the subject's current reactions
    async fn count_by_type(&self, subject: Subject) -> RepoResult<ReactionCounts>;

    /// Per-type tallies for many subjects of one kind; subjects without
    /// reactions are absent
    async fn count_many(
        &self,
        kind: SubjectKind,
        ids: &[Snowflake],
    ) -> RepoResult<HashMap<Snowflake, ReactionCounts>>;

    /// The user's reactions on many subjects of one kind
    async fn find_many_for_user(
        &self,
        kind: SubjectKind,
        ids: &[Snowflake],
        user_id: Snowflake,
    ) -> RepoResult<HashMap<Snowflake, ReactionType>>;
}
