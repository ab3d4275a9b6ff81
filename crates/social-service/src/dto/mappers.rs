//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use social_common::TokenPair;
use social_core::entities::{Comment, Post, User};
use social_core::ReactionSummary;

use super::responses::{
    AuthResponse, CommentResponse, CurrentUserResponse, PostResponse, ReactionSummaryResponse,
    UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

impl AuthResponse {
    pub fn new(tokens: TokenPair, user: &User) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            expires_in: tokens.expires_in,
            user: CurrentUserResponse::from(user),
        }
    }
}

// ============================================================================
// Reaction Mappers
// ============================================================================

impl From<ReactionSummary> for ReactionSummaryResponse {
    fn from(summary: ReactionSummary) -> Self {
        Self {
            counts: summary.counts,
            total: summary.total,
            me: summary.me,
            breakdown: summary.breakdown,
        }
    }
}

// ============================================================================
// Post & Comment Mappers
// ============================================================================

/// Post with its author and the aggregates computed at read time
#[derive(Debug, Clone)]
pub struct PostWithDetails {
    pub post: Post,
    pub author: Option<User>,
    pub comment_count: i64,
    pub reactions: ReactionSummary,
}

impl From<PostWithDetails> for PostResponse {
    fn from(details: PostWithDetails) -> Self {
        let edited = details.post.is_edited();
        let post = details.post;
        Self {
            id: post.id.to_string(),
            author_id: post.author_id.to_string(),
            text: post.text,
            media_url: post.media_url,
            created_at: post.created_at,
            updated_at: post.updated_at,
            edited,
            author: details.author.as_ref().map(UserResponse::from),
            comment_count: details.comment_count,
            reactions: details.reactions.into(),
        }
    }
}

/// Comment with its author and the viewer's reaction summary
#[derive(Debug, Clone)]
pub struct CommentWithReactions {
    pub comment: Comment,
    pub author: Option<User>,
    pub reactions: ReactionSummary,
}

impl From<CommentWithReactions> for CommentResponse {
    fn from(details: CommentWithReactions) -> Self {
        let comment = details.comment;
        Self {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            author_id: comment.author_id.to_string(),
            edited: comment.updated_at > comment.created_at,
            text: comment.text,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            author: details.author.as_ref().map(UserResponse::from),
            reactions: details.reactions.into(),
        }
    }
}
