//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateCommentRequest, CreatePostRequest, LoginRequest, RefreshTokenRequest, RegisterRequest,
    SetReactionRequest, UpdateCommentRequest, UpdatePostRequest, UserSearchRequest,
};

pub use responses::{
    AuthResponse, CommentResponse, CurrentUserResponse, HealthChecks, HealthResponse,
    NumberedPage, PageMeta, PaginatedResponse, PaginationMeta, PostResponse,
    ReactionSummaryResponse, ReadinessResponse, UserResponse,
};

pub use mappers::{CommentWithReactions, PostWithDetails};
