//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Post and comment text is checked by the domain entities, which trim before
//! measuring, so it carries no length rule here.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be 6-128 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    pub text: String,

    #[validate(url(message = "Media URL must be a valid URL"))]
    pub media_url: Option<String>,
}

/// Edit post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePostRequest {
    pub text: String,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Add comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    pub text: String,
}

/// Edit comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    pub text: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// User search query string
///
/// Page numbers start at 1; the service clamps both page and limit.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserSearchRequest {
    #[validate(length(min = 1, max = 64, message = "Search query must be 1-64 characters"))]
    pub q: String,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// Set or toggle a reaction
///
/// The type stays a string so an unknown name surfaces as
/// `INVALID_REACTION_TYPE` instead of a generic body rejection.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetReactionRequest {
    #[serde(rename = "type")]
    pub reaction_type: String,
}
