//! Test fixtures and data generators
//!
//! Request bodies are serialized from these types; responses are decoded
//! into loose mirrors of the server's DTOs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
///
/// Includes the process id; emails stay unique across runs against the
/// same database.
pub fn unique_suffix() -> String {
    format!("{}x{}", std::process::id(), COUNTER.fetch_add(1, Ordering::SeqCst))
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("user{suffix}"),
            email: format!("test{suffix}@example.com"),
            password: "TestPass123!".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
}

// ============================================================================
// Posts and comments
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CreatePostRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

impl CreatePostRequest {
    pub fn unique() -> Self {
        Self {
            text: format!("Post number {}", unique_suffix()),
            media_url: None,
        }
    }
}

/// Body for post and comment create/edit
#[derive(Debug, Serialize)]
pub struct TextRequest {
    pub text: String,
}

impl TextRequest {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub text: String,
    pub media_url: Option<String>,
    pub edited: bool,
    pub author: Option<UserResponse>,
    pub comment_count: i64,
    pub reactions: ReactionSummary,
}

#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub text: String,
    pub edited: bool,
    pub author: Option<UserResponse>,
    pub reactions: ReactionSummary,
}

#[derive(Debug, Deserialize)]
pub struct PaginationMeta {
    pub before: Option<String>,
    pub has_more: bool,
    pub limit: i64,
}

#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Deserialize)]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

/// Page addressed by page number, as returned by search
#[derive(Debug, Deserialize)]
pub struct NumberedPage<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

// ============================================================================
// Reactions
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ReactionRequest {
    #[serde(rename = "type")]
    pub reaction_type: String,
}

impl ReactionRequest {
    pub fn new(reaction_type: &str) -> Self {
        Self {
            reaction_type: reaction_type.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BreakdownEntry {
    #[serde(rename = "type")]
    pub reaction_type: String,
    pub emoji: String,
    pub count: i64,
}

#[derive(Debug, Deserialize)]
pub struct ReactionSummary {
    pub counts: HashMap<String, i64>,
    pub total: i64,
    pub me: Option<String>,
    pub breakdown: Vec<BreakdownEntry>,
}

impl ReactionSummary {
    pub fn count(&self, reaction_type: &str) -> i64 {
        self.counts.get(reaction_type).copied().unwrap_or(0)
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}
