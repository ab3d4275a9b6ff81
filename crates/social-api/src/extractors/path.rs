//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs from path parameters.

use serde::Deserialize;
use social_core::Snowflake;

use crate::response::ApiError;

fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

/// Path parameters with user_id
#[derive(Debug, Deserialize)]
pub struct UserIdPath {
    pub user_id: String,
}

impl UserIdPath {
    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.user_id, "user_id")
    }
}

/// Path parameters with post_id
#[derive(Debug, Deserialize)]
pub struct PostIdPath {
    pub post_id: String,
}

impl PostIdPath {
    pub fn post_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.post_id, "post_id")
    }
}

/// Path parameters with post_id and comment_id
#[derive(Debug, Deserialize)]
pub struct CommentIdPath {
    pub post_id: String,
    pub comment_id: String,
}

impl CommentIdPath {
    pub fn post_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.post_id, "post_id")
    }

    pub fn comment_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.comment_id, "comment_id")
    }
}
