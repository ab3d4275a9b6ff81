//! Post entity - a top-level reaction subject that owns a comment thread

use chrono::{DateTime, Utc};

use super::content::normalize_text;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub text: String,
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Maximum post length in characters
    pub const MAX_TEXT_LEN: usize = 3000;

    /// Create a new Post, trimming and validating the text
    pub fn new(
        id: Snowflake,
        author_id: Snowflake,
        text: &str,
        media_url: Option<String>,
    ) -> Result<Self, DomainError> {
        let text = normalize_text(text, Self::MAX_TEXT_LEN)?;
        let now = Utc::now();
        Ok(Self {
            id,
            author_id,
            text,
            media_url: media_url.filter(|url| !url.trim().is_empty()),
            created_at: now,
            updated_at: now,
        })
    }

    #[inline]
    pub fn is_author(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    /// Fails with `NotOwner` unless `user_id` wrote the post
    pub fn ensure_author(&self, user_id: Snowflake) -> Result<(), DomainError> {
        if self.is_author(user_id) {
            Ok(())
        } else {
            Err(DomainError::NotOwner)
        }
    }

    /// Replace the text; only the author may edit
    pub fn edit(&mut self, editor: Snowflake, text: &str) -> Result<(), DomainError> {
        self.ensure_author(editor)?;
        self.text = normalize_text(text, Self::MAX_TEXT_LEN)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn is_edited(&self) -> bool {
        self.updated_at > self.created_at
    }
}
