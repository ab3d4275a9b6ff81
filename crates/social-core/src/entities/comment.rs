//! Comment entity - a reply on a post and a reaction subject of its own

use chrono::{DateTime, Utc};

use super::content::normalize_text;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Comment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub author_id: Snowflake,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Maximum comment length in characters
    pub const MAX_TEXT_LEN: usize = 500;

    /// Create a new Comment, trimming and validating the text
    pub fn new(
        id: Snowflake,
        post_id: Snowflake,
        author_id: Snowflake,
        text: &str,
    ) -> Result<Self, DomainError> {
        let text = normalize_text(text, Self::MAX_TEXT_LEN)?;
        let now = Utc::now();
        Ok(Self {
            id,
            post_id,
            author_id,
            text,
            created_at: now,
            updated_at: now,
        })
    }

    #[inline]
    pub fn is_author(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    /// Replace the text; only the comment author may edit
    pub fn edit(&mut self, editor: Snowflake, text: &str) -> Result<(), DomainError> {
        if !self.is_author(editor) {
            return Err(DomainError::NotOwner);
        }
        self.text = normalize_text(text, Self::MAX_TEXT_LEN)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Whether `user_id` may delete this comment
    ///
    /// The comment author and the author of the parent post both can.
    pub fn can_delete(&self, user_id: Snowflake, post_author_id: Snowflake) -> bool {
        self.is_author(user_id) || post_author_id == user_id
    }

    pub fn ensure_can_delete(
        &self,
        user_id: Snowflake,
        post_author_id: Snowflake,
    ) -> Result<(), DomainError> {
        if self.can_delete(user_id, post_author_id) {
            Ok(())
        } else {
            Err(DomainError::NotAuthorized)
        }
    }
}
