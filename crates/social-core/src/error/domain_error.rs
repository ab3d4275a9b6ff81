//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Post not found: {0}")]
    PostNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown reaction type: {0}")]
    InvalidReactionType(String),

    #[error("Text must not be empty")]
    EmptyText,

    #[error("Text too long: max {max} characters")]
    TooLong { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Only the author can modify this")]
    NotOwner,

    #[error("Not allowed to perform this action")]
    NotAuthorized,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Temporary storage failure: {0}")]
    TransientIoFailure(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",

            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidReactionType(_) => "INVALID_REACTION_TYPE",
            Self::EmptyText => "EMPTY_TEXT",
            Self::TooLong { .. } => "TEXT_TOO_LONG",

            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::NotOwner => "NOT_OWNER",
            Self::NotAuthorized => "NOT_AUTHORIZED",

            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",

            Self::TransientIoFailure(_) => "TRANSIENT_IO_FAILURE",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::PostNotFound(_) | Self::CommentNotFound(_)
        )
    }

    /// Input was rejected before any state changed
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidReactionType(_)
                | Self::EmptyText
                | Self::TooLong { .. }
        )
    }

    /// Ownership or permission failures (not missing credentials)
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotOwner | Self::NotAuthorized)
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists)
    }

    /// Worth retrying by the caller
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::TransientIoFailure(_))
    }
}
