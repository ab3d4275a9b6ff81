//! Reaction subjects and the acting viewer

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Snowflake;
use crate::error::DomainError;

/// Kind of entity that can receive reactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    Post,
    Comment,
}

impl SubjectKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "post" => Some(Self::Post),
            "comment" => Some(Self::Comment),
            _ => None,
        }
    }
}

/// A post or comment that can receive reactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject {
    pub kind: SubjectKind,
    pub id: Snowflake,
}

impl Subject {
    pub const fn post(id: Snowflake) -> Self {
        Self {
            kind: SubjectKind::Post,
            id,
        }
    }

    pub const fn comment(id: Snowflake) -> Self {
        Self {
            kind: SubjectKind::Comment,
            id,
        }
    }

    /// Not-found error naming this subject
    pub fn not_found(&self) -> DomainError {
        match self.kind {
            SubjectKind::Post => DomainError::PostNotFound(self.id),
            SubjectKind::Comment => DomainError::CommentNotFound(self.id),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.id)
    }
}

/// The user performing an operation, passed explicitly to every call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Viewer {
    #[default]
    Anonymous,
    User(Snowflake),
}

impl Viewer {
    pub fn user_id(&self) -> Option<Snowflake> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(*id),
        }
    }

    #[inline]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }

    /// The viewer's id, or `Unauthenticated` for mutating calls without one
    pub fn require(&self) -> Result<Snowflake, DomainError> {
        self.user_id().ok_or(DomainError::Unauthenticated)
    }
}

impl From<Option<Snowflake>> for Viewer {
    fn from(id: Option<Snowflake>) -> Self {
        id.map_or(Self::Anonymous, Self::User)
    }
}
