//! Reaction types - the closed set of endorsements a user can attach to a subject

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Reaction type
///
/// Declaration order is the canonical display order and breaks ties when
/// reactions with equal counts are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionType {
    Like,
    Love,
    Celebrate,
    Support,
    Insightful,
    Curious,
}

impl ReactionType {
    /// Every reaction type in canonical order
    pub const ALL: [ReactionType; 6] = [
        Self::Like,
        Self::Love,
        Self::Celebrate,
        Self::Support,
        Self::Insightful,
        Self::Curious,
    ];

    /// Wire and storage name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Love => "love",
            Self::Celebrate => "celebrate",
            Self::Support => "support",
            Self::Insightful => "insightful",
            Self::Curious => "curious",
        }
    }

    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Like => "👍",
            Self::Love => "❤️",
            Self::Celebrate => "👏",
            Self::Support => "🤝",
            Self::Insightful => "💡",
            Self::Curious => "🤔",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Like => "Like",
            Self::Love => "Love",
            Self::Celebrate => "Celebrate",
            Self::Support => "Support",
            Self::Insightful => "Insightful",
            Self::Curious => "Curious",
        }
    }
}

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| DomainError::InvalidReactionType(s.to_string()))
    }
}
