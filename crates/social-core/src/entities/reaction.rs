//! Reaction entity - one user's typed reaction on a post or comment

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::{ReactionCounts, ReactionType, Snowflake, Subject, Viewer};

/// Reaction record; at most one exists per (subject, user)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub subject: Subject,
    pub user_id: Snowflake,
    pub reaction_type: ReactionType,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    pub fn new(subject: Subject, user_id: Snowflake, reaction_type: ReactionType) -> Self {
        Self {
            subject,
            user_id,
            reaction_type,
            created_at: Utc::now(),
        }
    }
}

/// Reactions on a single subject, keyed by user
///
/// Counts are always tallied from the records, never kept alongside them.
#[derive(Debug, Clone)]
pub struct ReactionSet {
    subject: Subject,
    records: HashMap<Snowflake, Reaction>,
}

impl ReactionSet {
    pub fn new(subject: Subject) -> Self {
        Self {
            subject,
            records: HashMap::new(),
        }
    }

    #[inline]
    pub fn subject(&self) -> Subject {
        self.subject
    }

    pub fn get(&self, user_id: Snowflake) -> Option<ReactionType> {
        self.records.get(&user_id).map(|r| r.reaction_type)
    }

    /// Insert or overwrite the viewer's reaction
    pub fn set(
        &mut self,
        viewer: Viewer,
        reaction_type: ReactionType,
    ) -> Result<ReactionCounts, DomainError> {
        let user_id = viewer.require()?;
        let subject = self.subject;
        self.records
            .entry(user_id)
            .and_modify(|r| r.reaction_type = reaction_type)
            .or_insert_with(|| Reaction::new(subject, user_id, reaction_type));
        Ok(self.counts())
    }

    /// Remove the viewer's reaction; absent is a no-op
    pub fn clear(&mut self, viewer: Viewer) -> Result<ReactionCounts, DomainError> {
        let user_id = viewer.require()?;
        self.records.remove(&user_id);
        Ok(self.counts())
    }

    pub fn counts(&self) -> ReactionCounts {
        self.records.values().map(|r| r.reaction_type).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &Reaction> {
        self.records.values()
    }
}
