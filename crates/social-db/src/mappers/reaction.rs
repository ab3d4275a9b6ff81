//! Reaction entity <-> model mapper

use std::collections::HashMap;

use social_core::entities::Reaction;
use social_core::error::DomainError;
use social_core::value_objects::{ReactionCounts, ReactionType, Snowflake, Subject, SubjectKind};

use crate::models::{ReactionCountModel, ReactionModel};

/// Parse a stored reaction type
///
/// The column is constrained, so a failure here means the row was written
/// by something else and is reported as a database error.
pub fn parse_reaction_type(raw: &str) -> Result<ReactionType, DomainError> {
    raw.parse()
        .map_err(|_| DomainError::DatabaseError(format!("unknown reaction type in row: {raw}")))
}

impl TryFrom<ReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        let kind = SubjectKind::parse(&model.subject_kind).ok_or_else(|| {
            DomainError::DatabaseError(format!("unknown subject kind in row: {}", model.subject_kind))
        })?;

        Ok(Reaction {
            subject: Subject {
                kind,
                id: Snowflake::new(model.subject_id),
            },
            user_id: Snowflake::new(model.user_id),
            reaction_type: parse_reaction_type(&model.reaction_type)?,
            created_at: model.created_at,
        })
    }
}

/// Fold aggregate rows into one tally per subject
pub fn counts_by_subject(
    rows: Vec<ReactionCountModel>,
) -> Result<HashMap<Snowflake, ReactionCounts>, DomainError> {
    let mut pairs: HashMap<Snowflake, Vec<(ReactionType, i64)>> = HashMap::new();
    for row in rows {
        let reaction_type = parse_reaction_type(&row.reaction_type)?;
        pairs
            .entry(Snowflake::new(row.subject_id))
            .or_default()
            .push((reaction_type, row.count));
    }

    Ok(pairs
        .into_iter()
        .map(|(id, pairs)| (id, ReactionCounts::from_pairs(pairs)))
        .filter(|(_, counts)| !counts.is_empty())
        .collect())
}
