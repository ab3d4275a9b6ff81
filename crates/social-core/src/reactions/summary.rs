//! Display ordering for reaction counts

use serde::Serialize;

use crate::value_objects::{ReactionCounts, ReactionType};

/// One entry of a formatted reaction list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionBreakdown {
    #[serde(rename = "type")]
    pub reaction_type: ReactionType,
    pub emoji: &'static str,
    pub label: &'static str,
    pub count: i64,
}

/// Order counts for display: highest count first, ties in canonical type
/// order, zero counts left out.
pub fn format_reaction_counts(counts: &ReactionCounts) -> Vec<ReactionBreakdown> {
    let mut entries: Vec<ReactionBreakdown> = counts
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(reaction_type, count)| ReactionBreakdown {
            reaction_type,
            emoji: reaction_type.emoji(),
            label: reaction_type.label(),
            count,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.reaction_type.cmp(&b.reaction_type))
    });
    entries
}

/// Everything a client needs to render a subject's reactions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionSummary {
    pub counts: ReactionCounts,
    pub total: i64,
    /// The viewer's own reaction, if any
    pub me: Option<ReactionType>,
    pub breakdown: Vec<ReactionBreakdown>,
}

impl ReactionSummary {
    pub fn new(counts: ReactionCounts, me: Option<ReactionType>) -> Self {
        Self {
            total: counts.total(),
            breakdown: format_reaction_counts(&counts),
            counts,
            me,
        }
    }
}
