//! Per-type reaction tallies for one subject

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ReactionType;

/// Reaction counts keyed by type
///
/// Never stores a zero entry, so two tallies of the same record set compare
/// equal and serialize identically (`{}` when nobody reacted).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReactionCounts(BTreeMap<ReactionType, i64>);

impl ReactionCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally a sequence of reaction types, one per record
    pub fn tally<I>(types: I) -> Self
    where
        I: IntoIterator<Item = ReactionType>,
    {
        let mut counts = Self::new();
        for t in types {
            counts.increment(t);
        }
        counts
    }

    /// Build from `(type, count)` pairs as returned by an aggregate query
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (ReactionType, i64)>,
    {
        let mut counts = Self::new();
        for (t, n) in pairs {
            if n > 0 {
                *counts.0.entry(t).or_insert(0) += n;
            }
        }
        counts
    }

    #[inline]
    pub fn get(&self, reaction_type: ReactionType) -> i64 {
        self.0.get(&reaction_type).copied().unwrap_or(0)
    }

    pub fn total(&self) -> i64 {
        self.0.values().sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Non-zero entries in canonical type order
    pub fn iter(&self) -> impl Iterator<Item = (ReactionType, i64)> + '_ {
        self.0.iter().map(|(t, n)| (*t, *n))
    }

    pub fn increment(&mut self, reaction_type: ReactionType) {
        *self.0.entry(reaction_type).or_insert(0) += 1;
    }

    /// Decrement, dropping the entry when it reaches zero
    pub fn decrement(&mut self, reaction_type: ReactionType) {
        if let Some(n) = self.0.get_mut(&reaction_type) {
            *n -= 1;
            if *n <= 0 {
                self.0.remove(&reaction_type);
            }
        }
    }

    /// Counts after one user's reaction moves from `from` to `to`
    ///
    /// A single user contributes at most one to the total, so a change of
    /// type keeps the total and a removal lowers it by one.
    pub fn with_change(&self, from: Option<ReactionType>, to: Option<ReactionType>) -> Self {
        let mut next = self.clone();
        if from != to {
            if let Some(old) = from {
                next.decrement(old);
            }
            if let Some(new) = to {
                next.increment(new);
            }
        }
        next
    }
}

impl FromIterator<ReactionType> for ReactionCounts {
    fn from_iter<I: IntoIterator<Item = ReactionType>>(iter: I) -> Self {
        Self::tally(iter)
    }
}
