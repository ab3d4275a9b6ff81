//! Reaction aggregation and the optimistic toggle state machine

mod summary;
mod toggle;

pub use summary::{format_reaction_counts, ReactionBreakdown, ReactionSummary};
pub use toggle::{next_reaction, ReactionRequest, ReactionToggle, ToggleState};
