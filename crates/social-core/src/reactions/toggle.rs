//! Optimistic reaction toggling
//!
//! [`ReactionToggle`] tracks one viewer's reaction on one subject while
//! requests to the server are outstanding. Local state changes immediately
//! on a toggle; the server's answer either confirms it or rolls it back.
//! At most one request is in flight; toggles made meanwhile collapse into a
//! single queued intent that is sent once the current request resolves.

use crate::value_objects::{ReactionCounts, ReactionType};

/// Reaction a viewer ends up with after toggling `requested` from `current`
///
/// Same type removes, any other type replaces, nothing sets.
pub fn next_reaction(
    current: Option<ReactionType>,
    requested: ReactionType,
) -> Option<ReactionType> {
    if current == Some(requested) {
        None
    } else {
        Some(requested)
    }
}

/// Request the caller must send to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionRequest {
    Set(ReactionType),
    Clear,
}

impl ReactionRequest {
    fn for_target(target: Option<ReactionType>) -> Self {
        target.map_or(Self::Clear, Self::Set)
    }

    pub fn target(&self) -> Option<ReactionType> {
        match self {
            Self::Set(t) => Some(*t),
            Self::Clear => None,
        }
    }
}

/// Observable state of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    None,
    Reacted(ReactionType),
    /// A request is in flight; holds the latest intended reaction
    Pending(Option<ReactionType>),
}

#[derive(Debug, Clone, Default)]
pub struct ReactionToggle {
    confirmed: Option<ReactionType>,
    confirmed_counts: ReactionCounts,
    in_flight: Option<Option<ReactionType>>,
    queued: Option<Option<ReactionType>>,
}

impl ReactionToggle {
    pub fn new(confirmed: Option<ReactionType>, counts: ReactionCounts) -> Self {
        Self {
            confirmed,
            confirmed_counts: counts,
            in_flight: None,
            queued: None,
        }
    }

    pub fn state(&self) -> ToggleState {
        if self.in_flight.is_some() {
            return ToggleState::Pending(self.reaction());
        }
        match self.confirmed {
            None => ToggleState::None,
            Some(t) => ToggleState::Reacted(t),
        }
    }

    /// The reaction to display: the latest intent, else the confirmed one
    pub fn reaction(&self) -> Option<ReactionType> {
        self.queued.or(self.in_flight).unwrap_or(self.confirmed)
    }

    /// Counts to display, with the viewer's latest intent applied
    pub fn counts(&self) -> ReactionCounts {
        self.confirmed_counts
            .with_change(self.confirmed, self.reaction())
    }

    pub fn confirmed(&self) -> Option<ReactionType> {
        self.confirmed
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Apply a toggle locally
    ///
    /// Returns the request to send now, or `None` when a request is already
    /// in flight and the intent was queued instead.
    pub fn toggle(&mut self, reaction_type: ReactionType) -> Option<ReactionRequest> {
        let target = next_reaction(self.reaction(), reaction_type);
        if self.in_flight.is_some() {
            self.queued = Some(target);
            return None;
        }
        self.in_flight = Some(target);
        Some(ReactionRequest::for_target(target))
    }

    /// The server accepted the in-flight request
    ///
    /// The server's reaction and counts become the new baseline, even when
    /// they differ from what was sent. Returns a follow-up request when a
    /// queued intent differs from the server's reaction.
    pub fn confirm(
        &mut self,
        server_me: Option<ReactionType>,
        server_counts: ReactionCounts,
    ) -> Option<ReactionRequest> {
        self.in_flight.take()?;
        self.confirmed = server_me;
        self.confirmed_counts = server_counts;

        match self.queued.take() {
            Some(next) if next != self.confirmed => {
                self.in_flight = Some(next);
                Some(ReactionRequest::for_target(next))
            }
            _ => None,
        }
    }

    /// The in-flight request failed
    ///
    /// Restores the last confirmed state and drops any queued intent.
    /// Returns `true` exactly once per failed request so the caller raises
    /// a single notification.
    pub fn fail(&mut self) -> bool {
        if self.in_flight.take().is_none() {
            return false;
        }
        self.queued = None;
        true
    }

    /// Replace the baseline with fresh server data when nothing is pending
    pub fn sync(&mut self, confirmed: Option<ReactionType>, counts: ReactionCounts) -> bool {
        if self.is_pending() {
            return false;
        }
        self.confirmed = confirmed;
        self.confirmed_counts = counts;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ReactionType::{Like, Love};

    fn server(types: &[ReactionType]) -> ReactionCounts {
        ReactionCounts::tally(types.iter().copied())
    }

    #[test]
    fn test_next_reaction_table() {
        assert_eq!(next_reaction(None, Like), Some(Like));
        assert_eq!(next_reaction(Some(Like), Like), None);
        assert_eq!(next_reaction(Some(Like), Love), Some(Love));
    }

    #[test]
    fn test_add_then_remove() {
        let mut toggle = ReactionToggle::default();

        assert_eq!(toggle.toggle(Like), Some(ReactionRequest::Set(Like)));
        assert_eq!(toggle.state(), ToggleState::Pending(Some(Like)));
        assert_eq!(toggle.counts().get(Like), 1);
        assert_eq!(toggle.confirm(Some(Like), server(&[Like])), None);
        assert_eq!(toggle.state(), ToggleState::Reacted(Like));

        assert_eq!(toggle.toggle(Like), Some(ReactionRequest::Clear));
        assert_eq!(toggle.counts().total(), 0);
        assert_eq!(toggle.confirm(None, server(&[])), None);
        assert_eq!(toggle.state(), ToggleState::None);
    }

    #[test]
    fn test_change_type_never_double_counts() {
        let mut toggle = ReactionToggle::new(Some(Like), server(&[Like, Like]));
        toggle.toggle(Love);
        let counts = toggle.counts();
        assert_eq!(counts.get(Like), 1);
        assert_eq!(counts.get(Love), 1);
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn test_toggles_during_flight_collapse_to_latest() {
        let mut toggle = ReactionToggle::default();
        assert!(toggle.toggle(Like).is_some());

        // Like -> none -> Love while the first request is outstanding
        assert_eq!(toggle.toggle(Like), None);
        assert_eq!(toggle.toggle(Love), None);
        assert_eq!(toggle.reaction(), Some(Love));
        assert_eq!(toggle.counts().total(), 1);

        let follow_up = toggle.confirm(Some(Like), server(&[Like]));
        assert_eq!(follow_up, Some(ReactionRequest::Set(Love)));
        assert!(toggle.is_pending());

        assert_eq!(toggle.confirm(Some(Love), server(&[Love])), None);
        assert_eq!(toggle.state(), ToggleState::Reacted(Love));
    }

    #[test]
    fn test_queued_intent_matching_confirmed_settles() {
        let mut toggle = ReactionToggle::default();
        toggle.toggle(Like);
        toggle.toggle(Like);
        toggle.toggle(Like);

        assert_eq!(toggle.confirm(Some(Like), server(&[Like])), None);
        assert!(!toggle.is_pending());
        assert_eq!(toggle.state(), ToggleState::Reacted(Like));
    }

    #[test]
    fn test_failure_rolls_back_once() {
        let mut toggle = ReactionToggle::new(Some(Like), server(&[Like]));
        toggle.toggle(Love);
        toggle.toggle(Like);

        assert!(toggle.fail());
        assert!(!toggle.fail());
        assert_eq!(toggle.state(), ToggleState::Reacted(Like));
        assert_eq!(toggle.counts(), server(&[Like]));
    }

    #[test]
    fn test_stray_confirm_is_ignored() {
        let mut toggle = ReactionToggle::new(None, ReactionCounts::new());
        assert_eq!(toggle.confirm(Some(Love), server(&[Love])), None);
        assert_eq!(toggle.state(), ToggleState::None);
    }

    #[test]
    fn test_confirm_adopts_server_reaction() {
        // Another session switched to Love while our Like was in flight
        let mut toggle = ReactionToggle::default();
        toggle.toggle(Like);

        assert_eq!(toggle.confirm(Some(Love), server(&[Love])), None);
        assert_eq!(toggle.state(), ToggleState::Reacted(Love));
        assert_eq!(toggle.counts(), server(&[Love]));
    }

    #[test]
    fn test_queued_intent_compared_against_server_reaction() {
        let mut toggle = ReactionToggle::default();
        toggle.toggle(Like);
        // Queued intent: back to none
        toggle.toggle(Like);

        // Server reports no reaction, so the queued "none" is already true
        assert_eq!(toggle.confirm(None, server(&[])), None);
        assert_eq!(toggle.state(), ToggleState::None);
        assert_eq!(toggle.counts().total(), 0);
    }

    #[test]
    fn test_sync_only_when_idle() {
        let mut toggle = ReactionToggle::default();
        toggle.toggle(Like);
        assert!(!toggle.sync(None, server(&[Love])));
        toggle.confirm(Some(Like), server(&[Like]));
        assert!(toggle.sync(Some(Love), server(&[Love, Love])));
        assert_eq!(toggle.counts().get(Love), 2);
    }
}
