//! Optimistic reaction controller
//!
//! Drives a [`ReactionToggle`] for one target. Local state flips before the
//! network round trip. Toggles made while a request is in flight only move
//! the queued intent; the task that owns the in-flight request sends the
//! follow-up once the server answers. The state lock is never held across
//! an await.

use std::sync::Arc;

use parking_lot::Mutex;
use social_core::{ReactionRequest, ReactionSummary, ReactionToggle, ReactionType, ToggleState};
use tracing::{debug, info, instrument, warn};

use crate::api::{ReactionApi, ReactionTarget, RemoteSummary};
use crate::error::ClientResult;
use crate::notify::{Notification, Notifier};

const FAILURE_MESSAGE: &str = "Couldn't update your reaction. Please try again.";

/// What the viewer should currently see
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionSnapshot {
    pub state: ToggleState,
    pub summary: ReactionSummary,
}

pub struct ReactionController {
    target: ReactionTarget,
    api: Arc<dyn ReactionApi>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<ReactionToggle>,
}

impl ReactionController {
    pub fn new(
        target: ReactionTarget,
        api: Arc<dyn ReactionApi>,
        notifier: Arc<dyn Notifier>,
        initial: RemoteSummary,
    ) -> Self {
        Self {
            target,
            api,
            notifier,
            state: Mutex::new(ReactionToggle::new(initial.me, initial.counts)),
        }
    }

    /// Fetch the target's current reactions and start from them
    pub async fn load(
        target: ReactionTarget,
        api: Arc<dyn ReactionApi>,
        notifier: Arc<dyn Notifier>,
    ) -> ClientResult<Self> {
        let initial = api.fetch(target).await?;
        Ok(Self::new(target, api, notifier, initial))
    }

    pub fn target(&self) -> ReactionTarget {
        self.target
    }

    pub fn snapshot(&self) -> ReactionSnapshot {
        let toggle = self.state.lock();
        ReactionSnapshot {
            state: toggle.state(),
            summary: ReactionSummary::new(toggle.counts(), toggle.reaction()),
        }
    }

    /// Re-read the server state; ignored while a request is pending
    pub async fn refresh(&self) -> ClientResult<bool> {
        let remote = self.api.fetch(self.target).await?;
        Ok(self.state.lock().sync(remote.me, remote.counts))
    }

    /// Toggle `reaction_type` for the viewer
    ///
    /// Returns once the server has settled every request this call started.
    /// A call made while another request is in flight returns immediately.
    /// On failure local state is rolled back, the notifier hears about it
    /// once, and the error is returned.
    #[instrument(skip(self), fields(target = %self.target))]
    pub async fn toggle(&self, reaction_type: ReactionType) -> ClientResult<()> {
        let request = self.state.lock().toggle(reaction_type);
        let Some(mut request) = request else {
            debug!("Request in flight, intent queued");
            return Ok(());
        };

        loop {
            match self.send(request).await {
                Ok(remote) => {
                    let follow_up = self.state.lock().confirm(remote.me, remote.counts);
                    match follow_up {
                        Some(next) => request = next,
                        None => {
                            info!("Reaction settled");
                            return Ok(());
                        }
                    }
                }
                Err(e) => {
                    let rolled_back = self.state.lock().fail();
                    warn!(error = %e, "Reaction update failed");
                    if rolled_back {
                        self.notifier
                            .notify(Notification::error(FAILURE_MESSAGE).for_target(self.target));
                    }
                    return Err(e);
                }
            }
        }
    }

    async fn send(&self, request: ReactionRequest) -> ClientResult<RemoteSummary> {
        match request {
            ReactionRequest::Set(t) => self.api.set_reaction(self.target, t).await,
            ReactionRequest::Clear => self.api.clear_reaction(self.target).await,
        }
    }
}

impl std::fmt::Debug for ReactionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactionController")
            .field("target", &self.target)
            .field("state", &self.state.lock().state())
            .finish_non_exhaustive()
    }
}
