//! User-facing notifications

use tracing::{error, info, warn};

use crate::api::ReactionTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    /// The request was not sent; the input needs fixing
    Warning,
    /// The request failed; local state was rolled back
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    /// Reaction the notification is about, when there is one
    pub target: Option<ReactionTarget>,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            target: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    pub fn for_target(mut self, target: ReactionTarget) -> Self {
        self.target = Some(target);
        self
    }
}

/// Sink for notifications shown to the viewer
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Notifier that only logs
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let reaction = notification.target.map(|t| t.to_string());
        match notification.kind {
            NotificationKind::Info | NotificationKind::Success => {
                info!(kind = ?notification.kind, reaction = ?reaction, "{}", notification.message);
            }
            NotificationKind::Warning => {
                warn!(reaction = ?reaction, "{}", notification.message);
            }
            NotificationKind::Error => {
                error!(reaction = ?reaction, "{}", notification.message);
            }
        }
    }
}
