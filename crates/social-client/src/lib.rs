//! # social-client
//!
//! Client-side reaction and comment handling. A [`ReactionController`]
//! applies toggles to local state immediately, sends them through a
//! [`ReactionApi`] and rolls back with a single notification when the
//! server rejects them. A [`CommentThread`] keeps a post's comments and
//! reports every add, edit and delete through the same [`Notifier`].

pub mod api;
pub mod comments;
pub mod controller;
pub mod error;
pub mod notify;
mod transport;

pub use api::{HttpReactionApi, ReactionApi, ReactionTarget, RemoteSummary};
pub use comments::{CommentApi, CommentThread, HttpCommentApi, RemoteComment};
pub use controller::{ReactionController, ReactionSnapshot};
pub use error::{ClientError, ClientResult};
pub use notify::{Notification, NotificationKind, Notifier, TracingNotifier};
