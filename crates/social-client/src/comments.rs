//! Comment threads
//!
//! [`CommentThread`] keeps one post's comments in insertion order and
//! tells the viewer how each add, edit and delete went. Text is checked
//! locally first; a rejected text is never sent.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::{Client, Method};
use serde::Deserialize;
use serde_json::json;
use social_core::{normalize_text, Comment, Snowflake};
use tracing::{info, instrument, warn};

use crate::api::{ReactionTarget, RemoteSummary};
use crate::error::ClientResult;
use crate::notify::{Notification, Notifier};
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteComment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub author_id: Snowflake,
    pub text: String,
    pub edited: bool,
    #[serde(default)]
    pub reactions: RemoteSummary,
}

#[async_trait]
pub trait CommentApi: Send + Sync {
    async fn list(&self, post_id: Snowflake) -> ClientResult<Vec<RemoteComment>>;

    async fn add(&self, post_id: Snowflake, text: &str) -> ClientResult<RemoteComment>;

    async fn edit(
        &self,
        post_id: Snowflake,
        comment_id: Snowflake,
        text: &str,
    ) -> ClientResult<RemoteComment>;

    async fn delete(&self, post_id: Snowflake, comment_id: Snowflake) -> ClientResult<()>;
}

#[derive(Debug, Clone)]
pub struct HttpCommentApi {
    transport: Transport,
}

impl HttpCommentApi {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> ClientResult<Self> {
        Ok(Self {
            transport: Transport::new(base_url, access_token)?,
        })
    }

    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            transport: Transport::with_client(client, base_url, access_token),
        }
    }

    pub fn set_access_token(&mut self, access_token: impl Into<String>) {
        self.transport.set_access_token(access_token);
    }
}

fn comments_path(post_id: Snowflake) -> String {
    format!("/posts/{post_id}/comments")
}

fn comment_path(post_id: Snowflake, comment_id: Snowflake) -> String {
    format!("/posts/{post_id}/comments/{comment_id}")
}

#[async_trait]
impl CommentApi for HttpCommentApi {
    #[instrument(skip(self))]
    async fn list(&self, post_id: Snowflake) -> ClientResult<Vec<RemoteComment>> {
        let request = self.transport.request(Method::GET, &comments_path(post_id));
        self.transport.send(request).await
    }

    #[instrument(skip(self, text))]
    async fn add(&self, post_id: Snowflake, text: &str) -> ClientResult<RemoteComment> {
        let request = self
            .transport
            .request(Method::POST, &comments_path(post_id))
            .json(&json!({ "text": text }));
        self.transport.send(request).await
    }

    #[instrument(skip(self, text))]
    async fn edit(
        &self,
        post_id: Snowflake,
        comment_id: Snowflake,
        text: &str,
    ) -> ClientResult<RemoteComment> {
        let request = self
            .transport
            .request(Method::PATCH, &comment_path(post_id, comment_id))
            .json(&json!({ "text": text }));
        self.transport.send(request).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, post_id: Snowflake, comment_id: Snowflake) -> ClientResult<()> {
        let request = self
            .transport
            .request(Method::DELETE, &comment_path(post_id, comment_id));
        self.transport.send_empty(request).await
    }
}

/// One post's comments as the viewer sees them
pub struct CommentThread {
    post_id: Snowflake,
    api: Arc<dyn CommentApi>,
    notifier: Arc<dyn Notifier>,
    comments: Mutex<Vec<RemoteComment>>,
}

impl CommentThread {
    pub async fn load(
        post_id: Snowflake,
        api: Arc<dyn CommentApi>,
        notifier: Arc<dyn Notifier>,
    ) -> ClientResult<Self> {
        let comments = api.list(post_id).await?;
        Ok(Self {
            post_id,
            api,
            notifier,
            comments: Mutex::new(comments),
        })
    }

    pub fn post_id(&self) -> Snowflake {
        self.post_id
    }

    /// Oldest first
    pub fn comments(&self) -> Vec<RemoteComment> {
        self.comments.lock().clone()
    }

    /// Target for a [`ReactionController`](crate::ReactionController) on one comment
    pub fn reaction_target(&self, comment_id: Snowflake) -> ReactionTarget {
        ReactionTarget::Comment {
            post_id: self.post_id,
            comment_id,
        }
    }

    #[instrument(skip(self, text), fields(post_id = %self.post_id))]
    pub async fn add(&self, text: &str) -> ClientResult<RemoteComment> {
        let text = self.checked(text)?;
        let result = self.api.add(self.post_id, &text).await;
        let comment = self.report(result, "Comment added", "Couldn't add your comment.")?;

        self.comments.lock().push(comment.clone());
        info!(comment_id = %comment.id, "Comment added");
        Ok(comment)
    }

    #[instrument(skip(self, text), fields(post_id = %self.post_id))]
    pub async fn edit(&self, comment_id: Snowflake, text: &str) -> ClientResult<RemoteComment> {
        let text = self.checked(text)?;
        let result = self.api.edit(self.post_id, comment_id, &text).await;
        let comment = self.report(result, "Comment updated", "Couldn't update your comment.")?;

        if let Some(stored) = self.comments.lock().iter_mut().find(|c| c.id == comment_id) {
            *stored = comment.clone();
        }
        Ok(comment)
    }

    #[instrument(skip(self), fields(post_id = %self.post_id))]
    pub async fn delete(&self, comment_id: Snowflake) -> ClientResult<()> {
        let result = self.api.delete(self.post_id, comment_id).await;
        self.report(result, "Comment deleted", "Couldn't delete the comment.")?;

        self.comments.lock().retain(|c| c.id != comment_id);
        Ok(())
    }

    fn checked(&self, text: &str) -> ClientResult<String> {
        normalize_text(text, Comment::MAX_TEXT_LEN).map_err(|e| {
            self.notifier.notify(Notification::warning(e.to_string()));
            e.into()
        })
    }

    fn report<T>(&self, result: ClientResult<T>, success: &str, failure: &str) -> ClientResult<T> {
        match result {
            Ok(value) => {
                self.notifier.notify(Notification::success(success));
                Ok(value)
            }
            Err(e) => {
                warn!(error = %e, "Comment request failed");
                self.notifier.notify(Notification::error(format!("{failure} {e}")));
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for CommentThread {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentThread")
            .field("post_id", &self.post_id)
            .field("comments", &self.comments.lock().len())
            .finish_non_exhaustive()
    }
}
