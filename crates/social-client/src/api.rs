//! Reaction transport
//!
//! [`ReactionApi`] is the seam between the controller and the network;
//! [`HttpReactionApi`] talks to the REST API with a bearer token.

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Deserialize;
use serde_json::json;
use social_core::{ReactionCounts, ReactionType, Snowflake};
use tracing::instrument;

use crate::error::ClientResult;
use crate::transport::Transport;

/// What a reaction is attached to, as addressed by the REST API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionTarget {
    Post(Snowflake),
    Comment {
        post_id: Snowflake,
        comment_id: Snowflake,
    },
}

impl ReactionTarget {
    /// Path of the target's reaction collection, relative to `/api/v1`
    pub fn reactions_path(&self) -> String {
        match self {
            Self::Post(id) => format!("/posts/{id}/reactions"),
            Self::Comment {
                post_id,
                comment_id,
            } => format!("/posts/{post_id}/comments/{comment_id}/reactions"),
        }
    }
}

impl fmt::Display for ReactionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Post(id) => write!(f, "post:{id}"),
            Self::Comment { comment_id, .. } => write!(f, "comment:{comment_id}"),
        }
    }
}

/// Server view of a subject's reactions
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RemoteSummary {
    pub counts: ReactionCounts,
    pub me: Option<ReactionType>,
}

#[async_trait]
pub trait ReactionApi: Send + Sync {
    async fn fetch(&self, target: ReactionTarget) -> ClientResult<RemoteSummary>;

    async fn set_reaction(
        &self,
        target: ReactionTarget,
        reaction_type: ReactionType,
    ) -> ClientResult<RemoteSummary>;

    async fn clear_reaction(&self, target: ReactionTarget) -> ClientResult<RemoteSummary>;
}

#[derive(Debug, Clone)]
pub struct HttpReactionApi {
    transport: Transport,
}

impl HttpReactionApi {
    /// `base_url` is the server root, e.g. `http://localhost:8080`
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

    /// Replace the bearer token after a refresh
    pub fn set_access_token(&mut self, access_token: impl Into<String>) {
        self.transport.set_access_token(access_token);
    }

    fn path(target: ReactionTarget, suffix: &str) -> String {
        format!("{}{}", target.reactions_path(), suffix)
    }
}

#[async_trait]
impl ReactionApi for HttpReactionApi {
    #[instrument(skip(self), fields(target = %target))]
    async fn fetch(&self, target: ReactionTarget) -> ClientResult<RemoteSummary> {
        let request = self.transport.request(Method::GET, &Self::path(target, ""));
        self.transport.send(request).await
    }

    #[instrument(skip(self), fields(target = %target))]
    async fn set_reaction(
        &self,
        target: ReactionTarget,
        reaction_type: ReactionType,
    ) -> ClientResult<RemoteSummary> {
        let request = self
            .transport
            .request(Method::PUT, &Self::path(target, "/@me"))
            .json(&json!({ "type": reaction_type }));
        self.transport.send(request).await
    }

    #[instrument(skip(self), fields(target = %target))]
    async fn clear_reaction(&self, target: ReactionTarget) -> ClientResult<RemoteSummary> {
        let request = self
            .transport
            .request(Method::DELETE, &Self::path(target, "/@me"));
        self.transport.send(request).await
    }
}
