//! Comment service
//!
//! Comment threads under a post: add, edit, delete and list. Comments are
//! returned in insertion order, each with its reaction summary.

use social_core::entities::{Comment, Post};
use social_core::{ReactionSummary, Snowflake, Subject, SubjectKind, Viewer};
use tracing::{info, instrument, warn};

use crate::dto::{CommentResponse, CommentWithReactions, CreateCommentRequest, UpdateCommentRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::reaction::ReactionService;

pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add a comment to a post
    ///
    /// Text is trimmed, then must be 1 to 500 characters.
    #[instrument(skip(self, request))]
    pub async fn add_comment(
        &self,
        post_id: Snowflake,
        viewer: Viewer,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let author_id = viewer.require()?;
        let comment = Comment::new(self.ctx.generate_id(), post_id, author_id, &request.text)?;
        self.find_post(post_id).await?;

        self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %comment.id, post_id = %post_id, author_id = %author_id, "Comment added");

        let author = self.ctx.user_repo().find_by_id(author_id).await?;
        Ok(CommentWithReactions {
            comment,
            author,
            reactions: ReactionSummary::default(),
        }
        .into())
    }

    /// Replace a comment's text; only its author may
    #[instrument(skip(self, request))]
    pub async fn edit_comment(
        &self,
        post_id: Snowflake,
        comment_id: Snowflake,
        viewer: Viewer,
        request: UpdateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let user_id = viewer.require()?;
        let mut comment = self.find_comment(post_id, comment_id).await?;

        comment.edit(user_id, &request.text)?;
        self.ctx.comment_repo().update(&comment).await?;

        info!(comment_id = %comment_id, post_id = %post_id, "Comment edited");

        let reactions = ReactionService::new(self.ctx)
            .summary(Subject::comment(comment_id), viewer)
            .await?;
        let author = self.ctx.user_repo().find_by_id(comment.author_id).await?;
        Ok(CommentWithReactions {
            comment,
            author,
            reactions,
        }
        .into())
    }

    /// Delete a comment and its reactions
    ///
    /// Allowed for the comment author and for the author of the post.
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        post_id: Snowflake,
        comment_id: Snowflake,
        viewer: Viewer,
    ) -> ServiceResult<()> {
        let user_id = viewer.require()?;
        let post = self.find_post(post_id).await?;
        let comment = self.find_comment(post_id, comment_id).await?;

        if let Err(e) = comment.ensure_can_delete(user_id, post.author_id) {
            warn!(comment_id = %comment_id, user_id = %user_id, "Comment delete refused");
            return Err(e.into());
        }

        self.ctx.comment_repo().delete(comment_id).await?;

        info!(comment_id = %comment_id, post_id = %post_id, "Comment deleted");
        Ok(())
    }

    /// Comments of a post, oldest first
    #[instrument(skip(self))]
    pub async fn list_comments(
        &self,
        post_id: Snowflake,
        viewer: Viewer,
    ) -> ServiceResult<Vec<CommentResponse>> {
        self.find_post(post_id).await?;

        let comments = self.ctx.comment_repo().find_by_post(post_id).await?;
        let ids: Vec<Snowflake> = comments.iter().map(|c| c.id).collect();
        let author_ids: Vec<Snowflake> = comments.iter().map(|c| c.author_id).collect();
        let authors = self.ctx.user_repo().find_many(&author_ids).await?;
        let mut summaries = ReactionService::new(self.ctx)
            .summaries(SubjectKind::Comment, &ids, viewer)
            .await?;

        Ok(comments
            .into_iter()
            .map(|comment| {
                let reactions = summaries.remove(&comment.id).unwrap_or_default();
                let author = authors.get(&comment.author_id).cloned();
                CommentResponse::from(CommentWithReactions {
                    comment,
                    author,
                    reactions,
                })
            })
            .collect())
    }

    async fn find_post(&self, post_id: Snowflake) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| Subject::post(post_id).not_found().into())
    }

    async fn find_comment(&self, post_id: Snowflake, comment_id: Snowflake) -> ServiceResult<Comment> {
        match self.ctx.comment_repo().find_by_id(comment_id).await? {
            Some(comment) if comment.post_id == post_id => Ok(comment),
            _ => Err(Subject::comment(comment_id).not_found().into()),
        }
    }
}
