//! Post service
//!
//! Handles posts (create, read, feed, edit, delete) and the legacy like
//! toggle, which is a toggle of the `like` reaction type.

use social_core::entities::Post;
use social_core::traits::FeedQuery;
use social_core::{DomainError, ReactionSummary, Snowflake, Subject, SubjectKind, Viewer};
use tracing::{info, instrument};

use crate::dto::{
    CreatePostRequest, PaginatedResponse, PostResponse, PostWithDetails, UpdatePostRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::reaction::ReactionService;

/// Default and maximum feed page sizes
pub const DEFAULT_FEED_LIMIT: i64 = 20;
pub const MAX_FEED_LIMIT: i64 = 100;

pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request))]
    pub async fn create_post(
        &self,
        viewer: Viewer,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let author_id = viewer.require()?;
        let post = Post::new(
            self.ctx.generate_id(),
            author_id,
            &request.text,
            request.media_url,
        )?;

        self.ctx.post_repo().create(&post).await?;

        info!(post_id = %post.id, author_id = %author_id, "Post created");

        let author = self.ctx.user_repo().find_by_id(author_id).await?;
        Ok(PostWithDetails {
            post,
            author,
            comment_count: 0,
            reactions: ReactionSummary::default(),
        }
        .into())
    }

    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: Snowflake, viewer: Viewer) -> ServiceResult<PostResponse> {
        let post = self.find_post(post_id).await?;
        self.with_details_one(post, viewer).await
    }

    /// Newest posts first; `before` is the id of the last post already seen
    #[instrument(skip(self))]
    pub async fn list_feed(
        &self,
        viewer: Viewer,
        before: Option<Snowflake>,
        author_id: Option<Snowflake>,
        limit: Option<i64>,
    ) -> ServiceResult<PaginatedResponse<PostResponse>> {
        let limit = limit.unwrap_or(DEFAULT_FEED_LIMIT).clamp(1, MAX_FEED_LIMIT);

        let posts = self
            .ctx
            .post_repo()
            .find_feed(FeedQuery {
                before,
                author_id,
                limit,
            })
            .await?;

        let has_more = posts.len() as i64 == limit;
        let next = posts.last().map(|p| p.id.to_string());
        let data = self.with_details(posts, viewer).await?;

        Ok(PaginatedResponse::new(data, next, has_more, limit))
    }

    /// Posts by one user, newest first
    #[instrument(skip(self))]
    pub async fn list_user_posts(
        &self,
        user_id: Snowflake,
        viewer: Viewer,
        before: Option<Snowflake>,
        limit: Option<i64>,
    ) -> ServiceResult<PaginatedResponse<PostResponse>> {
        if self.ctx.user_repo().find_by_id(user_id).await?.is_none() {
            return Err(DomainError::UserNotFound(user_id).into());
        }
        self.list_feed(viewer, before, Some(user_id), limit).await
    }

    #[instrument(skip(self, request))]
    pub async fn edit_post(
        &self,
        post_id: Snowflake,
        viewer: Viewer,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let user_id = viewer.require()?;
        let mut post = self.find_post(post_id).await?;

        post.edit(user_id, &request.text)?;
        self.ctx.post_repo().update(&post).await?;

        info!(post_id = %post_id, "Post edited");

        self.with_details_one(post, viewer).await
    }

    /// Delete a post with its comments and every reaction on either
    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_id: Snowflake, viewer: Viewer) -> ServiceResult<()> {
        let user_id = viewer.require()?;
        let post = self.find_post(post_id).await?;
        post.ensure_author(user_id)?;

        self.ctx.post_repo().delete(post_id).await?;

        info!(post_id = %post_id, "Post deleted");
        Ok(())
    }

    /// Legacy like endpoint
    #[instrument(skip(self))]
    pub async fn toggle_like(
        &self,
        post_id: Snowflake,
        viewer: Viewer,
    ) -> ServiceResult<ReactionSummary> {
        ReactionService::new(self.ctx)
            .toggle_reaction(Subject::post(post_id), viewer, "like")
            .await
    }

    async fn find_post(&self, post_id: Snowflake) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| Subject::post(post_id).not_found().into())
    }

    async fn with_details_one(&self, post: Post, viewer: Viewer) -> ServiceResult<PostResponse> {
        self.with_details(vec![post], viewer)
            .await?
            .pop()
            .ok_or_else(|| ServiceError::internal("post details missing"))
    }

    /// Attach authors, comment counts and reaction summaries, keeping input order
    async fn with_details(
        &self,
        posts: Vec<Post>,
        viewer: Viewer,
    ) -> ServiceResult<Vec<PostResponse>> {
        let ids: Vec<Snowflake> = posts.iter().map(|p| p.id).collect();
        let author_ids: Vec<Snowflake> = posts.iter().map(|p| p.author_id).collect();
        let authors = self.ctx.user_repo().find_many(&author_ids).await?;
        let comment_counts = self.ctx.comment_repo().count_by_posts(&ids).await?;
        let mut summaries = ReactionService::new(self.ctx)
            .summaries(SubjectKind::Post, &ids, viewer)
            .await?;

        Ok(posts
            .into_iter()
            .map(|post| {
                let comment_count = comment_counts.get(&post.id).copied().unwrap_or(0);
                let reactions = summaries
                    .remove(&post.id)
                    .unwrap_or_default();
                let author = authors.get(&post.author_id).cloned();
                PostResponse::from(PostWithDetails {
                    post,
                    author,
                    comment_count,
                    reactions,
                })
            })
            .collect())
    }
}
