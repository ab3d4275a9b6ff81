//! Reaction service
//!
//! Reads and writes the single reaction each user may hold on a post or
//! comment. Writes go through the repository, which checks the subject still
//! exists and decides toggles atomically. The counts returned afterwards are
//! recomputed from the stored records.

use std::collections::HashMap;

use social_core::entities::Reaction;
use social_core::{
    ReactionCounts, ReactionSummary, ReactionType, Snowflake, Subject, SubjectKind,
    Viewer,
};
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Subject for a comment addressed through its post
    ///
    /// A comment that exists under a different post is reported as missing.
    #[instrument(skip(self))]
    pub async fn comment_subject(
        &self,
        post_id: Snowflake,
        comment_id: Snowflake,
    ) -> ServiceResult<Subject> {
        let subject = Subject::comment(comment_id);
        match self.ctx.comment_repo().find_by_id(comment_id).await? {
            Some(comment) if comment.post_id == post_id => Ok(subject),
            _ => Err(subject.not_found().into()),
        }
    }

    /// The viewer's current reaction on `subject`, if any
    #[instrument(skip(self, subject), fields(subject = %subject))]
    pub async fn get_reaction(
        &self,
        subject: Subject,
        user_id: Snowflake,
    ) -> ServiceResult<Option<ReactionType>> {
        let reaction = self.ctx.reaction_repo().find(subject, user_id).await?;
        Ok(reaction.map(|r| r.reaction_type))
    }

    #[instrument(skip(self, subject), fields(subject = %subject))]
    pub async fn get_counts(&self, subject: Subject) -> ServiceResult<ReactionCounts> {
        self.ensure_exists(subject).await?;
        Ok(self.ctx.reaction_repo().count_by_type(subject).await?)
    }

    /// Counts, total, breakdown and the viewer's own reaction
    #[instrument(skip(self, subject), fields(subject = %subject))]
    pub async fn summary(&self, subject: Subject, viewer: Viewer) -> ServiceResult<ReactionSummary> {
        self.ensure_exists(subject).await?;
        self.load_summary(subject, viewer).await
    }

    /// Set the viewer's reaction, replacing any previous one
    #[instrument(skip(self, subject), fields(subject = %subject))]
    pub async fn set_reaction(
        &self,
        subject: Subject,
        viewer: Viewer,
        reaction_type: &str,
    ) -> ServiceResult<ReactionSummary> {
        let user_id = viewer.require()?;
        let reaction_type: ReactionType = reaction_type.parse()?;

        self.ctx
            .reaction_repo()
            .upsert(&Reaction::new(subject, user_id, reaction_type))
            .await?;

        info!(subject = %subject, user_id = %user_id, reaction = %reaction_type, "Reaction set");

        self.load_summary(subject, viewer).await
    }

    /// Remove the viewer's reaction; removing an absent one is a no-op
    #[instrument(skip(self, subject), fields(subject = %subject))]
    pub async fn clear_reaction(
        &self,
        subject: Subject,
        viewer: Viewer,
    ) -> ServiceResult<ReactionSummary> {
        let user_id = viewer.require()?;
        self.ensure_exists(subject).await?;

        if self.ctx.reaction_repo().delete(subject, user_id).await? {
            info!(subject = %subject, user_id = %user_id, "Reaction cleared");
        }

        self.load_summary(subject, viewer).await
    }

    /// Same type removes, another type replaces, nothing sets
    #[instrument(skip(self, subject), fields(subject = %subject))]
    pub async fn toggle_reaction(
        &self,
        subject: Subject,
        viewer: Viewer,
        reaction_type: &str,
    ) -> ServiceResult<ReactionSummary> {
        let user_id = viewer.require()?;
        let requested: ReactionType = reaction_type.parse()?;

        let next = self
            .ctx
            .reaction_repo()
            .toggle(subject, user_id, requested)
            .await?;
        match next {
            Some(reaction_type) => {
                info!(subject = %subject, user_id = %user_id, reaction = %reaction_type, "Reaction toggled on");
            }
            None => info!(subject = %subject, user_id = %user_id, "Reaction toggled off"),
        }

        self.load_summary(subject, viewer).await
    }

    /// Summaries for many subjects of one kind in two queries
    ///
    /// Every id gets an entry, empty when nobody reacted.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn summaries(
        &self,
        kind: SubjectKind,
        ids: &[Snowflake],
        viewer: Viewer,
    ) -> ServiceResult<HashMap<Snowflake, ReactionSummary>> {
        let mut counts = self.ctx.reaction_repo().count_many(kind, ids).await?;
        let mine = match viewer.user_id() {
            Some(user_id) => {
                self.ctx
                    .reaction_repo()
                    .find_many_for_user(kind, ids, user_id)
                    .await?
            }
            None => HashMap::new(),
        };

        Ok(ids
            .iter()
            .map(|id| {
                let summary =
                    ReactionSummary::new(counts.remove(id).unwrap_or_default(), mine.get(id).copied());
                (*id, summary)
            })
            .collect())
    }

    async fn load_summary(&self, subject: Subject, viewer: Viewer) -> ServiceResult<ReactionSummary> {
        let counts = self.ctx.reaction_repo().count_by_type(subject).await?;
        let me = match viewer.user_id() {
            Some(user_id) => self.get_reaction(subject, user_id).await?,
            None => None,
        };
        Ok(ReactionSummary::new(counts, me))
    }

    async fn ensure_exists(&self, subject: Subject) -> ServiceResult<()> {
        let exists = match subject.kind {
            SubjectKind::Post => self.ctx.post_repo().find_by_id(subject.id).await?.is_some(),
            SubjectKind::Comment => self
                .ctx
                .comment_repo()
                .find_by_id(subject.id)
                .await?
                .is_some(),
        };
        if exists {
            Ok(())
        } else {
            Err(subject.not_found().into())
        }
    }
}
