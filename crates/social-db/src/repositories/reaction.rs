//! PostgreSQL implementation of ReactionRepository
//!
//! Writes run in a transaction that first takes a key-share lock on the
//! reacted-to post or comment, so a reaction can never outlive its subject:
//! subject deletes lock the same row for update and wait for us, or we find
//! the row gone. Toggles additionally lock the reacting user's row, which
//! serializes one user's read-decide-write cycles. Counts are computed with
//! `GROUP BY` on each read; there is no stored counter to drift.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use social_core::entities::Reaction;
use social_core::error::DomainError;
use social_core::reactions::next_reaction;
use social_core::traits::{ReactionRepository, RepoResult};
use social_core::value_objects::{ReactionCounts, ReactionType, Snowflake, Subject, SubjectKind};

use crate::mappers::{counts_by_subject, parse_reaction_type};
use crate::models::{ReactionCountModel, ReactionModel, UserReactionModel};

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn raw_ids(ids: &[Snowflake]) -> Vec<i64> {
    ids.iter().map(|id| id.into_inner()).collect()
}

fn lock_subject_sql(kind: SubjectKind) -> &'static str {
    match kind {
        SubjectKind::Post => "SELECT id FROM posts WHERE id = $1 FOR KEY SHARE",
        SubjectKind::Comment => "SELECT id FROM comments WHERE id = $1 FOR KEY SHARE",
    }
}

/// Hold the subject row until commit; not-found when it is gone
async fn lock_subject(conn: &mut PgConnection, subject: Subject) -> RepoResult<()> {
    let row = sqlx::query_scalar::<_, i64>(lock_subject_sql(subject.kind))
        .bind(subject.id.into_inner())
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_db_error)?;

    match row {
        Some(_) => Ok(()),
        None => Err(subject.not_found()),
    }
}

async fn write_reaction(conn: &mut PgConnection, reaction: &Reaction) -> RepoResult<()> {
    sqlx::query(
        r"
        INSERT INTO reactions (subject_kind, subject_id, user_id, reaction_type, created_at)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (subject_kind, subject_id, user_id)
        DO UPDATE SET reaction_type = EXCLUDED.reaction_type,
                      created_at = EXCLUDED.created_at
        ",
    )
    .bind(reaction.subject.kind.as_str())
    .bind(reaction.subject.id.into_inner())
    .bind(reaction.user_id.into_inner())
    .bind(reaction.reaction_type.as_str())
    .bind(reaction.created_at)
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self, subject), fields(subject = %subject))]
    async fn find(&self, subject: Subject, user_id: Snowflake) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r"
            SELECT subject_kind, subject_id, user_id, reaction_type, created_at
            FROM reactions
            WHERE subject_kind = $1 AND subject_id = $2 AND user_id = $3
            ",
        )
        .bind(subject.kind.as_str())
        .bind(subject.id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reaction::try_from).transpose()
    }

    #[instrument(skip(self, reaction), fields(subject = %reaction.subject, user_id = %reaction.user_id))]
    async fn upsert(&self, reaction: &Reaction) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        lock_subject(&mut *tx, reaction.subject).await?;
        write_reaction(&mut *tx, reaction).await?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, subject), fields(subject = %subject))]
    async fn toggle(
        &self,
        subject: Subject,
        user_id: Snowflake,
        requested: ReactionType,
    ) -> RepoResult<Option<ReactionType>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // NO KEY UPDATE leaves foreign-key checks against the user unblocked
        let user =
            sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE id = $1 FOR NO KEY UPDATE")
                .bind(user_id.into_inner())
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_db_error)?;
        if user.is_none() {
            return Err(DomainError::UserNotFound(user_id));
        }

        lock_subject(&mut *tx, subject).await?;

        let current = sqlx::query_scalar::<_, String>(
            r"
            SELECT reaction_type
            FROM reactions
            WHERE subject_kind = $1 AND subject_id = $2 AND user_id = $3
            FOR UPDATE
            ",
        )
        .bind(subject.kind.as_str())
        .bind(subject.id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .map(|raw| parse_reaction_type(&raw))
        .transpose()?;

        let next = next_reaction(current, requested);
        match next {
            Some(reaction_type) => {
                write_reaction(&mut *tx, &Reaction::new(subject, user_id, reaction_type)).await?;
            }
            None => {
                sqlx::query(
                    r"
                    DELETE FROM reactions
                    WHERE subject_kind = $1 AND subject_id = $2 AND user_id = $3
                    ",
                )
                .bind(subject.kind.as_str())
                .bind(subject.id.into_inner())
                .bind(user_id.into_inner())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            }
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(next)
    }

    #[instrument(skip(self, subject), fields(subject = %subject))]
    async fn delete(&self, subject: Subject, user_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM reactions
            WHERE subject_kind = $1 AND subject_id = $2 AND user_id = $3
            ",
        )
        .bind(subject.kind.as_str())
        .bind(subject.id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, subject), fields(subject = %subject))]
    async fn count_by_type(&self, subject: Subject) -> RepoResult<ReactionCounts> {
        let mut counts = self.count_many(subject.kind, &[subject.id]).await?;
        Ok(counts.remove(&subject.id).unwrap_or_default())
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn count_many(
        &self,
        kind: SubjectKind,
        ids: &[Snowflake],
    ) -> RepoResult<HashMap<Snowflake, ReactionCounts>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, ReactionCountModel>(
            r"
            SELECT subject_id, reaction_type, COUNT(*) AS count
            FROM reactions
            WHERE subject_kind = $1 AND subject_id = ANY($2)
            GROUP BY subject_id, reaction_type
            ",
        )
        .bind(kind.as_str())
        .bind(raw_ids(ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        counts_by_subject(rows)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_many_for_user(
        &self,
        kind: SubjectKind,
        ids: &[Snowflake],
        user_id: Snowflake,
    ) -> RepoResult<HashMap<Snowflake, ReactionType>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, UserReactionModel>(
            r"
            SELECT subject_id, reaction_type
            FROM reactions
            WHERE subject_kind = $1 AND subject_id = ANY($2) AND user_id = $3
            ",
        )
        .bind(kind.as_str())
        .bind(raw_ids(ids))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter()
            .map(|row| {
                parse_reaction_type(&row.reaction_type)
                    .map(|t| (Snowflake::new(row.subject_id), t))
            })
            .collect()
    }
}
