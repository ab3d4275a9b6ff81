//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::Post;
use social_core::error::DomainError;
use social_core::traits::{FeedQuery, PostRepository, RepoResult};
use social_core::value_objects::Snowflake;

use crate::models::PostModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, author_id, text, media_url, created_at, updated_at
            FROM posts
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn find_feed(&self, query: FeedQuery) -> RepoResult<Vec<Post>> {
        let limit = query.limit.clamp(1, 100);

        // Snowflake ids are time-ordered, so id order is creation order
        let results = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, author_id, text, media_url, created_at, updated_at
            FROM posts
            WHERE ($1::BIGINT IS NULL OR id < $1)
              AND ($2::BIGINT IS NULL OR author_id = $2)
            ORDER BY id DESC
            LIMIT $3
            ",
        )
        .bind(query.before.map(Snowflake::into_inner))
        .bind(query.author_id.map(Snowflake::into_inner))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO posts (id, author_id, text, media_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(post.id.into_inner())
        .bind(post.author_id.into_inner())
        .bind(&post.text)
        .bind(post.media_url.as_deref())
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn update(&self, post: &Post) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE posts
            SET text = $2, media_url = $3, updated_at = $4
            WHERE id = $1
            ",
        )
        .bind(post.id.into_inner())
        .bind(&post.text)
        .bind(post.media_url.as_deref())
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(post.id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Wait out reaction writes holding key-share locks on the post or its comments
        let locked = sqlx::query_scalar::<_, i64>("SELECT id FROM posts WHERE id = $1 FOR UPDATE")
            .bind(id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?;
        if locked.is_none() {
            return Err(DomainError::PostNotFound(id));
        }
        sqlx::query("SELECT id FROM comments WHERE post_id = $1 FOR UPDATE")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        sqlx::query(
            r"
            DELETE FROM reactions
            WHERE (subject_kind = 'post' AND subject_id = $1)
               OR (subject_kind = 'comment'
                   AND subject_id IN (SELECT id FROM comments WHERE post_id = $1))
            ",
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query("DELETE FROM comments WHERE post_id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls it back
            return Err(DomainError::PostNotFound(id));
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }
}
