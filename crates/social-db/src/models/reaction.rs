//! Reaction rows and aggregate query results

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the `reactions` table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub subject_kind: String,
    pub subject_id: i64,
    pub user_id: i64,
    pub reaction_type: String,
    pub created_at: DateTime<Utc>,
}

/// `GROUP BY subject_id, reaction_type` result
#[derive(Debug, Clone, FromRow)]
pub struct ReactionCountModel {
    pub subject_id: i64,
    pub reaction_type: String,
    pub count: i64,
}

/// One user's reaction on one of several subjects
#[derive(Debug, Clone, FromRow)]
pub struct UserReactionModel {
    pub subject_id: i64,
    pub reaction_type: String,
}
