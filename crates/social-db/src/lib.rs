//! # social-db
//!
//! Database layer implementing the social-core repository traits with
//! PostgreSQL via SQLx.
//!
//! - Connection pool management and runtime migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! ```rust,ignore
//! use social_common::AppConfig;
//! use social_db::{connect, PgUserRepository};
//!
//! let config = AppConfig::from_env()?;
//! let pool = connect(&config.database).await?;
//! let users = PgUserRepository::new(pool);
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{connect, create_pool, ping, run_migrations, PgPool};
pub use repositories::{
    PgCommentRepository, PgPostRepository, PgReactionRepository, PgUserRepository,
};
