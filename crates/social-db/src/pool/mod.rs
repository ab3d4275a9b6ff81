//! Database connection pool and schema migrations

mod postgres;

pub use postgres::{connect, create_pool, ping, run_migrations};

pub use sqlx::postgres::PgPool;
