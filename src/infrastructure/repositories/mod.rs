// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_activity;
mod postgres_article;
mod postgres_ledger;
mod postgres_movement;
mod postgres_stock_request;
mod postgres_user;

use std::sync::Arc;

use sqlx::PgPool;

use crate::application::services::Repositories;

pub use error::map_sqlx;
pub use postgres_activity::PostgresActivityLogRepository;
pub use postgres_article::{PostgresArticleReadRepository, PostgresArticleWriteRepository};
pub use postgres_ledger::PostgresStockLedger;
pub use postgres_movement::PostgresMovementRepository;
pub use postgres_stock_request::PostgresStockRequestRepository;
pub use postgres_user::PostgresUserRepository;

/// Wire every storage port against one pool.
pub fn postgres_repositories(pool: PgPool, lock_timeout_ms: u64) -> Repositories {
    Repositories {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        article_write: Arc::new(PostgresArticleWriteRepository::new(pool.clone())),
        article_read: Arc::new(PostgresArticleReadRepository::new(pool.clone())),
        requests: Arc::new(PostgresStockRequestRepository::new(pool.clone())),
        movements: Arc::new(PostgresMovementRepository::new(pool.clone())),
        activity: Arc::new(PostgresActivityLogRepository::new(pool.clone())),
        ledger: Arc::new(PostgresStockLedger::new(pool, lock_timeout_ms)),
    }
}
