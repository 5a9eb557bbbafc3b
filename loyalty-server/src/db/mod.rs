//! Database Module
//!
//! Handles SQLite connection pool and migrations

pub mod repository;

use crate::utils::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::str::FromStr;

/// 内存数据库路径标记
pub const IN_MEMORY: &str = ":memory:";

/// Database service — owns a SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Create a new database service.
    ///
    /// File-backed databases use WAL mode with foreign keys enforced.
    /// `":memory:"` selects the in-memory backend, pinned to a single
    /// pooled connection so the database lives as long as the pool.
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let pool = if db_path == IN_MEMORY {
            let options = SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| AppError::database(format!("Invalid database options: {e}")))?
                .pragma("foreign_keys", "ON");

            // 内存库绑定在单个连接上: 连接关闭 = 数据丢失
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await
                .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?
        } else {
            // Build connection options: WAL, foreign keys, normal sync
            let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
                .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("foreign_keys", "ON");

            let pool = SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await
                .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

            // busy_timeout: 写冲突时等待 5s 而非立即失败
            sqlx::query("PRAGMA busy_timeout = 5000;")
                .execute(&pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to set busy_timeout: {e}")))?;

            pool
        };

        tracing::info!(path = db_path, "Database connection established");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }

    /// In-memory database, used by tests and the default configuration
    pub async fn in_memory() -> Result<Self, AppError> {
        Self::new(IN_MEMORY).await
    }
}
