//! Relational persistence for notice records.
//!
//! One explicit [`Database`] handle is constructed at startup and passed to
//! every component that touches the store; there is no ambient connection
//! registry. Each existence check and each insert acquires a pooled
//! connection for just that operation and releases it on every exit path.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::Result;
use crate::models::NoticeRecord;
use crate::utils::time;

/// One-time provisioning DDL. Not part of the recurring pipeline.
///
/// `(post_id, category)` is the natural dedup key; the UNIQUE constraint
/// turns the gate's benign read/write race into a rejected second insert.
const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS post (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    post_id TEXT NOT NULL,
    title TEXT NOT NULL,
    department TEXT NOT NULL,
    author TEXT NOT NULL,
    text TEXT NOT NULL,
    date TEXT NOT NULL,
    find_at TEXT NOT NULL,
    url TEXT NOT NULL,
    category TEXT NOT NULL,
    important INTEGER NOT NULL DEFAULT 0,
    UNIQUE (post_id, category)
)";

/// Handle to the persistence store.
///
/// Cloning is cheap; the inner pool is reference-counted.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the store and verify it is reachable.
    ///
    /// A failed probe here is process-fatal by design: the poller has no
    /// degraded mode without storage.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.ping().await?;
        Ok(db)
    }

    /// Open an in-memory store — useful for testing.
    ///
    /// Capped at one connection: every pooled connection would otherwise
    /// see its own private in-memory database.
    pub async fn open_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Access the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Create the post table if absent. One-time setup action.
    pub async fn provision(&self) -> Result<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Check whether a record with this `(post_id, category)` pair exists.
    pub async fn exists(&self, post_id: &str, category: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM post WHERE post_id = ? AND category = ? LIMIT 1")
            .bind(post_id)
            .bind(category)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Insert one new record and commit.
    ///
    /// No existence check is performed here; the dedup gate has already
    /// filtered, and the UNIQUE constraint rejects the losing side of an
    /// overlapping-cycle race. The transaction rolls back on drop if the
    /// commit is never reached.
    pub async fn insert(&self, record: &NoticeRecord) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO post \
             (post_id, title, department, author, text, date, find_at, url, category, important) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.post_id)
        .bind(&record.title)
        .bind(&record.department)
        .bind(&record.author)
        .bind(&record.text)
        .bind(time::format(&record.date, false))
        .bind(time::format(&record.find_at, false))
        .bind(&record.url)
        .bind(&record.category)
        .bind(record.important)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(())
    }
}
