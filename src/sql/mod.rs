//! SQLite database operations for superheroes.
//!
//! This module provides functions for interacting with the database, organized by table.
//! Every operation takes an open transaction; callers decide when to commit.

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::DataStoreError;

/// Hero operations.
pub mod hero;

/// Power operations, including the validated description update.
pub mod power;

/// Hero-power association operations and relationship traversal.
pub mod hero_power;

/// Result type for database operations.
pub type SqlResult<T> = Result<T, DataStoreError>;

/// Migrations embedded at compile time from the `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// How long a connection waits on another connection's write lock before giving up.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a connection pool for `database_url`.
///
/// Foreign keys are always enforced so that deletes cascade to `hero_powers`.  The
/// database file is created when it does not exist and is put in WAL mode, so readers
/// never block the single writer.  In-memory databases are limited to a single
/// long-lived connection because every SQLite connection to `:memory:` sees its own
/// private database.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .connect_with(options.journal_mode(SqliteJournalMode::Wal))
            .await?
    };

    Ok(pool)
}

/// Begins a transaction that holds the write lock from its first statement.
///
/// A deferred transaction that reads before it writes cannot upgrade its lock while
/// another connection is writing, and SQLite fails it without consulting the busy
/// timeout.  `BEGIN IMMEDIATE` queues for the lock up front instead, so concurrent
/// writers are serialized.
pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

/// Opens a connection pool for `database_url` and applies all pending migrations.
pub async fn open(database_url: &str) -> Result<SqlitePool, Box<dyn std::error::Error>> {
    let pool = connect(database_url).await?;
    MIGRATOR.run(&pool).await?;
    Ok(pool)
}

/// Opens a fresh, migrated, private in-memory database.
///
/// Every call returns an isolated database, which makes it suitable for tests.
pub async fn open_in_memory() -> Result<SqlitePool, Box<dyn std::error::Error>> {
    open("sqlite::memory:").await
}

#[cfg(test)]
/// Test utilities for database operations.
pub mod tests {
    use std::time::Duration;

    use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
    use sqlx::{Connection, SqlitePool};

    use crate::DataStoreError;

    /// Creates a unique, fully migrated test database for each test invocation.
    pub async fn setup_test_db() -> SqlitePool {
        super::open_in_memory()
            .await
            .expect("Failed to set up test database")
    }

    #[tokio::test]
    async fn migrations_create_all_tables() {
        let pool = setup_test_db().await;
        let tables: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT name
            FROM sqlite_master
            WHERE type = 'table' AND name NOT LIKE 'sqlite%' AND name != '_sqlx_migrations'
            ORDER BY name
            "#,
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(tables, vec!["hero_powers", "heroes", "powers"]);
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let pool = setup_test_db().await;
        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[tokio::test]
    async fn in_memory_databases_are_isolated() {
        let first = setup_test_db().await;
        let second = setup_test_db().await;

        sqlx::query("INSERT INTO heroes (name, super_name) VALUES ('Kamala Khan', 'Ms. Marvel')")
            .execute(&first)
            .await
            .unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM heroes")
            .fetch_one(&second)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn file_databases_use_wal() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("heroes.db").display());
        let pool = super::open(&url).await.unwrap();

        let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(mode, "wal");
    }

    #[tokio::test]
    async fn lock_contention_is_a_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heroes.db");
        let pool = super::open(&format!("sqlite://{}", path.display()))
            .await
            .unwrap();

        let mut writer = super::begin_write(&pool).await.unwrap();
        sqlx::query("INSERT INTO heroes (name, super_name) VALUES ('Ororo Munroe', 'Storm')")
            .execute(&mut *writer)
            .await
            .unwrap();

        let impatient = SqliteConnectOptions::new()
            .filename(&path)
            .busy_timeout(Duration::ZERO);
        let mut other = SqliteConnection::connect_with(&impatient).await.unwrap();
        let err = sqlx::query("BEGIN IMMEDIATE")
            .execute(&mut other)
            .await
            .unwrap_err();
        assert!(matches!(
            DataStoreError::from(err),
            DataStoreError::Conflict(_)
        ));

        writer.commit().await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM heroes")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
