//! Database engine and connection management

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;

use crate::config::Paths;

static DB_ENGINE: OnceCell<Arc<DbEngine>> = OnceCell::new();

/// Database engine wrapper
pub struct DbEngine {
    pool: SqlitePool,
}

impl DbEngine {
    /// Get the global database engine instance
    pub fn get() -> Result<Arc<DbEngine>> {
        DB_ENGINE
            .get()
            .map(Arc::clone)
            .context("Database not initialized")
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Setup the SQLite database
pub async fn setup_sqlite() -> Result<()> {
    let paths = Paths::get()?;
    let db_path = paths.app_db_path();

    // Create connection options with SQLite pragmas
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30))
        .pragma("cache_size", "10000")
        .pragma("foreign_keys", "ON");

    // Create connection pool
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    let engine = DbEngine { pool };

    DB_ENGINE
        .set(Arc::new(engine))
        .map_err(|_| anyhow::anyhow!("Database already initialized"))?;

    create_tables().await?;

    Ok(())
}

/// Create all database tables
async fn create_tables() -> Result<()> {
    let engine = DbEngine::get()?;
    let pool = engine.pool();

    // User table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            image TEXT,
            password TEXT NOT NULL,
            username TEXT NOT NULL,
            roles TEXT NOT NULL DEFAULT '["user"]',
            extra TEXT DEFAULT '{}'
        );
        CREATE UNIQUE INDEX IF NOT EXISTS idx_user_username ON user(username);
        "#,
    )
    .execute(pool)
    .await?;

    // Artist table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artist (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            artisthash TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            genre TEXT,
            image TEXT,
            bio TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_artist_artisthash ON artist(artisthash);
        "#,
    )
    .execute(pool)
    .await?;

    // Venue table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS venue (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            city TEXT NOT NULL,
            country TEXT NOT NULL DEFAULT '',
            capacity INTEGER
        );
        CREATE INDEX IF NOT EXISTS idx_venue_name_city ON venue(name, city);
        "#,
    )
    .execute(pool)
    .await?;

    // Tour table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tour (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            artistid INTEGER NOT NULL,
            name TEXT NOT NULL,
            year INTEGER,
            FOREIGN KEY (artistid) REFERENCES artist(id) ON DELETE CASCADE
        );
        CREATE INDEX IF NOT EXISTS idx_tour_artistid ON tour(artistid);
        "#,
    )
    .execute(pool)
    .await?;

    // Concert table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS concert (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            cid TEXT NOT NULL UNIQUE,
            artistid INTEGER NOT NULL,
            tourid INTEGER NOT NULL,
            venueid INTEGER NOT NULL,
            date TEXT NOT NULL,
            price REAL NOT NULL DEFAULT 0,
            image TEXT,
            FOREIGN KEY (artistid) REFERENCES artist(id) ON DELETE CASCADE,
            FOREIGN KEY (tourid) REFERENCES tour(id) ON DELETE CASCADE,
            FOREIGN KEY (venueid) REFERENCES venue(id) ON DELETE CASCADE
        );
        CREATE INDEX IF NOT EXISTS idx_concert_cid ON concert(cid);
        CREATE INDEX IF NOT EXISTS idx_concert_artistid ON concert(artistid);
        CREATE INDEX IF NOT EXISTS idx_concert_date ON concert(date);
        "#,
    )
    .execute(pool)
    .await?;

    // Review table: one row per (user, concert) pair
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS review (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            userid INTEGER NOT NULL,
            concertid INTEGER NOT NULL,
            rating INTEGER,
            text TEXT,
            timestamp INTEGER NOT NULL,
            FOREIGN KEY (userid) REFERENCES user(id) ON DELETE CASCADE,
            FOREIGN KEY (concertid) REFERENCES concert(id) ON DELETE CASCADE
        );
        CREATE UNIQUE INDEX IF NOT EXISTS idx_review_user_concert ON review(userid, concertid);
        CREATE INDEX IF NOT EXISTS idx_review_concertid ON review(concertid);
        "#,
    )
    .execute(pool)
    .await?;

    // Favorites table: one row per (user, concert) pair
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS favorite (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            userid INTEGER NOT NULL,
            concertid INTEGER NOT NULL,
            timestamp INTEGER NOT NULL,
            FOREIGN KEY (userid) REFERENCES user(id) ON DELETE CASCADE,
            FOREIGN KEY (concertid) REFERENCES concert(id) ON DELETE CASCADE
        );
        CREATE UNIQUE INDEX IF NOT EXISTS idx_favorite_user_concert ON favorite(userid, concertid);
        CREATE INDEX IF NOT EXISTS idx_favorite_userid ON favorite(userid);
        "#,
    )
    .execute(pool)
    .await?;

    // Migration table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dbmigration (
            id INTEGER PRIMARY KEY,
            version INTEGER NOT NULL DEFAULT 0
        );
        INSERT OR IGNORE INTO dbmigration (id, version) VALUES (1, 0);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
