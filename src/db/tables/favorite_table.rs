//! Favorite table operations

use anyhow::Result;
use sqlx::FromRow;

use crate::db::DbEngine;
use crate::models::Favorite;

/// Joined favorite row with the concert's public identifier
#[derive(Debug, FromRow)]
struct FavoriteRow {
    id: i64,
    concertid: i64,
    cid: String,
    userid: i64,
    timestamp: i64,
}

impl FavoriteRow {
    fn into_favorite(self) -> Favorite {
        Favorite {
            id: self.id,
            concertid: self.concertid,
            cid: self.cid,
            userid: self.userid,
            timestamp: self.timestamp,
        }
    }
}

/// Favorite table operations
pub struct FavoriteTable;

impl FavoriteTable {
    /// Get all favorites for a user, newest first
    pub async fn all(userid: i64) -> Result<Vec<Favorite>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let rows: Vec<FavoriteRow> = sqlx::query_as(
            "SELECT favorite.id, favorite.concertid, concert.cid,
                    favorite.userid, favorite.timestamp
             FROM favorite
             JOIN concert ON concert.id = favorite.concertid
             WHERE favorite.userid = ?
             ORDER BY favorite.timestamp DESC",
        )
        .bind(userid)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_favorite()).collect())
    }

    /// Add a favorite. Idempotent: re-adding an existing pair is a no-op.
    pub async fn add(concertid: i64, userid: i64) -> Result<()> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let timestamp = chrono::Utc::now().timestamp();

        sqlx::query(
            "INSERT OR IGNORE INTO favorite (userid, concertid, timestamp) VALUES (?, ?, ?)",
        )
        .bind(userid)
        .bind(concertid)
        .bind(timestamp)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Remove a favorite. No-op when the pair is absent.
    pub async fn remove(concertid: i64, userid: i64) -> Result<bool> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let result = sqlx::query("DELETE FROM favorite WHERE userid = ? AND concertid = ?")
            .bind(userid)
            .bind(concertid)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check if a (user, concert) pair is favorited
    pub async fn exists(concertid: i64, userid: i64) -> Result<bool> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM favorite WHERE userid = ? AND concertid = ?")
                .bind(userid)
                .bind(concertid)
                .fetch_one(pool)
                .await?;

        Ok(row.0 > 0)
    }
}
