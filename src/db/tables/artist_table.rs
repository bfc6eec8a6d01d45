//! Artist table operations

use anyhow::Result;
use sqlx::FromRow;

use crate::db::DbEngine;
use crate::models::Artist;

/// Database row for artist table
#[derive(Debug, FromRow)]
struct ArtistRow {
    id: i64,
    artisthash: String,
    name: String,
    genre: Option<String>,
    image: Option<String>,
    bio: Option<String>,
}

impl ArtistRow {
    fn into_artist(self) -> Artist {
        Artist {
            id: self.id,
            artisthash: self.artisthash,
            name: self.name,
            genre: self.genre,
            image: self.image,
            bio: self.bio,
        }
    }
}

/// Artist table operations
pub struct ArtistTable;

impl ArtistTable {
    /// Get all artists
    pub async fn all() -> Result<Vec<Artist>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let rows: Vec<ArtistRow> = sqlx::query_as("SELECT * FROM artist ORDER BY name")
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into_artist()).collect())
    }

    /// Get artist by public hash
    pub async fn get_by_hash(artisthash: &str) -> Result<Option<Artist>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let row: Option<ArtistRow> = sqlx::query_as("SELECT * FROM artist WHERE artisthash = ?")
            .bind(artisthash)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(|r| r.into_artist()))
    }

    /// Get artist by database ID
    pub async fn get_by_id(id: i64) -> Result<Option<Artist>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let row: Option<ArtistRow> = sqlx::query_as("SELECT * FROM artist WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(|r| r.into_artist()))
    }

    /// Insert an artist
    pub async fn insert(artist: &Artist) -> Result<i64> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let result = sqlx::query(
            "INSERT INTO artist (artisthash, name, genre, image, bio) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&artist.artisthash)
        .bind(&artist.name)
        .bind(&artist.genre)
        .bind(&artist.image)
        .bind(&artist.bio)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }
}
