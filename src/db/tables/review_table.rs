//! Review table operations
//!
//! One review row per (user, concert) pair. Rating and text writes upsert
//! against that pair inside a transaction: find the existing row, update it,
//! or insert a fresh one; a failed statement rolls the unit back.

use anyhow::Result;
use sqlx::FromRow;

use crate::db::DbEngine;
use crate::models::Review;

/// Joined review row: review columns plus tour and reviewer names
#[derive(Debug, FromRow)]
struct ReviewRow {
    id: i64,
    userid: i64,
    concertid: i64,
    rating: Option<i64>,
    text: Option<String>,
    timestamp: i64,
    tour: String,
    username: String,
}

impl ReviewRow {
    fn into_review(self) -> Review {
        Review {
            id: self.id,
            userid: self.userid,
            concertid: self.concertid,
            rating: self.rating.map(|r| r as f64),
            text: self.text,
            timestamp: self.timestamp,
            tour: self.tour,
            username: self.username,
        }
    }
}

const REVIEW_SELECT: &str = "
    SELECT review.id, review.userid, review.concertid, review.rating,
           review.text, review.timestamp, tour.name AS tour, user.username
    FROM review
    JOIN concert ON concert.id = review.concertid
    JOIN tour ON tour.id = concert.tourid
    JOIN user ON user.id = review.userid
";

/// Review table operations
pub struct ReviewTable;

impl ReviewTable {
    /// Upsert the star rating for a (user, concert) pair
    pub async fn rate(concertid: i64, userid: i64, rating: i64) -> Result<()> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let timestamp = chrono::Utc::now().timestamp();
        let mut tx = pool.begin().await?;

        let existing: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM review WHERE userid = ? AND concertid = ?")
                .bind(userid)
                .bind(concertid)
                .fetch_optional(&mut *tx)
                .await?;

        match existing {
            Some((id,)) => {
                sqlx::query("UPDATE review SET rating = ?, timestamp = ? WHERE id = ?")
                    .bind(rating)
                    .bind(timestamp)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
            }
            None => {
                sqlx::query(
                    "INSERT INTO review (userid, concertid, rating, timestamp) VALUES (?, ?, ?, ?)",
                )
                .bind(userid)
                .bind(concertid)
                .bind(rating)
                .bind(timestamp)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Upsert the review text for a (user, concert) pair
    pub async fn set_text(concertid: i64, userid: i64, text: &str) -> Result<()> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let timestamp = chrono::Utc::now().timestamp();
        let mut tx = pool.begin().await?;

        let existing: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM review WHERE userid = ? AND concertid = ?")
                .bind(userid)
                .bind(concertid)
                .fetch_optional(&mut *tx)
                .await?;

        match existing {
            Some((id,)) => {
                sqlx::query("UPDATE review SET text = ?, timestamp = ? WHERE id = ?")
                    .bind(text)
                    .bind(timestamp)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
            }
            None => {
                sqlx::query(
                    "INSERT INTO review (userid, concertid, text, timestamp) VALUES (?, ?, ?, ?)",
                )
                .bind(userid)
                .bind(concertid)
                .bind(text)
                .bind(timestamp)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// All reviews for an artist's concerts, with tour names joined
    pub async fn for_artist(artisthash: &str) -> Result<Vec<Review>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let sql = format!(
            "{REVIEW_SELECT}
             JOIN artist ON artist.id = concert.artistid
             WHERE artist.artisthash = ?
             ORDER BY review.timestamp DESC"
        );

        let rows: Vec<ReviewRow> = sqlx::query_as(&sql).bind(artisthash).fetch_all(pool).await?;

        Ok(rows.into_iter().map(|r| r.into_review()).collect())
    }

    /// One user's review for one concert, if any
    pub async fn get(concertid: i64, userid: i64) -> Result<Option<Review>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let sql = format!("{REVIEW_SELECT} WHERE review.concertid = ? AND review.userid = ?");

        let row: Option<ReviewRow> = sqlx::query_as(&sql)
            .bind(concertid)
            .bind(userid)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(|r| r.into_review()))
    }
}
