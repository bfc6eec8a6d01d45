//! Concert table operations
//!
//! Concert creation touches the artist, venue, tour and concert tables, so
//! it runs inside one transaction: either every row lands or none do.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::db::DbEngine;
use crate::models::{Artist, Concert, ConcertCard};

const CARD_SELECT: &str = "
    SELECT concert.cid, artist.name AS artist, artist.artisthash,
           tour.name AS tour, concert.date, venue.name AS venue,
           venue.city, concert.price, concert.image
    FROM concert
    JOIN artist ON artist.id = concert.artistid
    JOIN tour ON tour.id = concert.tourid
    JOIN venue ON venue.id = concert.venueid
";

/// Database row for concert table
#[derive(Debug, FromRow)]
struct ConcertRow {
    id: i64,
    cid: String,
    artistid: i64,
    tourid: i64,
    venueid: i64,
    date: String,
    price: f64,
    image: Option<String>,
}

impl ConcertRow {
    fn into_concert(self) -> Concert {
        Concert {
            id: self.id,
            cid: self.cid,
            artistid: self.artistid,
            tourid: self.tourid,
            venueid: self.venueid,
            date: self.date,
            price: self.price,
            image: self.image,
        }
    }
}

/// Joined card row for listings
#[derive(Debug, FromRow)]
struct CardRow {
    cid: String,
    artist: String,
    artisthash: String,
    tour: String,
    date: String,
    venue: String,
    city: String,
    price: f64,
    image: Option<String>,
}

impl CardRow {
    fn into_card(self) -> ConcertCard {
        ConcertCard {
            cid: self.cid,
            artist: self.artist,
            artisthash: self.artisthash,
            tour: self.tour,
            date: self.date,
            venue: self.venue,
            city: self.city,
            price: self.price,
            image: self.image,
        }
    }
}

/// Full concert detail view: card fields plus the rest of the joined rows
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ConcertDetails {
    pub cid: String,
    pub date: String,
    pub price: f64,
    pub image: Option<String>,
    pub artist: String,
    pub artisthash: String,
    pub genre: Option<String>,
    pub tour: String,
    pub tour_year: Option<i64>,
    pub venue: String,
    pub city: String,
    pub country: String,
    pub capacity: Option<i64>,
}

/// A concert joined with one user's review/favorite state
#[derive(Debug, Serialize, FromRow)]
pub struct UserConcert {
    pub cid: String,
    pub artist: String,
    pub artisthash: String,
    pub tour: String,
    pub date: String,
    pub venue: String,
    pub city: String,
    pub price: f64,
    pub image: Option<String>,
    pub rating: Option<i64>,
    pub review_text: Option<String>,
    pub favorited: bool,
}

/// Input for transactional concert creation. Artist, venue and tour are
/// matched to existing rows when possible and created otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct NewConcert {
    pub artist: String,
    #[serde(default)]
    pub genre: Option<String>,
    pub tour: String,
    #[serde(default)]
    pub tour_year: Option<i64>,
    pub venue: String,
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub capacity: Option<i64>,
    pub date: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
}

/// Concert table operations
pub struct ConcertTable;

impl ConcertTable {
    /// Get a concert by public identifier
    pub async fn get_by_cid(cid: &str) -> Result<Option<Concert>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let row: Option<ConcertRow> = sqlx::query_as("SELECT * FROM concert WHERE cid = ?")
            .bind(cid)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(|r| r.into_concert()))
    }

    /// Get all concert cards (joined display rows)
    pub async fn all_cards() -> Result<Vec<ConcertCard>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let sql = format!("{CARD_SELECT} ORDER BY concert.date");
        let rows: Vec<CardRow> = sqlx::query_as(&sql).fetch_all(pool).await?;

        Ok(rows.into_iter().map(|r| r.into_card()).collect())
    }

    /// Get concert cards for one artist, soonest first
    pub async fn cards_for_artist(artisthash: &str) -> Result<Vec<ConcertCard>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let sql = format!("{CARD_SELECT} WHERE artist.artisthash = ? ORDER BY concert.date");
        let rows: Vec<CardRow> = sqlx::query_as(&sql).bind(artisthash).fetch_all(pool).await?;

        Ok(rows.into_iter().map(|r| r.into_card()).collect())
    }

    /// Average ticket price across an artist's concerts, if any exist
    pub async fn avg_price_for_artist(artisthash: &str) -> Result<Option<f64>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let row: (Option<f64>,) = sqlx::query_as(
            "SELECT AVG(concert.price) FROM concert
             JOIN artist ON artist.id = concert.artistid
             WHERE artist.artisthash = ?",
        )
        .bind(artisthash)
        .fetch_one(pool)
        .await?;

        Ok(row.0)
    }

    /// Get the full joined detail view for one concert
    pub async fn get_details(cid: &str) -> Result<Option<ConcertDetails>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let row: Option<ConcertDetails> = sqlx::query_as(
            "SELECT concert.cid, concert.date, concert.price, concert.image,
                    artist.name AS artist, artist.artisthash, artist.genre,
                    tour.name AS tour, tour.year AS tour_year,
                    venue.name AS venue, venue.city, venue.country, venue.capacity
             FROM concert
             JOIN artist ON artist.id = concert.artistid
             JOIN tour ON tour.id = concert.tourid
             JOIN venue ON venue.id = concert.venueid
             WHERE concert.cid = ?",
        )
        .bind(cid)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    /// Concerts the given user has reviewed or favorited, with that state
    pub async fn user_concerts(userid: i64) -> Result<Vec<UserConcert>> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let rows: Vec<UserConcert> = sqlx::query_as(
            "SELECT concert.cid, artist.name AS artist, artist.artisthash,
                    tour.name AS tour, concert.date, venue.name AS venue,
                    venue.city, concert.price, concert.image,
                    review.rating AS rating, review.text AS review_text,
                    favorite.id IS NOT NULL AS favorited
             FROM concert
             JOIN artist ON artist.id = concert.artistid
             JOIN tour ON tour.id = concert.tourid
             JOIN venue ON venue.id = concert.venueid
             LEFT JOIN review ON review.concertid = concert.id AND review.userid = ?
             LEFT JOIN favorite ON favorite.concertid = concert.id AND favorite.userid = ?
             WHERE review.id IS NOT NULL OR favorite.id IS NOT NULL
             ORDER BY concert.date",
        )
        .bind(userid)
        .bind(userid)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Create a concert with its artist, venue and tour rows as one unit.
    ///
    /// Runs in a single transaction; any statement failure rolls back the
    /// whole unit. Returns the new concert's public identifier.
    pub async fn create_full(new: &NewConcert) -> Result<String> {
        let engine = DbEngine::get()?;
        let pool = engine.pool();

        let artisthash = Artist::hash_name(&new.artist);
        let cid = uuid::Uuid::new_v4().simple().to_string();

        let mut tx = pool.begin().await?;

        // find or create the artist
        let artistid: i64 = match sqlx::query_as::<_, (i64,)>(
            "SELECT id FROM artist WHERE artisthash = ?",
        )
        .bind(&artisthash)
        .fetch_optional(&mut *tx)
        .await?
        {
            Some((id,)) => id,
            None => sqlx::query(
                "INSERT INTO artist (artisthash, name, genre) VALUES (?, ?, ?)",
            )
            .bind(&artisthash)
            .bind(&new.artist)
            .bind(&new.genre)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid(),
        };

        // find or create the venue
        let venueid: i64 = match sqlx::query_as::<_, (i64,)>(
            "SELECT id FROM venue WHERE name = ? AND city = ?",
        )
        .bind(&new.venue)
        .bind(&new.city)
        .fetch_optional(&mut *tx)
        .await?
        {
            Some((id,)) => id,
            None => sqlx::query(
                "INSERT INTO venue (name, city, country, capacity) VALUES (?, ?, ?, ?)",
            )
            .bind(&new.venue)
            .bind(&new.city)
            .bind(&new.country)
            .bind(new.capacity)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid(),
        };

        // find or create the tour
        let tourid: i64 = match sqlx::query_as::<_, (i64,)>(
            "SELECT id FROM tour WHERE artistid = ? AND name = ?",
        )
        .bind(artistid)
        .bind(&new.tour)
        .fetch_optional(&mut *tx)
        .await?
        {
            Some((id,)) => id,
            None => sqlx::query("INSERT INTO tour (artistid, name, year) VALUES (?, ?, ?)")
                .bind(artistid)
                .bind(&new.tour)
                .bind(new.tour_year)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid(),
        };

        sqlx::query(
            "INSERT INTO concert (cid, artistid, tourid, venueid, date, price, image)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&cid)
        .bind(artistid)
        .bind(tourid)
        .bind(venueid)
        .bind(&new.date)
        .bind(new.price)
        .bind(&new.image)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(cid)
    }
}
