//! Concert, tour and venue models

use serde::{Deserialize, Serialize};

/// A venue where concerts take place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    /// Database ID
    pub id: i64,
    /// Venue name
    pub name: String,
    /// City
    pub city: String,
    /// Country
    #[serde(default)]
    pub country: String,
    /// Seating capacity, when known
    #[serde(default)]
    pub capacity: Option<i64>,
}

/// A tour an artist performs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tour {
    /// Database ID
    pub id: i64,
    /// Owning artist database ID
    pub artistid: i64,
    /// Tour name
    pub name: String,
    /// Year the tour runs
    #[serde(default)]
    pub year: Option<i64>,
}

/// A single concert date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Concert {
    /// Database ID
    pub id: i64,
    /// Stable public identifier
    pub cid: String,
    /// Artist database ID
    pub artistid: i64,
    /// Tour database ID
    pub tourid: i64,
    /// Venue database ID
    pub venueid: i64,
    /// Concert date as an ISO-8601 day (YYYY-MM-DD)
    pub date: String,
    /// Ticket price
    pub price: f64,
    /// Image URL or path
    #[serde(default)]
    pub image: Option<String>,
}

/// Flat concert snapshot with joined display fields.
///
/// This is the shape listings and drag payloads carry: identity key plus
/// display fields only, no references back into the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcertCard {
    pub cid: String,
    pub artist: String,
    pub artisthash: String,
    pub tour: String,
    pub date: String,
    pub venue: String,
    pub city: String,
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
}
