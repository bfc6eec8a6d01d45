//! Review model

use serde::{Deserialize, Serialize};

/// A user's review of a concert.
///
/// A user has at most one review per concert; rating and text are upserted
/// independently against that (user, concert) pair. The tour name is carried
/// denormalized so rating aggregation can group without another join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Database ID
    pub id: i64,
    /// Reviewing user
    pub userid: i64,
    /// Reviewed concert (database ID)
    pub concertid: i64,
    /// Star rating 1-5, absent when the user only wrote text
    #[serde(default)]
    pub rating: Option<f64>,
    /// Review text, absent when the user only rated
    #[serde(default)]
    pub text: Option<String>,
    /// Unix timestamp of the last update
    pub timestamp: i64,
    /// Tour the reviewed concert belongs to
    #[serde(default)]
    pub tour: String,
    /// Reviewer's username (joined for API responses)
    #[serde(default)]
    pub username: String,
}

impl Review {
    /// A bare rated review, used by aggregation tests and seeds
    pub fn rated(rating: f64, tour: &str) -> Self {
        Self {
            id: 0,
            userid: 0,
            concertid: 0,
            rating: Some(rating),
            text: None,
            timestamp: chrono::Utc::now().timestamp(),
            tour: tour.to_string(),
            username: String::new(),
        }
    }
}
