//! Favorite model

use serde::{Deserialize, Serialize};

/// A favorite entry: one user has saved one concert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    /// Database ID
    pub id: i64,
    /// Concert database ID
    pub concertid: i64,
    /// Public concert identifier (joined for API responses)
    pub cid: String,
    /// User who favorited
    pub userid: i64,
    /// Timestamp when favorited
    pub timestamp: i64,
}

impl Favorite {
    /// Create a new favorite for the current instant
    pub fn new(concertid: i64, cid: String, userid: i64) -> Self {
        Self {
            id: 0,
            concertid,
            cid,
            userid,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}
