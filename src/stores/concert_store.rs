//! Concert store - in-memory concert cards with efficient cid lookups

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use anyhow::Result;

use crate::db::ConcertTable;
use crate::models::ConcertCard;

/// Global concert store instance
static CONCERT_STORE: OnceLock<Arc<ConcertStore>> = OnceLock::new();

/// In-memory store for concert cards
pub struct ConcertStore {
    /// All concert cards by cid
    concerts: RwLock<HashMap<String, ConcertCard>>,
}

impl ConcertStore {
    /// Get or initialize the global concert store
    pub fn get() -> Arc<ConcertStore> {
        CONCERT_STORE
            .get_or_init(|| {
                Arc::new(ConcertStore {
                    concerts: RwLock::new(HashMap::new()),
                })
            })
            .clone()
    }

    /// Load all concert cards from the database into memory
    pub async fn load_all() -> Result<()> {
        let cards = ConcertTable::all_cards().await?;
        Self::get().load(cards);
        Ok(())
    }

    /// Replace the store contents
    pub fn load(&self, cards: Vec<ConcertCard>) {
        let mut map = self.concerts.write().unwrap();
        map.clear();

        for card in cards {
            map.insert(card.cid.clone(), card);
        }
    }

    /// Get total concert count
    pub fn count(&self) -> usize {
        self.concerts.read().unwrap().len()
    }

    /// Get a concert card by cid
    pub fn get_by_cid(&self, cid: &str) -> Option<ConcertCard> {
        self.concerts.read().unwrap().get(cid).cloned()
    }

    /// Get concert cards by cids, keeping the input order
    pub fn get_by_cids(&self, cids: &[String]) -> Vec<ConcertCard> {
        let map = self.concerts.read().unwrap();
        cids.iter().filter_map(|c| map.get(c).cloned()).collect()
    }

    /// Add or replace a single card
    pub fn add(&self, card: ConcertCard) {
        self.concerts
            .write()
            .unwrap()
            .insert(card.cid.clone(), card);
    }
}
