//! Artist store - in-memory artist storage with name and hash lookups

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use anyhow::Result;

use crate::db::ArtistTable;
use crate::models::Artist;

/// Global artist store instance
static ARTIST_STORE: OnceLock<Arc<ArtistStore>> = OnceLock::new();

/// In-memory store for artists
pub struct ArtistStore {
    /// All artists by artisthash
    artists: RwLock<HashMap<String, Artist>>,
    /// Artist hash by lowercased name
    artists_by_name: RwLock<HashMap<String, String>>,
}

impl ArtistStore {
    /// Get or initialize the global artist store
    pub fn get() -> Arc<ArtistStore> {
        ARTIST_STORE
            .get_or_init(|| {
                Arc::new(ArtistStore {
                    artists: RwLock::new(HashMap::new()),
                    artists_by_name: RwLock::new(HashMap::new()),
                })
            })
            .clone()
    }

    /// Load all artists from the database into memory
    pub async fn load_all() -> Result<()> {
        let artists = ArtistTable::all().await?;
        Self::get().load(artists);
        Ok(())
    }

    /// Replace the store contents
    pub fn load(&self, artists: Vec<Artist>) {
        let mut artist_map = self.artists.write().unwrap();
        let mut name_map = self.artists_by_name.write().unwrap();

        artist_map.clear();
        name_map.clear();

        for artist in artists {
            let hash = artist.artisthash.clone();
            name_map.insert(artist.name.to_lowercase(), hash.clone());
            artist_map.insert(hash, artist);
        }
    }

    /// Get total artist count
    pub fn count(&self) -> usize {
        self.artists.read().unwrap().len()
    }

    /// Get artist by hash
    pub fn get_by_hash(&self, hash: &str) -> Option<Artist> {
        self.artists.read().unwrap().get(hash).cloned()
    }

    /// Get artist by display name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Option<Artist> {
        let name_map = self.artists_by_name.read().unwrap();
        name_map
            .get(&name.to_lowercase())
            .and_then(|hash| self.artists.read().unwrap().get(hash).cloned())
    }

    /// Add or replace a single artist
    pub fn add(&self, artist: Artist) {
        let hash = artist.artisthash.clone();
        self.artists_by_name
            .write()
            .unwrap()
            .insert(artist.name.to_lowercase(), hash.clone());
        self.artists.write().unwrap().insert(hash, artist);
    }
}
