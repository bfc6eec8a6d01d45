//! In-memory stores loaded from the database at startup

mod artist_store;
mod concert_store;

pub use artist_store::ArtistStore;
pub use concert_store::ConcertStore;
