//! Data models for StagePass
//!
//! This module contains all the core data structures used throughout the application.

mod artist;
mod concert;
mod favorite;
mod review;
mod user;

pub use artist::Artist;
pub use concert::{Concert, ConcertCard, Tour, Venue};
pub use favorite::Favorite;
pub use review::Review;
pub use user::{PublicUser, User, UserRole};
