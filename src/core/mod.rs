//! Core application logic for StagePass

pub mod ratings;
pub mod wishlist;
