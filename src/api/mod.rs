//! REST API routes for StagePass

pub mod artist;
pub mod auth;
pub mod concert;
pub mod favorites;
pub mod review;
pub mod wishlist;

use actix_web::web;

/// Configure all API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Artist routes
        .service(web::scope("/artist").configure(artist::configure))
        // Auth routes
        .service(web::scope("/auth").configure(auth::configure))
        // Concert routes
        .service(web::scope("/concert").configure(concert::configure))
        // Favorites routes
        .service(web::scope("/favorites").configure(favorites::configure))
        // Review routes
        .service(web::scope("/review").configure(review::configure))
        // Wishlist session routes
        .service(web::scope("/wishlist").configure(wishlist::configure))
        // Compare session routes
        .service(web::scope("/compare").configure(wishlist::configure_compare));
}
