//! Artist API routes

use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

use crate::core::ratings;
use crate::db::{ConcertTable, ReviewTable};
use crate::models::Artist;
use crate::stores::ArtistStore;

// stand-in price when an artist has no concerts to average over
const DEFAULT_TICKET_PRICE: f64 = 75.0;

/// Resolve a path segment to an artist: hash first, display name second
fn resolve_artist(key: &str) -> Option<Artist> {
    let store = ArtistStore::get();
    store.get_by_hash(key).or_else(|| store.get_by_name(key))
}

/// get artist info with their concert cards
#[get("/{artist}")]
pub async fn get_artist(path: web::Path<String>) -> impl Responder {
    let artist = match resolve_artist(&path) {
        Some(a) => a,
        None => {
            return HttpResponse::NotFound().json(json!({"msg": "Artist not found"}));
        }
    };

    let concerts = match ConcertTable::cards_for_artist(&artist.artisthash).await {
        Ok(cards) => cards,
        Err(e) => {
            tracing::error!("Failed to load concerts for {}: {}", artist.artisthash, e);
            return HttpResponse::InternalServerError().json(json!({"msg": "Database error"}));
        }
    };

    HttpResponse::Ok().json(json!({
        "artist": artist,
        "concerts": concerts,
    }))
}

/// get an artist's reviews with aggregated rating data.
///
/// When the artist has no reviews at all, the distribution falls back to the
/// deterministic simulated path and the response says so via `"simulated"`.
#[get("/{artist}/reviews")]
pub async fn get_artist_reviews(path: web::Path<String>) -> impl Responder {
    let artist = match resolve_artist(&path) {
        Some(a) => a,
        None => {
            return HttpResponse::NotFound().json(json!({"msg": "Artist not found"}));
        }
    };

    let reviews = match ReviewTable::for_artist(&artist.artisthash).await {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to load reviews for {}: {}", artist.artisthash, e);
            return HttpResponse::InternalServerError().json(json!({"msg": "Database error"}));
        }
    };

    if reviews.is_empty() {
        let price = ConcertTable::avg_price_for_artist(&artist.artisthash)
            .await
            .ok()
            .flatten()
            .unwrap_or(DEFAULT_TICKET_PRICE);

        return HttpResponse::Ok().json(json!({
            "reviews": [],
            "rating_distribution": ratings::simulated_histogram(price),
            "tour_ratings": {},
            "go_again": ratings::simulated_go_again(price),
            "simulated": true,
        }));
    }

    let distribution = ratings::compute_histogram(&reviews);
    let tour_ratings = ratings::compute_tour_histograms(&reviews);
    let go_again = ratings::compute_go_again(&reviews);

    HttpResponse::Ok().json(json!({
        "reviews": reviews,
        "rating_distribution": distribution,
        "tour_ratings": tour_ratings,
        "go_again": go_again,
        "simulated": false,
    }))
}

/// configure artist routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_artist_reviews).service(get_artist);
}
