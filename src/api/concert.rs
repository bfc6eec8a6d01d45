//! Concert API routes

use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

use crate::api::auth::{auth_user_optional, require_admin, require_user};
use crate::db::{ConcertTable, FavoriteTable, NewConcert, ReviewTable};
use crate::stores::{ArtistStore, ConcertStore};
use crate::utils::dates::parse_day;

/// get user concerts: everything the logged-in user has reviewed or favorited
#[get("/user")]
pub async fn get_user_concerts(req: HttpRequest) -> impl Responder {
    let user = match require_user(&req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    match ConcertTable::user_concerts(user.id).await {
        Ok(concerts) => HttpResponse::Ok().json(json!({ "concerts": concerts })),
        Err(e) => {
            tracing::error!("Failed to load user concerts: {}", e);
            HttpResponse::InternalServerError().json(json!({"msg": "Database error"}))
        }
    }
}

/// get joined concert details, with per-user state when authenticated
#[get("/{cid}")]
pub async fn get_concert(req: HttpRequest, path: web::Path<String>) -> impl Responder {
    let cid = path.into_inner();

    let details = match ConcertTable::get_details(&cid).await {
        Ok(Some(d)) => d,
        Ok(None) => {
            return HttpResponse::NotFound().json(json!({"msg": "Concert not found"}));
        }
        Err(e) => {
            tracing::error!("Failed to load concert {}: {}", cid, e);
            return HttpResponse::InternalServerError().json(json!({"msg": "Database error"}));
        }
    };

    let mut response = json!({ "concert": details });

    if let Ok(Some(user)) = auth_user_optional(&req).await {
        if let Ok(Some(concert)) = ConcertTable::get_by_cid(&cid).await {
            let is_favorite = FavoriteTable::exists(concert.id, user.id)
                .await
                .unwrap_or(false);
            let my_review = ReviewTable::get(concert.id, user.id).await.ok().flatten();

            response["is_favorite"] = json!(is_favorite);
            response["my_rating"] = json!(my_review.as_ref().and_then(|r| r.rating));
            response["my_review"] = json!(my_review.as_ref().and_then(|r| r.text.clone()));
        }
    }

    HttpResponse::Ok().json(response)
}

/// create a concert (admin only).
///
/// Inserts the artist, venue, tour and concert rows as one transaction; a
/// failure anywhere rolls the whole unit back and nothing is created.
#[post("")]
pub async fn create_concert(req: HttpRequest, body: web::Json<NewConcert>) -> impl Responder {
    if let Err(resp) = require_admin(&req).await.map(|_| ()) {
        return resp;
    }

    let new = body.into_inner();

    if new.artist.is_empty() || new.tour.is_empty() || new.venue.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "msg": "artist, tour and venue are required"
        }));
    }

    // normalize the date up front so bad input fails before any row lands
    let date = match parse_day(&new.date) {
        Some(d) => d.to_string(),
        None => {
            return HttpResponse::BadRequest().json(json!({
                "msg": "date must be YYYY-MM-DD"
            }));
        }
    };
    let new = NewConcert { date, ..new };

    let cid = match ConcertTable::create_full(&new).await {
        Ok(cid) => cid,
        Err(e) => {
            tracing::error!("Concert creation failed: {}", e);
            return HttpResponse::InternalServerError().json(json!({
                "msg": "Failed! An error occured"
            }));
        }
    };

    // refresh the in-memory stores with the new rows
    if let Err(e) = ConcertStore::load_all().await {
        tracing::warn!("Concert store reload failed: {}", e);
    }
    if let Err(e) = ArtistStore::load_all().await {
        tracing::warn!("Artist store reload failed: {}", e);
    }

    HttpResponse::Ok().json(json!({ "cid": cid }))
}

/// configure concert routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_user_concerts)
        .service(get_concert)
        .service(create_concert);
}
