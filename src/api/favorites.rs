//! Favorites API routes

use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::api::auth::require_user;
use crate::db::{ConcertTable, FavoriteTable};
use crate::stores::ConcertStore;
use crate::utils::dates::timestamp_to_relative;

#[derive(Debug, Deserialize)]
pub struct FavoriteBody {
    pub cid: String,
}

async fn concert_id_for(cid: &str) -> Result<i64, HttpResponse> {
    match ConcertTable::get_by_cid(cid).await {
        Ok(Some(concert)) => Ok(concert.id),
        Ok(None) => Err(HttpResponse::NotFound().json(json!({"msg": "Concert not found"}))),
        Err(e) => {
            tracing::error!("Concert lookup failed: {}", e);
            Err(HttpResponse::InternalServerError().json(json!({"msg": "Database error"})))
        }
    }
}

/// add a concert to favorites (idempotent)
#[post("/add")]
pub async fn add_favorite(req: HttpRequest, body: web::Json<FavoriteBody>) -> impl Responder {
    let user = match require_user(&req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    let concertid = match concert_id_for(&body.cid).await {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    if let Err(e) = FavoriteTable::add(concertid, user.id).await {
        tracing::error!("Favorite add failed: {}", e);
        return HttpResponse::InternalServerError()
            .json(json!({"msg": "Failed! An error occured"}));
    }

    HttpResponse::Ok().json(json!({"msg": "Added to favorites"}))
}

/// remove a concert from favorites (no-op when absent)
#[post("/remove")]
pub async fn remove_favorite(req: HttpRequest, body: web::Json<FavoriteBody>) -> impl Responder {
    let user = match require_user(&req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    let concertid = match concert_id_for(&body.cid).await {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    if let Err(e) = FavoriteTable::remove(concertid, user.id).await {
        tracing::error!("Favorite remove failed: {}", e);
        return HttpResponse::InternalServerError()
            .json(json!({"msg": "Failed! An error occured"}));
    }

    HttpResponse::Ok().json(json!({"msg": "Removed from favorites"}))
}

/// check whether a concert is favorited
#[get("/check")]
pub async fn check_favorite(req: HttpRequest, query: web::Query<FavoriteBody>) -> impl Responder {
    let user = match require_user(&req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    let concertid = match concert_id_for(&query.cid).await {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match FavoriteTable::exists(concertid, user.id).await {
        Ok(is_favorite) => HttpResponse::Ok().json(json!({"is_favorite": is_favorite})),
        Err(e) => {
            tracing::error!("Favorite check failed: {}", e);
            HttpResponse::InternalServerError().json(json!({"msg": "Failed! An error occured"}))
        }
    }
}

/// list the user's favorite concerts, newest first, as display cards
#[get("")]
pub async fn get_favorites(req: HttpRequest) -> impl Responder {
    let user = match require_user(&req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    let favorites = match FavoriteTable::all(user.id).await {
        Ok(f) => f,
        Err(e) => {
            tracing::error!("Favorite list failed: {}", e);
            return HttpResponse::InternalServerError()
                .json(json!({"msg": "Failed! An error occured"}));
        }
    };

    let store = ConcertStore::get();
    let items: Vec<_> = favorites
        .iter()
        .filter_map(|fav| {
            store.get_by_cid(&fav.cid).map(|card| {
                json!({
                    "concert": card,
                    "time": timestamp_to_relative(fav.timestamp),
                })
            })
        })
        .collect();

    HttpResponse::Ok().json(json!({
        "favorites": items,
        "total": items.len(),
    }))
}

/// configure favorites routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(add_favorite)
        .service(remove_favorite)
        .service(check_favorite)
        .service(get_favorites);
}
