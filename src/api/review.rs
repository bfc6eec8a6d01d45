//! Review API routes: rating and review-text upserts

use actix_web::{post, web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::api::auth::require_user;
use crate::db::{ConcertTable, ReviewTable};
use crate::models::Concert;

#[derive(Debug, Deserialize)]
pub struct RateBody {
    pub cid: String,
    pub rating: f64,
}

#[derive(Debug, Deserialize)]
pub struct ReviewTextBody {
    pub cid: String,
    pub text: String,
}

async fn resolve_concert(cid: &str) -> Result<Concert, HttpResponse> {
    match ConcertTable::get_by_cid(cid).await {
        Ok(Some(concert)) => Ok(concert),
        Ok(None) => Err(HttpResponse::NotFound().json(json!({"msg": "Concert not found"}))),
        Err(e) => {
            tracing::error!("Concert lookup failed: {}", e);
            Err(HttpResponse::InternalServerError().json(json!({"msg": "Database error"})))
        }
    }
}

/// rate a concert 1-5 stars, updating any existing rating
#[post("/rate")]
pub async fn rate_concert(req: HttpRequest, body: web::Json<RateBody>) -> impl Responder {
    let user = match require_user(&req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    if !body.rating.is_finite() {
        return HttpResponse::BadRequest().json(json!({"msg": "rating must be a number 1-5"}));
    }

    // well-formed clients send integers 1-5; round and clamp anything else
    let rating = body.rating.round().clamp(1.0, 5.0) as i64;

    let concert = match resolve_concert(&body.cid).await {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match ReviewTable::rate(concert.id, user.id, rating).await {
        Ok(()) => HttpResponse::Ok().json(json!({"msg": "Rating saved", "rating": rating})),
        Err(e) => {
            tracing::error!("Rating upsert failed: {}", e);
            HttpResponse::InternalServerError().json(json!({"msg": "Failed! An error occured"}))
        }
    }
}

/// write or replace the review text for a concert
#[post("/text")]
pub async fn review_concert(req: HttpRequest, body: web::Json<ReviewTextBody>) -> impl Responder {
    let user = match require_user(&req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    if body.text.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({"msg": "text is required"}));
    }

    let concert = match resolve_concert(&body.cid).await {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match ReviewTable::set_text(concert.id, user.id, body.text.trim()).await {
        Ok(()) => HttpResponse::Ok().json(json!({"msg": "Review saved"})),
        Err(e) => {
            tracing::error!("Review upsert failed: {}", e);
            HttpResponse::InternalServerError().json(json!({"msg": "Failed! An error occured"}))
        }
    }
}

/// configure review routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(rate_concert).service(review_concert);
}
