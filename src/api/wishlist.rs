//! Wishlist and compare session routes
//!
//! Each logged-in user gets one in-memory `WishlistCompareState`. Session
//! state lives only in this map: it is created on first touch, cleared on
//! logout, and gone after a restart. Nothing here is persisted.

use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;

use crate::api::auth::require_user;
use crate::core::wishlist::{CompareSide, WishlistCompareState, WishlistEntry};

/// per-user session state keyed by user id
static SESSIONS: Lazy<RwLock<HashMap<i64, WishlistCompareState>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Drop a user's session state (called on logout)
pub(crate) fn clear_session(userid: i64) {
    SESSIONS.write().remove(&userid);
}

fn with_session<T>(userid: i64, f: impl FnOnce(&mut WishlistCompareState) -> T) -> T {
    let mut sessions = SESSIONS.write();
    f(sessions.entry(userid).or_default())
}

#[derive(Debug, Deserialize)]
pub struct DropBody {
    pub side: CompareSide,
    /// the drag channel's serialized concert snapshot
    pub payload: String,
}

#[derive(Debug, Deserialize)]
pub struct ClearBody {
    pub side: CompareSide,
}

/// get the date-sorted wishlist
#[get("")]
pub async fn get_wishlist(req: HttpRequest) -> impl Responder {
    let user = match require_user(&req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    let entries = with_session(user.id, |state| state.wishlist().to_vec());
    HttpResponse::Ok().json(json!({ "wishlist": entries }))
}

/// save a concert snapshot to the wishlist (idempotent)
#[post("/add")]
pub async fn add_to_wishlist(req: HttpRequest, body: web::Json<WishlistEntry>) -> impl Responder {
    let user = match require_user(&req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    let count = with_session(user.id, |state| {
        state.add_to_wishlist(body.into_inner());
        state.wishlist().len()
    });

    HttpResponse::Ok().json(json!({"msg": "Saved", "total": count}))
}

/// remove a concert from the wishlist (no-op when absent)
#[post("/remove")]
pub async fn remove_from_wishlist(
    req: HttpRequest,
    body: web::Json<WishlistEntry>,
) -> impl Responder {
    let user = match require_user(&req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    let entry = body.into_inner();
    let count = with_session(user.id, |state| {
        state.remove_from_wishlist(&entry);
        state.wishlist().len()
    });

    HttpResponse::Ok().json(json!({"msg": "Removed", "total": count}))
}

/// get both compare slots
#[get("")]
pub async fn get_compare(req: HttpRequest) -> impl Responder {
    let user = match require_user(&req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    let (left, right) = with_session(user.id, |state| {
        (
            state.slot(CompareSide::Left).clone(),
            state.slot(CompareSide::Right).clone(),
        )
    });

    HttpResponse::Ok().json(json!({"left": left, "right": right}))
}

/// drop a dragged concert payload onto one compare slot
#[post("/drop")]
pub async fn drop_on_slot(req: HttpRequest, body: web::Json<DropBody>) -> impl Responder {
    let user = match require_user(&req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    let result = with_session(user.id, |state| {
        state.drop_on_slot(body.side, &body.payload)
    });

    match result {
        Ok(()) => HttpResponse::Ok().json(json!({"msg": "Placed"})),
        Err(e) => HttpResponse::BadRequest().json(json!({"msg": e.to_string()})),
    }
}

/// empty one compare slot, leaving the other untouched
#[post("/clear")]
pub async fn clear_slot(req: HttpRequest, body: web::Json<ClearBody>) -> impl Responder {
    let user = match require_user(&req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    with_session(user.id, |state| state.clear_slot(body.side));
    HttpResponse::Ok().json(json!({"msg": "Cleared"}))
}

/// configure wishlist routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_wishlist)
        .service(add_to_wishlist)
        .service(remove_from_wishlist);
}

/// configure compare routes
pub fn configure_compare(cfg: &mut web::ServiceConfig) {
    cfg.service(get_compare)
        .service(drop_on_slot)
        .service(clear_slot);
}
