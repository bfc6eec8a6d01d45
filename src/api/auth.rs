//! authentication api routes, cookie based jwt

use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use anyhow::Result as AnyResult;
use serde::{Deserialize, Serialize};

use crate::config::UserConfig;
use crate::db::UserTable;
use crate::models::{User, UserRole};
use crate::utils::auth::{create_jwt, hash_password, verify_jwt, verify_password, UserIdentity};

const ACCESS_MAX_AGE: i64 = 30 * 24 * 3600; // 30 days in seconds
const REFRESH_MAX_AGE: i64 = 30 * 24 * 3600;

/// login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// login / refresh response
#[derive(Debug, Serialize, Clone)]
pub struct TokenResponse {
    pub msg: String,
    pub accesstoken: String,
    pub refreshtoken: String,
    pub maxage: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub roles: Option<Vec<String>>,
}

/// login endpoint
#[post("/login")]
pub async fn login(body: web::Json<LoginRequest>) -> impl Responder {
    match UserTable::get_by_username(&body.username).await {
        Ok(Some(user)) => {
            if verify_password(&body.password, &user.password).unwrap_or(false) {
                let config = match UserConfig::load() {
                    Ok(cfg) => cfg,
                    Err(_) => {
                        return HttpResponse::InternalServerError().json(serde_json::json!({
                            "msg": "Failed to load config"
                        }))
                    }
                };

                match create_tokens(&user, &config.server_id) {
                    Ok(tokens) => HttpResponse::Ok()
                        .cookie(build_access_cookie(&tokens.accesstoken))
                        .json(tokens),
                    Err(_) => HttpResponse::InternalServerError().json(serde_json::json!({
                        "msg": "Failed to create token"
                    })),
                }
            } else {
                HttpResponse::Unauthorized().json(serde_json::json!({
                    "msg": "Invalid password"
                }))
            }
        }
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "msg": "User not found"
        })),
        Err(_) => HttpResponse::InternalServerError().json(serde_json::json!({
            "msg": "Database error"
        })),
    }
}

/// refresh token, expects refresh token in authorization header
#[post("/refresh")]
pub async fn refresh_token(req: HttpRequest) -> impl Responder {
    let token = match bearer_token(&req) {
        Ok(Some(t)) => t,
        Ok(None) => {
            return HttpResponse::Unauthorized().json(serde_json::json!({
                "msg": "No token provided"
            }));
        }
        Err(resp) => return resp,
    };

    let config = match UserConfig::load() {
        Ok(cfg) => cfg,
        Err(_) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "msg": "Config error"
            }))
        }
    };

    match verify_jwt(&token, &config.server_id, Some("refresh")) {
        Ok(claims) => match create_tokens_with_identity(claims.sub, &config.server_id) {
            Ok(tokens) => HttpResponse::Ok().json(tokens),
            Err(_) => HttpResponse::InternalServerError().json(serde_json::json!({
                "msg": "Failed to create token"
            })),
        },
        Err(_) => HttpResponse::Unauthorized().json(serde_json::json!({
            "msg": "Invalid token"
        })),
    }
}

/// create a new user, admin only
#[post("/profile/create")]
pub async fn create_user(req: HttpRequest, body: web::Json<CreateUserRequest>) -> impl Responder {
    if let Err(resp) = require_admin(&req).await.map(|_| ()) {
        return resp;
    }

    if body.username.is_empty() || body.password.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "msg": "Username and password are required"
        }));
    }

    if let Ok(Some(_)) = UserTable::get_by_username(&body.username).await {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "msg": "Username already exists"
        }));
    }

    let password_hash = match hash_password(&body.password) {
        Ok(h) => h,
        Err(_) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "msg": "Failed to hash password"
            }))
        }
    };

    let mut user = User::new(body.username.clone(), password_hash);
    if let Some(role_names) = body.roles.as_ref() {
        user.roles = role_names
            .iter()
            .filter_map(|r| UserRole::from_str(r))
            .collect();
    }

    match UserTable::insert(&user).await {
        Ok(_) => match UserTable::get_by_username(&body.username).await {
            Ok(Some(u)) => HttpResponse::Ok().json(u.to_public()),
            _ => HttpResponse::InternalServerError().json(serde_json::json!({
                "msg": "Failed to fetch user"
            })),
        },
        Err(_) => HttpResponse::InternalServerError().json(serde_json::json!({
            "msg": "Failed to create user"
        })),
    }
}

/// get all users, public list shown on the login page
#[get("/users")]
pub async fn get_users() -> impl Responder {
    let config = UserConfig::load().unwrap_or_default();

    if !config.users_on_login {
        return HttpResponse::Ok().json(serde_json::json!({ "users": [] }));
    }

    match UserTable::all().await {
        Ok(users) => {
            let list: Vec<_> = users.iter().map(|u| u.to_public()).collect();
            HttpResponse::Ok().json(serde_json::json!({ "users": list }))
        }
        Err(_) => HttpResponse::InternalServerError().json(serde_json::json!({
            "msg": "Database error"
        })),
    }
}

/// get logged in user, empty object if not logged in
#[get("/user")]
pub async fn get_logged_in_user(req: HttpRequest) -> impl Responder {
    match auth_user_optional(&req).await {
        Ok(Some(user)) => HttpResponse::Ok().json(user.to_public()),
        Ok(None) => HttpResponse::Ok().json(serde_json::json!({})),
        Err(resp) => resp,
    }
}

/// logout, clears the auth cookie and any in-memory session state
#[get("/logout")]
pub async fn logout(req: HttpRequest) -> impl Responder {
    if let Ok(Some(user)) = auth_user_optional(&req).await {
        crate::api::wishlist::clear_session(user.id);
    }

    let cookie = Cookie::build("access_token_cookie", "")
        .path("/")
        .max_age(CookieDuration::seconds(0))
        .http_only(true)
        .finish();

    HttpResponse::Ok().cookie(cookie).json(serde_json::json!({
        "msg": "Logged out"
    }))
}

// helpers shared by the other api modules

fn build_access_cookie(token: &str) -> Cookie<'static> {
    Cookie::build("access_token_cookie", token.to_string())
        .path("/")
        .http_only(true)
        .max_age(CookieDuration::seconds(ACCESS_MAX_AGE))
        .finish()
}

fn user_to_identity(user: &User) -> UserIdentity {
    let roles: Vec<String> = user.roles.iter().map(|r| r.as_str().to_string()).collect();
    UserIdentity {
        id: user.id,
        username: user.username.clone(),
        roles,
    }
}

fn create_tokens(user: &User, server_id: &str) -> AnyResult<TokenResponse> {
    let identity = user_to_identity(user);
    create_tokens_with_identity(identity, server_id)
}

fn create_tokens_with_identity(identity: UserIdentity, server_id: &str) -> AnyResult<TokenResponse> {
    let username = identity.username.clone();
    let accesstoken = create_jwt(identity.clone(), server_id, "access", ACCESS_MAX_AGE as u64)?;
    let refreshtoken = create_jwt(identity, server_id, "refresh", REFRESH_MAX_AGE as u64)?;

    Ok(TokenResponse {
        msg: format!("Logged in as {}", username),
        accesstoken,
        refreshtoken,
        maxage: ACCESS_MAX_AGE,
    })
}

pub(crate) async fn require_user(req: &HttpRequest) -> Result<User, HttpResponse> {
    match auth_user_optional(req).await? {
        Some(user) => Ok(user),
        None => Err(HttpResponse::Unauthorized().json(serde_json::json!({
            "msg": "Not authenticated"
        }))),
    }
}

pub(crate) async fn require_admin(req: &HttpRequest) -> Result<User, HttpResponse> {
    let user = require_user(req).await?;
    if user.is_admin() {
        Ok(user)
    } else {
        Err(HttpResponse::Forbidden().json(serde_json::json!({
            "msg": "Only admins can do that"
        })))
    }
}

pub(crate) async fn auth_user_optional(req: &HttpRequest) -> Result<Option<User>, HttpResponse> {
    let token = match access_token(req) {
        Ok(Some(t)) => t,
        Ok(None) => return Ok(None),
        Err(resp) => return Err(resp),
    };

    let config = match UserConfig::load() {
        Ok(cfg) => cfg,
        Err(_) => {
            return Err(HttpResponse::InternalServerError().json(serde_json::json!({
                "msg": "Config error"
            })));
        }
    };

    let claims = match verify_jwt(&token, &config.server_id, Some("access")) {
        Ok(c) => c,
        Err(_) => {
            return Err(HttpResponse::Unauthorized().json(serde_json::json!({
                "msg": "Invalid token"
            })));
        }
    };

    match UserTable::get_by_id(claims.sub.id).await {
        Ok(Some(user)) => Ok(Some(user)),
        Ok(None) => Err(HttpResponse::Unauthorized().json(serde_json::json!({
            "msg": "Invalid token"
        }))),
        Err(_) => Err(HttpResponse::InternalServerError().json(serde_json::json!({
            "msg": "Database error"
        }))),
    }
}

fn bearer_token(req: &HttpRequest) -> Result<Option<String>, HttpResponse> {
    match req.headers().get("Authorization") {
        Some(header_value) => {
            let header_str = header_value.to_str().unwrap_or("").trim();
            if header_str.is_empty() {
                return Err(HttpResponse::Unauthorized().json(serde_json::json!({
                    "msg": "Invalid token format"
                })));
            }

            let token = header_str.strip_prefix("Bearer ").unwrap_or(header_str);

            if token.is_empty() {
                return Err(HttpResponse::Unauthorized().json(serde_json::json!({
                    "msg": "Invalid token format"
                })));
            }

            Ok(Some(token.to_string()))
        }
        None => Ok(None),
    }
}

fn access_token(req: &HttpRequest) -> Result<Option<String>, HttpResponse> {
    if let Some(cookie) = req.cookie("access_token_cookie") {
        return Ok(Some(cookie.value().to_string()));
    }

    bearer_token(req)
}

/// configure auth routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(login)
        .service(refresh_token)
        .service(create_user)
        .service(get_users)
        .service(get_logged_in_user)
        .service(logout);
}
