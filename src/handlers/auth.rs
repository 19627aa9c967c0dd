use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;

use crate::auth::jwt;
use crate::auth::middleware::{AuthenticatedUser, JwtSecret};
use crate::db::users as user_db;
use crate::models::users::{LoginRequest, UserResponse};

/// POST /api/auth/login — exchange credentials for a session token.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    secret: web::Data<JwtSecret>,
    body: web::Json<LoginRequest>,
) -> impl Responder {
    let input = body.into_inner();

    if input.username.trim().is_empty() || input.password.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Please enter both username and password",
        }));
    }

    match user_db::find_by_username(db.get_ref(), &input.username).await {
        Ok(Some(user)) if bcrypt::verify(&input.password, &user.password).unwrap_or(false) => {
            match jwt::issue_token(&user, &secret.0) {
                Ok(token) => {
                    tracing::info!(username = %user.username, "admin login");
                    HttpResponse::Ok().json(serde_json::json!({
                        "token": token,
                        "user": UserResponse::from(user),
                    }))
                }
                Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Failed to issue token: {e}"),
                })),
            }
        }
        // Unknown user and bad password answer identically.
        Ok(_) => HttpResponse::Unauthorized().json(serde_json::json!({
            "error": "Invalid username or password",
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/auth/me — the authenticated user's profile.
pub async fn me(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(UserResponse::from(user.0))
}

/// POST /api/auth/logout — tokens are stateless and expire on their own;
/// this endpoint exists for the UI flow and the audit log.
pub async fn logout(user: AuthenticatedUser) -> impl Responder {
    tracing::info!(username = %user.0.username, "admin logout");
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Logged out",
    }))
}
