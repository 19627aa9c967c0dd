use actix_web::FromRequest;
use actix_web::{Error, HttpRequest, dev::Payload, web};
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::pin::Pin;

use crate::auth::jwt;
use crate::db::users as user_db;
use crate::models::users;

/// Extractor gating a handler on a valid session token.
///
/// The wrapped model is the current state of the user's row, not the
/// claims snapshot — a deleted account is rejected even while its token
/// is still within its lifetime.
pub struct AuthenticatedUser(pub users::Model);

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // 1. Extract the Bearer token from the Authorization header.
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| {
                    actix_web::error::ErrorUnauthorized("Missing Authorization header")
                })?;

            let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                actix_web::error::ErrorUnauthorized("Authorization header must be: Bearer <token>")
            })?;

            // 2. Get the signing secret from app data.
            let secret = req.app_data::<web::Data<JwtSecret>>().ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("JWT secret not configured")
            })?;

            // 3. Validate the token.
            let claims = jwt::validate_token(token, &secret.0)
                .map_err(|e| actix_web::error::ErrorUnauthorized(format!("Invalid token: {e}")))?;

            let user_id = claims
                .user_id()
                .map_err(actix_web::error::ErrorUnauthorized)?;

            // 4. Get the database connection.
            let db = req
                .app_data::<web::Data<DatabaseConnection>>()
                .ok_or_else(|| {
                    actix_web::error::ErrorInternalServerError("Database not configured")
                })?;

            // 5. The account must still exist.
            let user = user_db::get_user_by_id(db.get_ref(), user_id)
                .await
                .map_err(|e| {
                    actix_web::error::ErrorInternalServerError(format!("Database error: {e}"))
                })?
                .ok_or_else(|| {
                    actix_web::error::ErrorUnauthorized("Account no longer exists")
                })?;

            Ok(AuthenticatedUser(user))
        })
    }
}

/// Wrapper type to store the JWT secret in Actix app data.
#[derive(Clone)]
pub struct JwtSecret(pub String);
