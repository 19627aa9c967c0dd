use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::contact_messages as message_db;

/// GET /api/messages — list contact messages newest-first.
pub async fn get_messages(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match message_db::get_contact_messages(db.get_ref()).await {
        Ok(messages) => HttpResponse::Ok().json(messages),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch contact messages: {e}"),
        })),
    }
}
