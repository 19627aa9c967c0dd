use actix_web::{HttpResponse, Responder, web};
use sea_orm::{DatabaseConnection, DbErr};

use crate::auth::middleware::AuthenticatedUser;
use crate::db::contact_messages as message_db;
use crate::db::orders as order_db;
use crate::db::portfolio as portfolio_db;
use crate::models::orders::Status;

/// GET /api/dashboard — the admin landing page payload: order counts per
/// status, recent orders and messages, and the full portfolio.
pub async fn get_dashboard(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match build_dashboard(db.get_ref()).await {
        Ok(payload) => HttpResponse::Ok().json(payload),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to build dashboard: {e}"),
        })),
    }
}

async fn build_dashboard(db: &DatabaseConnection) -> Result<serde_json::Value, DbErr> {
    let pending = order_db::count_orders_with_status(db, Status::Pending).await?;
    let in_progress = order_db::count_orders_with_status(db, Status::InProgress).await?;
    let completed = order_db::count_orders_with_status(db, Status::Completed).await?;
    let recent_orders = order_db::get_recent_orders(db, 5).await?;
    let contact_messages = message_db::get_recent_messages(db, 5).await?;
    let portfolio_items = portfolio_db::get_portfolio_items(db).await?;

    Ok(serde_json::json!({
        "pending_orders": pending,
        "in_progress_orders": in_progress,
        "completed_orders": completed,
        "recent_orders": recent_orders,
        "contact_messages": contact_messages,
        "portfolio_items": portfolio_items,
    }))
}

/// GET /api/notifications — pending-order count, polled by the UI.
pub async fn check_notifications(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match order_db::count_orders_with_status(db.get_ref(), Status::Pending).await {
        Ok(pending) => HttpResponse::Ok().json(serde_json::json!({
            "pending_orders": pending,
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to count pending orders: {e}"),
        })),
    }
}
