use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::orders as order_db;
use crate::models::orders::{OrderFilterQuery, Status, UpdateOrderStatus};

/// GET /api/orders — list orders, optionally filtered by status
/// (`?status=pending|in_progress|completed|all`).
pub async fn get_orders(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<OrderFilterQuery>,
) -> impl Responder {
    let filter = match query.status.as_deref() {
        None | Some("") | Some("all") => None,
        Some(raw) => match Status::parse(raw) {
            Some(status) => Some(status),
            None => {
                return HttpResponse::BadRequest().json(serde_json::json!({
                    "error": format!("unknown order status filter: {raw}"),
                }));
            }
        },
    };

    match order_db::get_orders(db.get_ref(), filter).await {
        Ok(orders) => HttpResponse::Ok().json(orders),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch orders: {e}"),
        })),
    }
}

/// GET /api/orders/{id} — get a single order.
pub async fn get_order(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> impl Responder {
    let id = path.into_inner();
    match order_db::get_order_by_id(db.get_ref(), id).await {
        Ok(Some(order)) => HttpResponse::Ok().json(order),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Order {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/orders/{id}/status — set an order's status.
pub async fn update_status(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
    body: web::Json<UpdateOrderStatus>,
) -> impl Responder {
    let id = path.into_inner();
    match order_db::update_order_status(db.get_ref(), id, body.into_inner().status).await {
        Ok(Some(order)) => HttpResponse::Ok().json(order),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Order {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update order status: {e}"),
        })),
    }
}
