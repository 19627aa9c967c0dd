use sea_orm::*;

use crate::models::orders::{self, Status};

/// Fetch orders newest-first, optionally filtered by status.
pub async fn get_orders(
    db: &DatabaseConnection,
    status: Option<Status>,
) -> Result<Vec<orders::Model>, DbErr> {
    let mut query = orders::Entity::find().order_by_desc(orders::Column::CreatedAt);
    if let Some(status) = status {
        query = query.filter(orders::Column::Status.eq(status));
    }
    query.all(db).await
}

/// Fetch the most recent orders (dashboard).
pub async fn get_recent_orders(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<orders::Model>, DbErr> {
    orders::Entity::find()
        .order_by_desc(orders::Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await
}

/// Fetch a single order by ID.
pub async fn get_order_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<orders::Model>, DbErr> {
    orders::Entity::find_by_id(id).one(db).await
}

/// Count orders with the given status.
pub async fn count_orders_with_status(
    db: &DatabaseConnection,
    status: Status,
) -> Result<u64, DbErr> {
    orders::Entity::find()
        .filter(orders::Column::Status.eq(status))
        .count(db)
        .await
}

/// Set an order's status. `Ok(None)` when the order does not exist.
pub async fn update_order_status(
    db: &DatabaseConnection,
    id: i32,
    status: Status,
) -> Result<Option<orders::Model>, DbErr> {
    let Some(order) = orders::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let mut active: orders::ActiveModel = order.into();
    active.status = Set(status);
    active.update(db).await.map(Some)
}
