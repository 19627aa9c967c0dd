use sea_orm::*;

use crate::models::contact_messages;

/// Fetch all contact messages newest-first.
pub async fn get_contact_messages(
    db: &DatabaseConnection,
) -> Result<Vec<contact_messages::Model>, DbErr> {
    contact_messages::Entity::find()
        .order_by_desc(contact_messages::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch the most recent contact messages (dashboard).
pub async fn get_recent_messages(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<contact_messages::Model>, DbErr> {
    contact_messages::Entity::find()
        .order_by_desc(contact_messages::Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await
}
