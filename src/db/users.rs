use sea_orm::*;

use crate::models::users;

/// Fetch a user by username.
pub async fn find_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(db)
        .await
}

/// Fetch a single user by ID.
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

/// Seed the admin account if it does not exist yet (first boot).
pub async fn ensure_admin(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
    name: &str,
) -> Result<(), DbErr> {
    if find_by_username(db, username).await?.is_some() {
        return Ok(());
    }

    let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| DbErr::Custom(format!("bcrypt error: {e}")))?;

    let new_user = users::ActiveModel {
        username: Set(username.to_string()),
        password: Set(hash),
        name: Set(name.to_string()),
        is_admin: Set(true),
        ..Default::default()
    };
    new_user.insert(db).await?;

    tracing::info!(username, "created admin user");
    Ok(())
}
