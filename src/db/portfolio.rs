use sea_orm::sea_query::{Expr, Func};
use sea_orm::*;

use crate::error::ApiError;
use crate::models::portfolio::{self, Category, CreatePortfolioItem, UpdatePortfolioItem};
use crate::storage::ImageStore;

/// Fetch all portfolio items in creation order.
pub async fn get_portfolio_items(
    db: &DatabaseConnection,
) -> Result<Vec<portfolio::Model>, DbErr> {
    portfolio::Entity::find()
        .order_by_asc(portfolio::Column::Id)
        .all(db)
        .await
}

/// Fetch a single portfolio item by ID.
pub async fn get_portfolio_item(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<portfolio::Model>, DbErr> {
    portfolio::Entity::find_by_id(id).one(db).await
}

/// Add a portfolio item, evicting whatever currently occupies its category.
///
/// The category is normalized first; all rows matching it (compared
/// case-insensitively, so drifted rows get repaired too) are purged along
/// with their image files before the new row is inserted. Runs inside one
/// transaction; image deletions are best-effort and never roll it back.
pub async fn add_portfolio_item(
    db: &DatabaseConnection,
    store: &ImageStore,
    input: CreatePortfolioItem,
) -> Result<portfolio::Model, ApiError> {
    validate_fields(&input.title, &input.description, &input.category)?;
    if input.image_filename.trim().is_empty() {
        return Err(ApiError::Validation("image_filename is required".to_string()));
    }

    let category = Category::normalize(&input.category);

    let txn = db.begin().await?;

    let stale = find_in_category(&txn, category).await?;
    purge_items(&txn, store, stale).await?;

    let new_item = portfolio::ActiveModel {
        title: Set(input.title),
        description: Set(input.description),
        category: Set(category.to_string()),
        image_filename: Set(input.image_filename),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let item = new_item.insert(&txn).await?;

    txn.commit().await?;

    tracing::info!(id = item.id, category = %item.category, "added portfolio item");
    Ok(item)
}

/// Update a portfolio item, keeping the one-per-category invariant.
///
/// Moving the item into another category, or replacing its image, evicts
/// every *other* occupant of the target category. A replaced image file is
/// removed; with no new image the existing file is kept untouched.
pub async fn update_portfolio_item(
    db: &DatabaseConnection,
    store: &ImageStore,
    id: i32,
    input: UpdatePortfolioItem,
) -> Result<portfolio::Model, ApiError> {
    validate_fields(&input.title, &input.description, &input.category)?;
    if input
        .image_filename
        .as_deref()
        .is_some_and(|f| f.trim().is_empty())
    {
        return Err(ApiError::Validation(
            "image_filename must not be empty when supplied".to_string(),
        ));
    }

    let txn = db.begin().await?;

    let target = portfolio::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("portfolio item {id}")))?;

    let category = Category::normalize(&input.category);
    let category_changed = !target.category.eq_ignore_ascii_case(category.as_str());

    if category_changed || input.image_filename.is_some() {
        let others: Vec<portfolio::Model> = find_in_category(&txn, category)
            .await?
            .into_iter()
            .filter(|item| item.id != id)
            .collect();
        purge_items(&txn, store, others).await?;
    }

    if let Some(new_image) = &input.image_filename {
        if *new_image != target.image_filename {
            discard_image(store, &target.image_filename).await;
        }
    }

    let mut active: portfolio::ActiveModel = target.into();
    active.title = Set(input.title);
    active.description = Set(input.description);
    active.category = Set(category.to_string());
    if let Some(new_image) = input.image_filename {
        active.image_filename = Set(new_image);
    }
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(id = updated.id, category = %updated.category, "updated portfolio item");
    Ok(updated)
}

/// Delete a portfolio item and its image. `Ok(false)` for an unknown ID.
pub async fn delete_portfolio_item(
    db: &DatabaseConnection,
    store: &ImageStore,
    id: i32,
) -> Result<bool, ApiError> {
    let txn = db.begin().await?;

    let Some(item) = portfolio::Entity::find_by_id(id).one(&txn).await? else {
        return Ok(false);
    };

    discard_image(store, &item.image_filename).await;
    portfolio::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(id, "deleted portfolio item");
    Ok(true)
}

/// All rows in `category`, compared case-insensitively on the stored text.
async fn find_in_category<C: ConnectionTrait>(
    conn: &C,
    category: Category,
) -> Result<Vec<portfolio::Model>, DbErr> {
    portfolio::Entity::find()
        .filter(
            Expr::expr(Func::lower(Expr::col(portfolio::Column::Category)))
                .eq(category.as_str().to_lowercase()),
        )
        .all(conn)
        .await
}

/// Remove the given rows and their backing images.
///
/// There should be at most one row, but every match is cleaned up so a
/// previously violated invariant gets repaired rather than perpetuated.
async fn purge_items<C: ConnectionTrait>(
    conn: &C,
    store: &ImageStore,
    items: Vec<portfolio::Model>,
) -> Result<(), DbErr> {
    for item in items {
        discard_image(store, &item.image_filename).await;
        portfolio::Entity::delete_by_id(item.id).exec(conn).await?;
        tracing::info!(
            id = item.id,
            category = %item.category,
            "evicted portfolio item from category"
        );
    }
    Ok(())
}

/// Best-effort image removal: a missing file is fine, an I/O failure is
/// logged and absorbed (orphaned files are tolerated, lost records are not).
async fn discard_image(store: &ImageStore, filename: &str) {
    match store.delete(filename).await {
        Ok(true) => tracing::info!(file = filename, "deleted portfolio image"),
        Ok(false) => tracing::debug!(file = filename, "portfolio image already absent"),
        Err(e) => tracing::warn!(file = filename, "failed to delete portfolio image: {e}"),
    }
}

fn validate_fields(title: &str, description: &str, category: &str) -> Result<(), ApiError> {
    for (value, field) in [
        (title, "title"),
        (description, "description"),
        (category, "category"),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::Validation(format!("{field} is required")));
        }
    }
    Ok(())
}
