use actix_files::NamedFile;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::CatalogCache;
use crate::db::portfolio as portfolio_db;
use crate::models::portfolio::{CreatePortfolioItem, UpdatePortfolioItem};
use crate::storage::{self, ImageStore};
use crate::sync::SyncNotifier;

/// GET /api/portfolio — list all portfolio items (requires authentication).
pub async fn get_items(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CatalogCache>,
) -> impl Responder {
    if let Some(items) = cache.get().await {
        return HttpResponse::Ok().json(items.as_ref());
    }

    match portfolio_db::get_portfolio_items(db.get_ref()).await {
        Ok(items) => {
            cache.set(items.clone()).await;
            HttpResponse::Ok().json(items)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch portfolio items: {e}"),
        })),
    }
}

/// GET /api/portfolio/{id} — get a single portfolio item.
pub async fn get_item(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> impl Responder {
    let id = path.into_inner();
    match portfolio_db::get_portfolio_item(db.get_ref(), id).await {
        Ok(Some(item)) => HttpResponse::Ok().json(item),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Portfolio item {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// POST /api/portfolio — add a portfolio item, replacing whatever occupies
/// its category.
pub async fn create_item(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    store: web::Data<ImageStore>,
    cache: web::Data<CatalogCache>,
    notifier: web::Data<SyncNotifier>,
    body: web::Json<CreatePortfolioItem>,
) -> impl Responder {
    match portfolio_db::add_portfolio_item(db.get_ref(), store.get_ref(), body.into_inner()).await
    {
        Ok(item) => {
            after_catalog_mutation(db.get_ref(), cache.get_ref(), notifier.get_ref()).await;
            HttpResponse::Created().json(item)
        }
        Err(e) => e.response(),
    }
}

/// PUT /api/portfolio/{id} — update a portfolio item. Omitting
/// `image_filename` keeps the current image.
pub async fn update_item(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    store: web::Data<ImageStore>,
    cache: web::Data<CatalogCache>,
    notifier: web::Data<SyncNotifier>,
    path: web::Path<i32>,
    body: web::Json<UpdatePortfolioItem>,
) -> impl Responder {
    let id = path.into_inner();
    match portfolio_db::update_portfolio_item(db.get_ref(), store.get_ref(), id, body.into_inner())
        .await
    {
        Ok(item) => {
            after_catalog_mutation(db.get_ref(), cache.get_ref(), notifier.get_ref()).await;
            HttpResponse::Ok().json(item)
        }
        Err(e) => e.response(),
    }
}

/// DELETE /api/portfolio/{id} — delete a portfolio item and its image.
pub async fn delete_item(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    store: web::Data<ImageStore>,
    cache: web::Data<CatalogCache>,
    notifier: web::Data<SyncNotifier>,
    path: web::Path<i32>,
) -> impl Responder {
    let id = path.into_inner();
    match portfolio_db::delete_portfolio_item(db.get_ref(), store.get_ref(), id).await {
        Ok(true) => {
            after_catalog_mutation(db.get_ref(), cache.get_ref(), notifier.get_ref()).await;
            HttpResponse::Ok().json(serde_json::json!({
                "message": format!("Portfolio item {id} deleted"),
            }))
        }
        Ok(false) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Portfolio item {id} not found"),
        })),
        Err(e) => e.response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub filename: String,
}

/// POST /api/portfolio/images?filename=... — store an uploaded image and
/// return its generated name, to be referenced by a later create/update.
pub async fn upload_image(
    _user: AuthenticatedUser,
    store: web::Data<ImageStore>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> impl Responder {
    if body.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "No image data uploaded",
        }));
    }

    match store.save(&body, &query.filename).await {
        Ok(stored_name) => HttpResponse::Created().json(serde_json::json!({
            "filename": stored_name,
        })),
        Err(e) => e.response(),
    }
}

/// GET /uploads/portfolio/{filename} — serve a portfolio image, synthesizing
/// a placeholder when the file is missing (public, used by the site).
pub async fn serve_image(
    req: HttpRequest,
    store: web::Data<ImageStore>,
    path: web::Path<String>,
) -> impl Responder {
    let filename = path.into_inner();

    let Some(full_path) = store.resolve(&filename) else {
        return HttpResponse::NotFound().json(serde_json::json!({
            "error": "Image not found",
        }));
    };

    if store.exists(&filename).await {
        match NamedFile::open_async(&full_path).await {
            Ok(file) => return file.into_response(&req),
            Err(e) => tracing::warn!(file = %filename, "failed to open stored image: {e}"),
        }
    }

    match storage::placeholder_jpeg(&filename) {
        Ok(bytes) => {
            // Keep the synthesized file so later requests hit the disk copy.
            if ImageStore::allowed_file(&filename) {
                if let Err(e) = store.persist(&filename, &bytes).await {
                    tracing::warn!(file = %filename, "failed to persist placeholder: {e}");
                }
            }
            HttpResponse::Ok().content_type("image/jpeg").body(bytes)
        }
        Err(e) => {
            tracing::error!(file = %filename, "failed to synthesize placeholder: {e}");
            HttpResponse::NotFound().json(serde_json::json!({
                "error": "Image not found",
            }))
        }
    }
}

/// Post-commit side effects shared by every catalog mutation: drop the
/// cached listing, then hand the fresh catalog to the sync notifier on a
/// detached task so the response never waits on the external consumer.
async fn after_catalog_mutation(
    db: &DatabaseConnection,
    cache: &CatalogCache,
    notifier: &SyncNotifier,
) {
    cache.invalidate().await;

    match portfolio_db::get_portfolio_items(db).await {
        Ok(items) => {
            let notifier = notifier.clone();
            tokio::spawn(async move {
                notifier.notify(&items).await;
            });
        }
        Err(e) => tracing::error!("failed to load portfolio snapshot for sync: {e}"),
    }
}
