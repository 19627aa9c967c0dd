use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use agency_admin_backend::auth::middleware::JwtSecret;
use agency_admin_backend::cache::CatalogCache;
use agency_admin_backend::create_pool;
use agency_admin_backend::db::users as user_db;
use agency_admin_backend::handlers;
use agency_admin_backend::storage::{self, ImageStore};
use agency_admin_backend::sync::SyncNotifier;
use dotenv::dotenv;
use migration::{Migrator, MigratorTrait};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let db = create_pool().await;
    Migrator::up(&db, None)
        .await
        .expect("Failed to run database migrations");

    // Seed the admin account on first boot.
    let admin_username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let admin_password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        tracing::warn!("ADMIN_PASSWORD not set, seeding default credentials");
        "admin".to_string()
    });
    user_db::ensure_admin(&db, &admin_username, &admin_password, "Administrator")
        .await
        .expect("Failed to seed admin user");

    let db_data = web::Data::new(db);

    let portfolio_dir =
        std::env::var("PORTFOLIO_DIR").unwrap_or_else(|_| "portfolio_images".to_string());
    let store = ImageStore::new(&portfolio_dir)?;
    tracing::info!(dir = %portfolio_dir, "using portfolio image directory");
    let store_data = web::Data::new(store);

    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let secret_data = web::Data::new(JwtSecret(jwt_secret));

    let notifier_data = web::Data::new(SyncNotifier::from_env());
    let cache_data = web::Data::new(CatalogCache::from_env());

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_addr = format!("0.0.0.0:{port}");
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(db_data.clone())
            .app_data(store_data.clone())
            .app_data(secret_data.clone())
            .app_data(notifier_data.clone())
            .app_data(cache_data.clone())
            .app_data(web::PayloadConfig::new(storage::MAX_IMAGE_BYTES))
            .route(
                "/uploads/portfolio/{filename}",
                web::get().to(handlers::portfolio::serve_image),
            )
            .service(web::scope("/api").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
