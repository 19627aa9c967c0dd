pub mod auth;
pub mod dashboard;
pub mod messages;
pub mod orders;
pub mod portfolio;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes (login is the only unauthenticated endpoint) ──
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(auth::login))
            .route("/logout", web::post().to(auth::logout))
            .route("/me", web::get().to(auth::me)),
    );

    // ── Dashboard ──
    cfg.service(
        web::resource("/dashboard").route(web::get().to(dashboard::get_dashboard)),
    );
    cfg.service(
        web::resource("/notifications").route(web::get().to(dashboard::check_notifications)),
    );

    // ── Order routes ──
    cfg.service(
        web::scope("/orders")
            .route("", web::get().to(orders::get_orders))
            .route("/{id}", web::get().to(orders::get_order))
            .route("/{id}/status", web::put().to(orders::update_status)),
    );

    // ── Contact messages ──
    cfg.service(web::resource("/messages").route(web::get().to(messages::get_messages)));

    // ── Portfolio routes ──
    // "/images" is registered ahead of "/{id}" so uploads never collide
    // with the numeric item routes.
    cfg.service(
        web::scope("/portfolio")
            .route("", web::get().to(portfolio::get_items))
            .route("", web::post().to(portfolio::create_item))
            .route("/images", web::post().to(portfolio::upload_image))
            .route("/{id}", web::get().to(portfolio::get_item))
            .route("/{id}", web::put().to(portfolio::update_item))
            .route("/{id}", web::delete().to(portfolio::delete_item)),
    );
}
