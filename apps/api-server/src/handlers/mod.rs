//! HTTP handlers and route configuration.

mod auth;
mod feed;
mod health;
mod status;
mod upload;


use actix_web::web;

/// Configure all REST routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        // Accounts
        .route("/signup", web::post().to(auth::signup))
        .route("/login", web::post().to(auth::login))
        .service(
            web::resource("/status")
                .route(web::get().to(status::get_status))
                .route(web::patch().to(status::update_status)),
        )
        // Feed
        .route("/posts", web::get().to(feed::get_posts))
        .route("/post", web::post().to(feed::create_post))
        .service(
            web::resource("/post/{id}")
                .route(web::get().to(feed::get_post))
                .route(web::put().to(feed::update_post))
                .route(web::delete().to(feed::delete_post)),
        )
        .route("/post-image", web::put().to(upload::upload_image));
}
