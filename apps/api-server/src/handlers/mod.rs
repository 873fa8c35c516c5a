//! HTTP handlers and route configuration.

mod admin;
mod auth;
mod blog;
mod downloads;
mod health;

use actix_web::web;

/// Configure all application routes (the static `/posts` mount is added in
/// `main`, where the content path is known).
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        // Auth routes
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login)),
        )
        // Blog routes
        .route("/create-post", web::post().to(blog::create_post))
        .route("/update-post/{id}", web::patch().to(blog::update_post))
        .route("/blog", web::get().to(blog::list_posts))
        .route("/blog/{id}", web::get().to(blog::get_post))
        .route("/blog/{id}", web::delete().to(blog::delete_post))
        // Public downloads
        .route(
            "/downloads/{filename}",
            web::get().to(downloads::download_file),
        )
        // Admin routes
        .service(
            web::scope("/admin/database")
                .route("/backup", web::post().to(admin::backup))
                .route("/restore", web::post().to(admin::restore)),
        );
}
