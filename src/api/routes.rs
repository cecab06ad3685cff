// API routes configuration
// Author: Gabriel Demetrios Lafis

use actix_web::web;

use super::handlers;

/// Configure API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            // Health check
            .route("/health", web::get().to(handlers::health_check))

            // Summaries
            .service(
                web::scope("/summarize")
                    .route("", web::post().to(handlers::summarize))
                    .route("/fallback", web::post().to(handlers::summarize_fallback))
            )
    );
}
