mod handlers;
mod middleware;

pub use handlers::ErrorBody;
pub use middleware::ServerConfig;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::db::Database;

pub fn create_router(db: Database, config: &ServerConfig) -> Router {
    let api = Router::new()
        // Content
        .route("/collections", get(handlers::list_collections))
        .route("/lookbook", get(handlers::list_lookbook))
        // Health
        .route("/health", get(handlers::health));

    let mut router = Router::new().nest("/api", api);

    // Anything that is not an API route is part of the single-page front end
    if let Some(public_dir) = &config.public_dir {
        router = router.fallback_service(middleware::static_site(public_dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_layer(config))
        .with_state(db)
}
