use crate::{
    AppState,
    handlers, // Import handlers module
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Creates the Axum router and associates routes with handlers.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/activities", post(handlers::post_activity))
        .route("/templates", get(handlers::list_templates))
        .route("/health", get(handlers::health))
        // Middleware Layers
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(64 * 1024)) // activities are small JSON documents
        .with_state(state) // Pass the application state
}
