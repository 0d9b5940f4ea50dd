use axum::{
    middleware,
    routing::{get, put},
    Router,
};

use crate::handlers::{
    contests, create_note, delete_note, get_note, hackathons, health_check, list_notes, news,
    reorder_notes, update_note,
};
use crate::middleware::request_logging_middleware;
use crate::services::AppState;

/// Create the main application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Cached feeds
        .route("/api/hackathons", get(hackathons))
        .route("/api/news", get(news))
        .route("/api/contests", get(contests))
        // Notes
        .route("/api/notes", get(list_notes).post(create_note))
        .route("/api/notes/order", put(reorder_notes))
        .route(
            "/api/notes/:id",
            get(get_note).put(update_note).delete(delete_note),
        )
        .layer(middleware::from_fn(request_logging_middleware))
        .with_state(state)
}
