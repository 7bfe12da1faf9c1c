use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    archive_handler, create_paste_handler, delete_paste_handler, delete_without_id_handler,
    health_handler, index_handler, show_paste_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    /// Builds the router. Unsupported methods on a known path get `405`.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", get(index_handler))
            .route("/health", get(health_handler))
            .route("/archive", get(archive_handler))
            .route("/archive/", get(archive_handler))
            .route(
                "/update/",
                post(create_paste_handler).delete(delete_without_id_handler),
            )
            .route("/update/{id}", delete(delete_paste_handler))
            .route("/{id}", get(show_paste_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
