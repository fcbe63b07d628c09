//! HTTP route definitions.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{
    create, create_form, delete, health, index, list, metrics, reset_database, update,
    update_form, AppState,
};

/// Create the gateway router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Pages and form submissions
        .route("/", get(index))
        .route("/inserir", get(create_form).post(create))
        .route("/listar", get(list))
        .route("/atualizar/:id", get(update_form).post(update))
        .route("/excluir/:id", post(delete))
        .route("/reset-database", get(reset_database))
        // Operational endpoints
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
