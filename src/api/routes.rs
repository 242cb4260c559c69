//! HTTP API route definitions.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::docs::{ApiDoc, OPENAPI_URL};
use super::handlers::{
    create_item, delete_item, get_item, health, list_items, metrics_text, update_item, AppState,
};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Probes
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        // CRUD resource
        .nest("/api", item_router())
        // Documentation
        .merge(SwaggerUi::new("/docs").url(OPENAPI_URL, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Item routes, relative to the `/api` prefix.
fn item_router() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
}
