//! HTTP API handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::error::{ApiError, ErrorBody};
use crate::metrics;
use crate::store::{Fields, Item, ItemStore};

/// Application state shared with handlers.
#[derive(Clone, Default)]
pub struct AppState {
    /// Item records.
    pub store: ItemStore,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create app state over `store`.
    pub fn new(store: ItemStore) -> Self {
        Self {
            store,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Status: "ok".
    #[schema(example = "ok")]
    pub status: String,
}

/// Path ids that are not plain non-negative integers match nothing.
fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Prometheus scrape endpoint.
pub async fn metrics_text(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => ApiError::NotFound.into_response(),
    }
}

/// List every item in insertion order.
#[utoipa::path(
    get,
    path = "/api/items",
    tag = "items",
    responses(
        (status = 200, description = "All items", body = [Item])
    )
)]
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    Json(state.store.list().await)
}

/// Fetch one item.
#[utoipa::path(
    get,
    path = "/api/items/{id}",
    tag = "items",
    params(("id" = String, Path, description = "Item id")),
    responses(
        (status = 200, description = "The item", body = Item),
        (status = 404, description = "No such item", body = ErrorBody)
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let found = match parse_id(&id) {
        Some(id) => state.store.get(id).await,
        None => None,
    };

    found.map(Json).ok_or_else(|| {
        debug!(id = %id, "Item not found");
        metrics::inc_items_not_found("get");
        ApiError::NotFound
    })
}

/// Create an item from arbitrary JSON fields.
#[utoipa::path(
    post,
    path = "/api/items",
    tag = "items",
    request_body(content = serde_json::Value, description = "Item fields", content_type = "application/json"),
    responses(
        (status = 201, description = "Created item with its assigned id", body = Item)
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    Json(fields): Json<Fields>,
) -> impl IntoResponse {
    let item = state.store.create(fields).await;
    debug!(id = item.id, "Item created");
    metrics::inc_items_created();
    (StatusCode::CREATED, Json(item))
}

/// Shallow-merge fields into an existing item.
#[utoipa::path(
    put,
    path = "/api/items/{id}",
    tag = "items",
    params(("id" = String, Path, description = "Item id")),
    request_body(content = serde_json::Value, description = "Fields to overwrite", content_type = "application/json"),
    responses(
        (status = 200, description = "Merged item", body = Item),
        (status = 404, description = "No such item", body = ErrorBody)
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<Fields>,
) -> Result<Json<Item>, ApiError> {
    let updated = match parse_id(&id) {
        Some(id) => state.store.update(id, fields).await,
        None => None,
    };

    match updated {
        Some(item) => {
            debug!(id = item.id, "Item updated");
            metrics::inc_items_updated();
            Ok(Json(item))
        }
        None => {
            debug!(id = %id, "Item not found");
            metrics::inc_items_not_found("update");
            Err(ApiError::NotFound)
        }
    }
}

/// Delete an item. Succeeds whether or not it existed.
#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    tag = "items",
    params(("id" = String, Path, description = "Item id")),
    responses(
        (status = 204, description = "Deleted, or never existed")
    )
)]
pub async fn delete_item(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    if let Some(id) = parse_id(&id) {
        if state.store.delete(id).await {
            debug!(id, "Item deleted");
            metrics::inc_items_deleted();
        }
    }
    StatusCode::NO_CONTENT
}
