//! OpenAPI document for the HTTP surface.

use utoipa::OpenApi;

use super::handlers;
use super::handlers::HealthResponse;
use crate::error::ErrorBody;
use crate::store::Item;

/// Generated API documentation, served at `/api-docs/openapi.json` and
/// browsable at `/docs`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Item API",
        description = "Health check plus a placeholder CRUD resource backed by memory"
    ),
    paths(
        handlers::health,
        handlers::list_items,
        handlers::get_item,
        handlers::create_item,
        handlers::update_item,
        handlers::delete_item
    ),
    components(schemas(Item, ErrorBody, HealthResponse)),
    tags(
        (name = "system", description = "Service probes"),
        (name = "items", description = "In-memory item CRUD")
    )
)]
pub struct ApiDoc;

/// URL the OpenAPI JSON is served from.
pub const OPENAPI_URL: &str = "/api-docs/openapi.json";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        assert!(paths.contains(&"/health"));
        assert!(paths.contains(&"/api/items"));
        assert!(paths.contains(&"/api/items/{id}"));
    }

    #[test]
    fn document_carries_item_schema() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        assert!(schemas.contains_key("Item"));
        assert!(schemas.contains_key("ErrorBody"));
    }
}
