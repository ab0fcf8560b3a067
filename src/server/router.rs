//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module registers the source endpoints with their OpenAPI specifications and serves
//! Swagger UI at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// Handlers sharing a path are registered together so their methods merge into one route.
///
/// # Registered Endpoints
/// - `GET|POST /api/sources` - List sources, create or request creation
/// - `GET /api/sources/search` - Full-text search
/// - `GET /api/sources/types` - Distinct source types
/// - `GET /api/sources/authors` - Authors with source counts
/// - `GET|PUT|DELETE /api/sources/{id}` - Details, update, delete
/// - `POST|DELETE /api/sources/{id}/events/{event_id}` - Link management
/// - `GET /api/sources/audit/urls` - Malformed URL report
/// - `GET /api/sources/audit/duplicates` - Near-duplicate name report
///
/// The OpenAPI specification is available at `/api/docs/openapi.json`.
///
/// # Example
/// ```ignore
/// let router = routes().with_state(AppState::from((db, config.policy)));
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Chronicle", description = "Chronicle source API"), tags(
        (name = controller::source::SOURCE_TAG, description = "Source catalogue and moderation routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(
            controller::source::list_sources,
            controller::source::create_source
        ))
        .routes(routes!(controller::source::search_sources))
        .routes(routes!(controller::source::list_source_types))
        .routes(routes!(controller::source::list_source_authors))
        .routes(routes!(
            controller::source::get_source,
            controller::source::update_source,
            controller::source::delete_source
        ))
        .routes(routes!(
            controller::source::link_event,
            controller::source::unlink_event
        ))
        .routes(routes!(controller::source::check_urls))
        .routes(routes!(controller::source::find_duplicates))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
