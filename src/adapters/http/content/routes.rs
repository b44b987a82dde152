//! HTTP routes for content endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_content, list_content, ContentHandlers};

/// Creates the content router, mounted under `/api/content`.
pub fn content_routes(handlers: ContentHandlers) -> Router {
    Router::new()
        .route("/:collection", get(list_content))
        .route("/:collection/:slug", get(get_content))
        .with_state(handlers)
}
