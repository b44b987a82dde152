//! HTTP adapters - REST API implementations.
//!
//! Each area has its own HTTP adapter; `api_router` assembles them with the
//! shared tower-http layers.

pub mod content;
pub mod error;
pub mod quote;

pub use content::{content_routes, ContentHandlers};
pub use error::ErrorResponse;
pub use quote::{quote_routes, QuoteHandlers};

use axum::{routing::get, Json, Router};
use http::{HeaderValue, Method};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// Builds the full application router.
pub fn api_router(quote: QuoteHandlers, content: ContentHandlers, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/quote", quote_routes(quote))
        .nest("/api/content", content_routes(content))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&server.cors_origins_list()))
}

/// Browser access for the marketing site. Origins that are not valid
/// header values are skipped with a warning.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([http::header::CONTENT_TYPE])
}
