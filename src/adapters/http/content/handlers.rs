//! HTTP handlers for published content.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::adapters::http::error::{domain_error_response, ErrorResponse};
use crate::application::handlers::content::{GetContentHandler, GetContentQuery};
use crate::domain::content::{ContentCollection, ContentDocument, Slug};
use crate::ports::ContentStore;

#[derive(Clone)]
pub struct ContentHandlers {
    get_handler: Arc<GetContentHandler>,
}

impl ContentHandlers {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            get_handler: Arc::new(GetContentHandler::new(store)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentListResponse {
    pub collection: ContentCollection,
    pub items: Vec<ContentDocument>,
}

/// GET /api/content/:collection
pub async fn list_content(
    State(handlers): State<ContentHandlers>,
    Path(collection): Path<String>,
) -> Response {
    let collection = match collection.parse::<ContentCollection>() {
        Ok(c) => c,
        Err(e) => return bad_request(e.to_string()),
    };

    match handlers.get_handler.list(collection).await {
        Ok(items) => {
            (StatusCode::OK, Json(ContentListResponse { collection, items })).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// GET /api/content/:collection/:slug
pub async fn get_content(
    State(handlers): State<ContentHandlers>,
    Path((collection, slug)): Path<(String, String)>,
) -> Response {
    let collection = match collection.parse::<ContentCollection>() {
        Ok(c) => c,
        Err(e) => return bad_request(e.to_string()),
    };
    let slug = match Slug::new(slug) {
        Ok(s) => s,
        Err(e) => return bad_request(e.to_string()),
    };

    match handlers
        .get_handler
        .handle(GetContentQuery { collection, slug })
        .await
    {
        Ok(document) => (StatusCode::OK, Json(document)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

fn bad_request(message: String) -> Response {
    ErrorResponse::bad_request(message).into_response_with(StatusCode::BAD_REQUEST)
}
