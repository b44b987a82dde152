//! GetContentHandler - Read side for the marketing pages.
//!
//! Only published documents are visible.

use std::sync::Arc;

use crate::domain::content::{ContentCollection, ContentDocument, Slug};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::ContentStore;

#[derive(Debug, Clone)]
pub struct GetContentQuery {
    pub collection: ContentCollection,
    pub slug: Slug,
}

pub struct GetContentHandler {
    store: Arc<dyn ContentStore>,
}

impl GetContentHandler {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// # Errors
    ///
    /// `ContentNotFound` for unknown or unpublished documents.
    pub async fn handle(&self, query: GetContentQuery) -> Result<ContentDocument, DomainError> {
        self.store
            .find_by_slug(query.collection, &query.slug)
            .await?
            .filter(|doc| doc.published)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ContentNotFound,
                    format!("No published {} entry '{}'", query.collection, query.slug),
                )
            })
    }

    /// Published documents in a collection, ordered by slug.
    pub async fn list(&self, collection: ContentCollection) -> Result<Vec<ContentDocument>, DomainError> {
        let mut documents = self.store.list(collection).await?;
        documents.retain(|doc| doc.published);
        Ok(documents)
    }
}
