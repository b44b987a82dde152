//! Content store port.
//!
//! The hosted backend-as-a-service behind the marketing pages, reduced to
//! document CRUD plus lookup by slug within a collection.
//!
//! # Design
//!
//! - **Slug unique per collection**: `insert` refuses a second document with
//!   the same `(collection, slug)`
//! - **Upsert by slug**: seeding can run repeatedly without duplicates

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::content::{ContentCollection, ContentDocument, Slug};
use crate::domain::foundation::{ContentId, DomainError};

/// What `upsert_by_slug` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    Inserted,
    Updated,
    Unchanged,
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Insert a new document.
    ///
    /// # Errors
    ///
    /// - `DuplicateSlug` if the collection already has the slug
    async fn insert(&self, document: &ContentDocument) -> Result<(), DomainError>;

    /// Replace an existing document by id.
    ///
    /// # Errors
    ///
    /// - `ContentNotFound` if no document has this id
    async fn update(&self, document: &ContentDocument) -> Result<(), DomainError>;

    /// Insert, or merge into the document that already has this slug.
    async fn upsert_by_slug(&self, document: &ContentDocument)
        -> Result<UpsertOutcome, DomainError>;

    /// Delete a document. Deleting an unknown id is not an error.
    async fn delete(&self, id: ContentId) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: ContentId) -> Result<Option<ContentDocument>, DomainError>;

    async fn find_by_slug(
        &self,
        collection: ContentCollection,
        slug: &Slug,
    ) -> Result<Option<ContentDocument>, DomainError>;

    /// All documents in a collection, ordered by slug.
    async fn list(&self, collection: ContentCollection)
        -> Result<Vec<ContentDocument>, DomainError>;
}
