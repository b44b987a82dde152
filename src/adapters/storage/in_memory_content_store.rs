//! In-memory content store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::content::{ContentCollection, ContentDocument, Slug};
use crate::domain::foundation::{ContentId, DomainError, ErrorCode};
use crate::ports::{ContentStore, UpsertOutcome};

#[derive(Debug, Clone, Default)]
pub struct InMemoryContentStore {
    documents: Arc<RwLock<HashMap<ContentId, ContentDocument>>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }
}

fn slug_taken(
    documents: &HashMap<ContentId, ContentDocument>,
    document: &ContentDocument,
) -> bool {
    documents.values().any(|d| {
        d.id != document.id && d.collection == document.collection && d.slug == document.slug
    })
}

fn duplicate_slug(document: &ContentDocument) -> DomainError {
    DomainError::new(
        ErrorCode::DuplicateSlug,
        format!(
            "{} already has a document with slug '{}'",
            document.collection, document.slug
        ),
    )
    .with_detail("collection", document.collection.as_str())
    .with_detail("slug", document.slug.as_str())
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn insert(&self, document: &ContentDocument) -> Result<(), DomainError> {
        let mut documents = self.documents.write().await;
        if slug_taken(&documents, document) {
            return Err(duplicate_slug(document));
        }
        documents.insert(document.id, document.clone());
        Ok(())
    }

    async fn update(&self, document: &ContentDocument) -> Result<(), DomainError> {
        let mut documents = self.documents.write().await;
        if !documents.contains_key(&document.id) {
            return Err(DomainError::new(
                ErrorCode::ContentNotFound,
                format!("Content {} not found", document.id),
            ));
        }
        if slug_taken(&documents, document) {
            return Err(duplicate_slug(document));
        }
        documents.insert(document.id, document.clone());
        Ok(())
    }

    async fn upsert_by_slug(
        &self,
        document: &ContentDocument,
    ) -> Result<UpsertOutcome, DomainError> {
        let mut documents = self.documents.write().await;
        let existing = documents
            .values_mut()
            .find(|d| d.collection == document.collection && d.slug == document.slug);

        match existing {
            Some(existing) => {
                if existing.merge_from(document) {
                    Ok(UpsertOutcome::Updated)
                } else {
                    Ok(UpsertOutcome::Unchanged)
                }
            }
            None => {
                documents.insert(document.id, document.clone());
                Ok(UpsertOutcome::Inserted)
            }
        }
    }

    async fn delete(&self, id: ContentId) -> Result<(), DomainError> {
        self.documents.write().await.remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: ContentId) -> Result<Option<ContentDocument>, DomainError> {
        Ok(self.documents.read().await.get(&id).cloned())
    }

    async fn find_by_slug(
        &self,
        collection: ContentCollection,
        slug: &Slug,
    ) -> Result<Option<ContentDocument>, DomainError> {
        Ok(self
            .documents
            .read()
            .await
            .values()
            .find(|d| d.collection == collection && &d.slug == slug)
            .cloned())
    }

    async fn list(
        &self,
        collection: ContentCollection,
    ) -> Result<Vec<ContentDocument>, DomainError> {
        let mut found: Vec<_> = self
            .documents
            .read()
            .await
            .values()
            .filter(|d| d.collection == collection)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(found)
    }
}
