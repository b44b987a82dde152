//! SeedContentHandler - Loads a YAML manifest into the content store.
//!
//! Manifest layout:
//!
//! ```yaml
//! categories:
//!   - slug: automation
//!     title: Automation
//! posts:
//!   - slug: closing-the-books-faster
//!     title: Closing the books faster
//!     category: automation
//!     body: "..."
//! pages:
//!   - slug: about
//!     title: About
//! sections:
//!   - slug: about-hero
//!     title: Hero
//!     page: about
//!     position: 1
//! ```
//!
//! Any extra keys land in the document's `fields`. Documents are upserted by
//! slug, so running the same manifest twice changes nothing.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::content::{ContentCollection, ContentDocument, Slug};
use crate::domain::foundation::{DomainError, ValidationError};
use crate::ports::{ContentStore, UpsertOutcome};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed manifest: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Post '{post}' references unknown category '{category}'")]
    UnknownCategory { post: Slug, category: Slug },

    #[error("Section '{section}' references unknown page '{page}'")]
    UnknownPage { section: Slug, page: Slug },

    #[error("Slug '{slug}' appears more than once in {collection}")]
    DuplicateSlug {
        collection: ContentCollection,
        slug: Slug,
    },

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] DomainError),
}

/// One manifest entry. `reference` is the parent slug for posts and
/// sections.
#[derive(Debug, Clone, Deserialize)]
struct SeedEntry {
    slug: Slug,
    title: String,
    #[serde(default = "default_published")]
    published: bool,
    #[serde(default, alias = "category", alias = "page")]
    reference: Option<Slug>,
    #[serde(flatten)]
    fields: serde_json::Map<String, serde_json::Value>,
}

fn default_published() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedManifest {
    #[serde(default)]
    categories: Vec<SeedEntry>,
    #[serde(default)]
    posts: Vec<SeedEntry>,
    #[serde(default)]
    pages: Vec<SeedEntry>,
    #[serde(default)]
    sections: Vec<SeedEntry>,
}

impl SeedManifest {
    /// Upsert is keyed by slug, so a repeated slug would silently keep only
    /// the last entry.
    fn reject_duplicate_slugs(&self) -> Result<(), SeedError> {
        let collections = [
            (ContentCollection::BlogCategories, &self.categories),
            (ContentCollection::BlogPosts, &self.posts),
            (ContentCollection::Pages, &self.pages),
            (ContentCollection::PageSections, &self.sections),
        ];
        for (collection, entries) in collections {
            let mut seen = BTreeSet::new();
            let mut slugs = entries.iter().map(|e| &e.slug);
            if let Some(slug) = slugs.find(|slug| !seen.insert(*slug)) {
                return Err(SeedError::DuplicateSlug {
                    collection,
                    slug: slug.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Counts of what a seeding run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
}

impl SeedReport {
    fn record(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Inserted => self.inserted += 1,
            UpsertOutcome::Updated => self.updated += 1,
            UpsertOutcome::Unchanged => self.unchanged += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.inserted + self.updated + self.unchanged
    }
}

pub struct SeedContentHandler {
    store: Arc<dyn ContentStore>,
}

impl SeedContentHandler {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    pub async fn seed_file(&self, path: &Path) -> Result<SeedReport, SeedError> {
        let raw = tokio::fs::read_to_string(path).await?;
        let report = self.seed_str(&raw).await?;
        tracing::info!(
            path = %path.display(),
            inserted = report.inserted,
            updated = report.updated,
            unchanged = report.unchanged,
            "Content seeded"
        );
        Ok(report)
    }

    /// Validates every reference before writing anything.
    pub async fn seed_str(&self, raw: &str) -> Result<SeedReport, SeedError> {
        let manifest: SeedManifest = serde_yaml::from_str(raw)?;
        manifest.reject_duplicate_slugs()?;

        let categories = self
            .known_slugs(ContentCollection::BlogCategories, &manifest.categories)
            .await?;
        for post in &manifest.posts {
            if let Some(category) = &post.reference {
                if !categories.contains(category) {
                    return Err(SeedError::UnknownCategory {
                        post: post.slug.clone(),
                        category: category.clone(),
                    });
                }
            }
        }

        let pages = self
            .known_slugs(ContentCollection::Pages, &manifest.pages)
            .await?;
        for section in &manifest.sections {
            match &section.reference {
                Some(page) if pages.contains(page) => {}
                Some(page) => {
                    return Err(SeedError::UnknownPage {
                        section: section.slug.clone(),
                        page: page.clone(),
                    })
                }
                None => return Err(ValidationError::empty_field("page").into()),
            }
        }

        // Parents first so a partially applied run never leaves orphans
        let batches = [
            (ContentCollection::BlogCategories, &manifest.categories, None),
            (ContentCollection::BlogPosts, &manifest.posts, Some("category")),
            (ContentCollection::Pages, &manifest.pages, None),
            (ContentCollection::PageSections, &manifest.sections, Some("page")),
        ];

        let mut report = SeedReport::default();
        for (collection, entries, reference_key) in batches {
            for entry in entries {
                let document = to_document(collection, entry, reference_key)?;
                report.record(self.store.upsert_by_slug(&document).await?);
            }
        }
        Ok(report)
    }

    async fn known_slugs(
        &self,
        collection: ContentCollection,
        seeded: &[SeedEntry],
    ) -> Result<BTreeSet<Slug>, SeedError> {
        let mut slugs: BTreeSet<Slug> = seeded.iter().map(|e| e.slug.clone()).collect();
        slugs.extend(
            self.store
                .list(collection)
                .await?
                .into_iter()
                .map(|d| d.slug),
        );
        Ok(slugs)
    }
}

fn to_document(
    collection: ContentCollection,
    entry: &SeedEntry,
    reference_key: Option<&str>,
) -> Result<ContentDocument, SeedError> {
    let mut fields = entry.fields.clone();
    if let (Some(key), Some(reference)) = (reference_key, &entry.reference) {
        fields.insert(key.to_string(), serde_json::Value::from(reference.as_str()));
    }
    let document = ContentDocument::new(
        collection,
        entry.slug.clone(),
        entry.title.clone(),
        serde_json::Value::Object(fields),
    )?;
    Ok(if entry.published {
        document.publish()
    } else {
        document
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryContentStore;

    const MANIFEST: &str = r#"
categories:
  - slug: automation
    title: Automation
posts:
  - slug: closing-the-books-faster
    title: Closing the books faster
    category: automation
    excerpt: Month-end in days, not weeks.
  - slug: draft-post
    title: Draft
    published: false
pages:
  - slug: about
    title: About
sections:
  - slug: about-hero
    title: Hero
    page: about
    position: 1
"#;

    fn handler() -> (Arc<InMemoryContentStore>, SeedContentHandler) {
        let store = Arc::new(InMemoryContentStore::new());
        (store.clone(), SeedContentHandler::new(store))
    }

    #[tokio::test]
    async fn seeds_every_collection() {
        let (store, handler) = handler();

        let report = handler.seed_str(MANIFEST).await.unwrap();

        assert_eq!(report.inserted, 5);
        assert_eq!(report.total(), 5);
        assert_eq!(store.list(ContentCollection::BlogPosts).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn reseeding_is_idempotent() {
        let (store, handler) = handler();
        handler.seed_str(MANIFEST).await.unwrap();

        let report = handler.seed_str(MANIFEST).await.unwrap();

        assert_eq!(
            report,
            SeedReport {
                inserted: 0,
                updated: 0,
                unchanged: 5
            }
        );
        assert_eq!(store.len().await, 5);
    }

    #[tokio::test]
    async fn changed_entry_is_updated() {
        let (_, handler) = handler();
        handler.seed_str(MANIFEST).await.unwrap();

        let report = handler
            .seed_str(&MANIFEST.replace("title: About\n", "title: About Us\n"))
            .await
            .unwrap();

        assert_eq!(report.updated, 1);
        assert_eq!(report.unchanged, 4);
    }

    #[tokio::test]
    async fn extra_keys_and_references_land_in_fields() {
        let (store, handler) = handler();
        handler.seed_str(MANIFEST).await.unwrap();

        let slug = Slug::new("about-hero").unwrap();
        let section = store
            .find_by_slug(ContentCollection::PageSections, &slug)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(section.fields["page"], "about");
        assert_eq!(section.fields["position"], 1);
        assert!(section.published);
    }

    #[tokio::test]
    async fn unpublished_flag_is_respected() {
        let (store, handler) = handler();
        handler.seed_str(MANIFEST).await.unwrap();

        let slug = Slug::new("draft-post").unwrap();
        let draft = store
            .find_by_slug(ContentCollection::BlogPosts, &slug)
            .await
            .unwrap()
            .unwrap();
        assert!(!draft.published);
    }

    #[tokio::test]
    async fn unknown_category_rejects_whole_manifest() {
        let (store, handler) = handler();
        let manifest = r#"
posts:
  - slug: orphan
    title: Orphan
    category: missing
"#;

        let err = handler.seed_str(manifest).await.unwrap_err();

        assert!(matches!(err, SeedError::UnknownCategory { .. }));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn duplicate_slug_rejects_whole_manifest() {
        let (store, handler) = handler();
        let manifest = r#"
categories:
  - slug: automation
    title: Automation
posts:
  - slug: launch
    title: Launch
    category: automation
  - slug: launch
    title: Launch again
"#;

        let err = handler.seed_str(manifest).await.unwrap_err();

        match err {
            SeedError::DuplicateSlug { collection, slug } => {
                assert_eq!(collection, ContentCollection::BlogPosts);
                assert_eq!(slug.as_str(), "launch");
            }
            other => panic!("expected DuplicateSlug, got {other:?}"),
        }
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn same_slug_in_different_collections_is_fine() {
        let (_, handler) = handler();
        let report = handler
            .seed_str("categories:\n  - slug: about\n    title: About\npages:\n  - slug: about\n    title: About\n")
            .await
            .unwrap();
        assert_eq!(report.inserted, 2);
    }

    #[tokio::test]
    async fn category_already_in_store_satisfies_reference() {
        let (_, handler) = handler();
        handler
            .seed_str("categories:\n  - slug: news\n    title: News\n")
            .await
            .unwrap();

        let report = handler
            .seed_str("posts:\n  - slug: launch\n    title: Launch\n    category: news\n")
            .await
            .unwrap();

        assert_eq!(report.inserted, 1);
    }

    #[tokio::test]
    async fn section_without_page_is_invalid() {
        let (_, handler) = handler();
        let err = handler
            .seed_str("sections:\n  - slug: loose\n    title: Loose\n")
            .await
            .unwrap_err();
        assert!(matches!(err, SeedError::Invalid(_)));
    }

    #[tokio::test]
    async fn malformed_slug_is_a_parse_error() {
        let (_, handler) = handler();
        let err = handler
            .seed_str("pages:\n  - slug: Not A Slug\n    title: Bad\n")
            .await
            .unwrap_err();
        assert!(matches!(err, SeedError::Parse(_)));
    }

    #[tokio::test]
    async fn unknown_top_level_key_is_rejected() {
        let (_, handler) = handler();
        let err = handler.seed_str("users: []\n").await.unwrap_err();
        assert!(matches!(err, SeedError::Parse(_)));
    }
}
