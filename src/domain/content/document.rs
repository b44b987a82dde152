//! CMS documents backing the marketing pages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{ContentId, Timestamp, ValidationError};

const MAX_SLUG_LEN: usize = 120;

/// Table a document lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentCollection {
    BlogPosts,
    BlogCategories,
    Pages,
    PageSections,
}

impl ContentCollection {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentCollection::BlogPosts => "blog_posts",
            ContentCollection::BlogCategories => "blog_categories",
            ContentCollection::Pages => "pages",
            ContentCollection::PageSections => "page_sections",
        }
    }
}

impl fmt::Display for ContentCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentCollection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blog_posts" | "blog-posts" => Ok(ContentCollection::BlogPosts),
            "blog_categories" | "blog-categories" => Ok(ContentCollection::BlogCategories),
            "pages" => Ok(ContentCollection::Pages),
            "page_sections" | "page-sections" => Ok(ContentCollection::PageSections),
            other => Err(ValidationError::invalid_format(
                "collection",
                format!("unknown collection '{}'", other),
            )),
        }
    }
}

/// URL slug: lowercase ASCII letters, digits and single hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::empty_field("slug"));
        }
        let well_formed = value.len() <= MAX_SLUG_LEN
            && value
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            && !value.starts_with('-')
            && !value.ends_with('-')
            && !value.contains("--");
        if !well_formed {
            return Err(ValidationError::invalid_format(
                "slug",
                format!("'{}' is not a lowercase kebab-case slug", value),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Slug {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document in the hosted content store.
///
/// Collection-specific attributes (body, excerpt, section ordering, the
/// slug of a parent page or category) live in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDocument {
    pub id: ContentId,
    pub collection: ContentCollection,
    pub slug: Slug,
    pub title: String,
    pub fields: serde_json::Value,
    pub published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ContentDocument {
    /// Creates a new unpublished document.
    pub fn new(
        collection: ContentCollection,
        slug: Slug,
        title: impl Into<String>,
        fields: serde_json::Value,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        let now = Timestamp::now();
        Ok(Self {
            id: ContentId::new(),
            collection,
            slug,
            title,
            fields,
            published: false,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn publish(mut self) -> Self {
        self.published = true;
        self
    }

    /// Copies content from `incoming` while keeping identity and creation
    /// time. Returns whether anything changed.
    pub fn merge_from(&mut self, incoming: &ContentDocument) -> bool {
        let changed = self.title != incoming.title
            || self.fields != incoming.fields
            || self.published != incoming.published;
        if changed {
            self.title = incoming.title.clone();
            self.fields = incoming.fields.clone();
            self.published = incoming.published;
            self.updated_at = Timestamp::now();
        }
        changed
    }
}
