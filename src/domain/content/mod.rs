//! Content domain module.
//!
//! Documents for the marketing site's blog and CMS-driven pages.

mod document;

pub use document::{ContentCollection, ContentDocument, Slug};
