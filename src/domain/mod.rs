//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `pricing` - Tier lookup tables and the quote estimator
//! - `quote` - Answer record, validation and the quote wizard aggregate
//! - `content` - CMS documents for blog posts and pages

pub mod content;
pub mod foundation;
pub mod pricing;
pub mod quote;
