//! Content handlers: manifest seeding and published-content reads.

mod get_content;
mod seed_content;

pub use get_content::{GetContentHandler, GetContentQuery};
pub use seed_content::{SeedContentHandler, SeedError, SeedReport};
