//! In-memory storage adapters.

mod in_memory_content_store;
mod in_memory_wizard_store;

pub use in_memory_content_store::InMemoryContentStore;
pub use in_memory_wizard_store::InMemoryWizardStore;
