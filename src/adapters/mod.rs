//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - REST API (axum)
//! - `intake` - Consultation dispatchers (simulated, signed HTTP, mock)
//! - `storage` - In-memory wizard and content stores

pub mod http;
pub mod intake;
pub mod storage;

pub use intake::{dispatcher_from_config, HttpIntakeDispatcher, MockDispatcher, SimulatedDispatcher};
pub use storage::{InMemoryContentStore, InMemoryWizardStore};
