//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ConsultationDispatcher` - Hands submitted quote requests to intake
//! - `WizardStore` - Session storage for in-progress wizards
//! - `ContentStore` - CMS documents behind the marketing pages

mod consultation_dispatcher;
mod content_store;
mod wizard_store;

pub use consultation_dispatcher::{
    ConsultationDispatcher, ConsultationRequest, DispatchError, DispatchReceipt,
};
pub use content_store::{ContentStore, UpsertOutcome};
pub use wizard_store::{WizardStore, WizardUpdate};
