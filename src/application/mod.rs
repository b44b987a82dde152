//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (write) and queries (read) have separate handlers.

pub mod handlers;

pub use handlers::content::{
    GetContentHandler, GetContentQuery, SeedContentHandler, SeedError, SeedReport,
};
pub use handlers::quote::{
    CloseWizardCommand, CloseWizardHandler, Direction, EstimateQuoteHandler, EstimateQuoteQuery,
    EvictIdleWizardsHandler, GetWizardHandler, GetWizardQuery,
    NavigateWizardCommand, NavigateWizardHandler, QuoteHandlerError, ResetWizardCommand,
    ResetWizardHandler, StartWizardHandler, SubmitQuoteCommand, SubmitQuoteHandler,
    SubmitQuoteResult, ToggleComplianceCommand, ToggleComplianceHandler, ToggleComplianceResult,
    UpdateAnswersCommand, UpdateAnswersHandler,
};
