//! HTTP adapter for the quote wizard and pricing preview.

mod dto;
mod handlers;
mod routes;

pub use dto::{EstimateResponse, SubmitQuoteResponse, ToggleComplianceResponse, WizardResponse};
pub use handlers::QuoteHandlers;
pub use routes::quote_routes;
