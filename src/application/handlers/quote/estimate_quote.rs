//! EstimateQuoteHandler - Stateless pricing preview.

use crate::domain::pricing::{estimate, PricingResult};
use crate::domain::quote::FormAnswers;

#[derive(Debug, Clone)]
pub struct EstimateQuoteQuery {
    pub answers: FormAnswers,
}

/// Prices an answer record without touching any wizard. Incomplete records
/// are priced too: an unselected industry contributes zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimateQuoteHandler;

impl EstimateQuoteHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, query: EstimateQuoteQuery) -> PricingResult {
        estimate(&query.answers)
    }
}
