//! HTTP routes for quote endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    close_wizard, estimate_quote, get_wizard, next_step, previous_step, reset_wizard,
    start_wizard, submit_quote, toggle_compliance, update_answers, QuoteHandlers,
};

/// Creates the quote router, mounted under `/api/quote`.
pub fn quote_routes(handlers: QuoteHandlers) -> Router {
    Router::new()
        .route("/estimate", post(estimate_quote))
        .route("/wizards", post(start_wizard))
        .route("/wizards/:id", get(get_wizard).delete(close_wizard))
        .route("/wizards/:id/answers", put(update_answers))
        .route("/wizards/:id/compliance/:need", post(toggle_compliance))
        .route("/wizards/:id/next", post(next_step))
        .route("/wizards/:id/back", post(previous_step))
        .route("/wizards/:id/submit", post(submit_quote))
        .route("/wizards/:id/reset", post(reset_wizard))
        .with_state(handlers)
}
