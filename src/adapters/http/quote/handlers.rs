//! HTTP handlers for quote endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::adapters::http::error::{status_for, ErrorResponse};
use crate::application::handlers::quote::{
    CloseWizardCommand, CloseWizardHandler, Direction, EstimateQuoteHandler, EstimateQuoteQuery, GetWizardHandler, GetWizardQuery,
    NavigateWizardCommand, NavigateWizardHandler, QuoteHandlerError, ResetWizardCommand,
    ResetWizardHandler, StartWizardHandler, SubmitQuoteCommand, SubmitQuoteHandler,
    ToggleComplianceCommand, ToggleComplianceHandler, UpdateAnswersCommand, UpdateAnswersHandler,
};
use crate::domain::foundation::WizardId;
use crate::domain::quote::{ComplianceNeed, FormAnswers, WizardError};
use crate::ports::{ConsultationDispatcher, WizardStore};

use super::dto::{EstimateResponse, SubmitQuoteResponse, ToggleComplianceResponse, WizardResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct QuoteHandlers {
    start_handler: Arc<StartWizardHandler>,
    get_handler: Arc<GetWizardHandler>,
    update_handler: Arc<UpdateAnswersHandler>,
    toggle_handler: Arc<ToggleComplianceHandler>,
    navigate_handler: Arc<NavigateWizardHandler>,
    submit_handler: Arc<SubmitQuoteHandler>,
    reset_handler: Arc<ResetWizardHandler>,
    close_handler: Arc<CloseWizardHandler>,
    estimate_handler: EstimateQuoteHandler,
}

impl QuoteHandlers {
    pub fn new(store: Arc<dyn WizardStore>, dispatcher: Arc<dyn ConsultationDispatcher>) -> Self {
        Self {
            start_handler: Arc::new(StartWizardHandler::new(store.clone())),
            get_handler: Arc::new(GetWizardHandler::new(store.clone())),
            update_handler: Arc::new(UpdateAnswersHandler::new(store.clone())),
            toggle_handler: Arc::new(ToggleComplianceHandler::new(store.clone())),
            navigate_handler: Arc::new(NavigateWizardHandler::new(store.clone())),
            submit_handler: Arc::new(SubmitQuoteHandler::new(store.clone(), dispatcher)),
            reset_handler: Arc::new(ResetWizardHandler::new(store.clone())),
            close_handler: Arc::new(CloseWizardHandler::new(store)),
            estimate_handler: EstimateQuoteHandler::new(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/quote/estimate - Price an answer record without a wizard
pub async fn estimate_quote(
    State(handlers): State<QuoteHandlers>,
    Json(answers): Json<FormAnswers>,
) -> Response {
    let pricing = handlers
        .estimate_handler
        .handle(EstimateQuoteQuery { answers });
    (StatusCode::OK, Json(EstimateResponse::from(pricing))).into_response()
}

/// POST /api/quote/wizards - Start a wizard
pub async fn start_wizard(State(handlers): State<QuoteHandlers>) -> Response {
    match handlers.start_handler.handle().await {
        Ok(wizard) => (StatusCode::CREATED, Json(WizardResponse::from(&wizard))).into_response(),
        Err(e) => handle_quote_error(e),
    }
}

/// GET /api/quote/wizards/:id - Current wizard state
pub async fn get_wizard(
    State(handlers): State<QuoteHandlers>,
    Path(wizard_id): Path<String>,
) -> Response {
    let wizard_id = match parse_wizard_id(&wizard_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get_handler.handle(GetWizardQuery { wizard_id }).await {
        Ok(wizard) => (StatusCode::OK, Json(WizardResponse::from(&wizard))).into_response(),
        Err(e) => handle_quote_error(e),
    }
}

/// PUT /api/quote/wizards/:id/answers - Replace the answer record
pub async fn update_answers(
    State(handlers): State<QuoteHandlers>,
    Path(wizard_id): Path<String>,
    Json(answers): Json<FormAnswers>,
) -> Response {
    let wizard_id = match parse_wizard_id(&wizard_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = UpdateAnswersCommand { wizard_id, answers };
    match handlers.update_handler.handle(cmd).await {
        Ok(wizard) => (StatusCode::OK, Json(WizardResponse::from(&wizard))).into_response(),
        Err(e) => handle_quote_error(e),
    }
}

/// POST /api/quote/wizards/:id/compliance/:need - Toggle a compliance need
pub async fn toggle_compliance(
    State(handlers): State<QuoteHandlers>,
    Path((wizard_id, need)): Path<(String, String)>,
) -> Response {
    let wizard_id = match parse_wizard_id(&wizard_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let need = match need.parse::<ComplianceNeed>() {
        Ok(need) => need,
        Err(_) => {
            return ErrorResponse::bad_request(format!("Unknown compliance need '{}'", need))
                .into_response_with(StatusCode::BAD_REQUEST)
        }
    };

    let cmd = ToggleComplianceCommand { wizard_id, need };
    match handlers.toggle_handler.handle(cmd).await {
        Ok(result) => {
            let response = ToggleComplianceResponse {
                selected: result.selected,
                wizard: WizardResponse::from(&result.wizard),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_quote_error(e),
    }
}

/// POST /api/quote/wizards/:id/next
pub async fn next_step(
    State(handlers): State<QuoteHandlers>,
    Path(wizard_id): Path<String>,
) -> Response {
    navigate(handlers, wizard_id, Direction::Next).await
}

/// POST /api/quote/wizards/:id/back
pub async fn previous_step(
    State(handlers): State<QuoteHandlers>,
    Path(wizard_id): Path<String>,
) -> Response {
    navigate(handlers, wizard_id, Direction::Back).await
}

async fn navigate(handlers: QuoteHandlers, wizard_id: String, direction: Direction) -> Response {
    let wizard_id = match parse_wizard_id(&wizard_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = NavigateWizardCommand {
        wizard_id,
        direction,
    };
    match handlers.navigate_handler.handle(cmd).await {
        Ok(wizard) => (StatusCode::OK, Json(WizardResponse::from(&wizard))).into_response(),
        Err(e) => handle_quote_error(e),
    }
}

/// POST /api/quote/wizards/:id/submit - Dispatch the request and reveal pricing
pub async fn submit_quote(
    State(handlers): State<QuoteHandlers>,
    Path(wizard_id): Path<String>,
) -> Response {
    let wizard_id = match parse_wizard_id(&wizard_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .submit_handler
        .handle(SubmitQuoteCommand { wizard_id })
        .await
    {
        Ok(result) => {
            let response = SubmitQuoteResponse::new(&result.wizard, result.pricing, result.receipt);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_quote_error(e),
    }
}

/// POST /api/quote/wizards/:id/reset
pub async fn reset_wizard(
    State(handlers): State<QuoteHandlers>,
    Path(wizard_id): Path<String>,
) -> Response {
    let wizard_id = match parse_wizard_id(&wizard_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .reset_handler
        .handle(ResetWizardCommand { wizard_id })
        .await
    {
        Ok(wizard) => (StatusCode::OK, Json(WizardResponse::from(&wizard))).into_response(),
        Err(e) => handle_quote_error(e),
    }
}

/// DELETE /api/quote/wizards/:id - Close the form and discard the wizard
pub async fn close_wizard(
    State(handlers): State<QuoteHandlers>,
    Path(wizard_id): Path<String>,
) -> Response {
    let wizard_id = match parse_wizard_id(&wizard_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .close_handler
        .handle(CloseWizardCommand { wizard_id })
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_quote_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn parse_wizard_id(raw: &str) -> Result<WizardId, Response> {
    raw.parse::<WizardId>().map_err(|_| {
        ErrorResponse::bad_request("Invalid wizard ID").into_response_with(StatusCode::BAD_REQUEST)
    })
}

fn handle_quote_error(error: QuoteHandlerError) -> Response {
    let code = error.code();
    let status = status_for(code);

    match error {
        QuoteHandlerError::Wizard(WizardError::ValidationFailed(errors)) => {
            ErrorResponse::new(code, "Please correct the highlighted fields")
                .with_details(json!({ "fields": errors }))
                .into_response_with(status)
        }
        QuoteHandlerError::Dispatch(err) => ErrorResponse::new(code, err.user_message())
            .with_details(json!({ "retryable": true }))
            .into_response_with(status),
        QuoteHandlerError::Storage(err) => {
            tracing::error!(error = %err, "Wizard storage failed");
            ErrorResponse::internal("An internal error occurred")
                .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
        other => ErrorResponse::new(code, other.to_string()).into_response_with(status),
    }
}
