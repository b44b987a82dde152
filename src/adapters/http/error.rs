//! JSON error body shared by every endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Status for an error code that reached the HTTP layer.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::WizardNotFound | ErrorCode::ContentNotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidStateTransition
        | ErrorCode::SubmissionInProgress
        | ErrorCode::UnknownSubmission
        | ErrorCode::DuplicateSlug => StatusCode::CONFLICT,
        ErrorCode::DispatchFailed => StatusCode::BAD_GATEWAY,
        ErrorCode::StorageError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps a `DomainError` to a JSON response. Internal failures are logged
/// and their message withheld.
pub fn domain_error_response(err: DomainError) -> Response {
    let status = status_for(err.code);
    if status.is_server_error() {
        tracing::error!(code = %err.code, error = %err.message, "Request failed");
        return ErrorResponse::new(err.code, "An internal error occurred").into_response_with(status);
    }
    let mut body = ErrorResponse::new(err.code, err.message);
    if !err.details.is_empty() {
        body = body.with_details(serde_json::json!(err.details));
    }
    body.into_response_with(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_statuses() {
        assert_eq!(status_for(ErrorCode::ValidationFailed), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_for(ErrorCode::WizardNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::SubmissionInProgress), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorCode::DispatchFailed), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(ErrorCode::StorageError), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_body_uses_screaming_code() {
        let body = ErrorResponse::new(ErrorCode::ContentNotFound, "missing");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], "CONTENT_NOT_FOUND");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn internal_errors_hide_message() {
        let response = domain_error_response(DomainError::new(
            ErrorCode::StorageError,
            "connection pool exhausted",
        ));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
