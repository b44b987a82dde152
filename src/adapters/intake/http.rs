//! HTTP intake dispatcher.
//!
//! POSTs the consultation request as JSON to a CRM or mail-intake endpoint.
//!
//! # Security
//!
//! - Bearer API key held in `secrecy::SecretString`
//! - Body signed with HMAC-SHA256 in the `Intake-Signature` header
//! - `Idempotency-Key` carries the submission id so receivers can dedupe

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::foundation::Timestamp;
use crate::ports::{ConsultationDispatcher, ConsultationRequest, DispatchError, DispatchReceipt};

use super::signer::{IntakeSigner, SIGNATURE_HEADER};

/// Longest error body kept from a rejecting endpoint.
const MAX_ERROR_BODY_LEN: usize = 512;

/// Acknowledgement body. Receivers may answer with an empty body.
#[derive(Debug, Default, Deserialize)]
struct IntakeAck {
    #[serde(alias = "id")]
    reference: Option<String>,
}

pub struct HttpIntakeDispatcher {
    endpoint: String,
    api_key: SecretString,
    signer: IntakeSigner,
    http_client: reqwest::Client,
}

impl HttpIntakeDispatcher {
    /// # Errors
    ///
    /// `Unavailable` if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: SecretString,
        signing_secret: SecretString,
        timeout: Duration,
    ) -> Result<Self, DispatchError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DispatchError::Unavailable(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            api_key,
            signer: IntakeSigner::new(signing_secret),
            http_client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn transport_error(error: reqwest::Error) -> DispatchError {
    if error.is_timeout() {
        DispatchError::Timeout
    } else {
        DispatchError::Unavailable(error.to_string())
    }
}

#[async_trait]
impl ConsultationDispatcher for HttpIntakeDispatcher {
    async fn dispatch(&self, request: &ConsultationRequest) -> Result<DispatchReceipt, DispatchError> {
        let body = serde_json::to_vec(request)
            .map_err(|e| DispatchError::Serialization(e.to_string()))?;
        let signature = self
            .signer
            .header_value(Timestamp::now().as_unix_secs(), &body);

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .header(CONTENT_TYPE, "application/json")
            .header(SIGNATURE_HEADER, signature)
            .header("Idempotency-Key", request.submission_id.to_string())
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(
                    submission_id = %request.submission_id,
                    error = %e,
                    "Intake request failed"
                );
                transport_error(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let mut message = response.text().await.unwrap_or_default();
            if let Some((cut, _)) = message.char_indices().nth(MAX_ERROR_BODY_LEN) {
                message.truncate(cut);
            }
            tracing::warn!(
                submission_id = %request.submission_id,
                status = status.as_u16(),
                "Intake endpoint rejected consultation request"
            );
            return Err(DispatchError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        let ack: IntakeAck = serde_json::from_slice(&bytes).unwrap_or_default();

        tracing::info!(
            submission_id = %request.submission_id,
            reference = ?ack.reference,
            "Intake endpoint accepted consultation request"
        );

        Ok(DispatchReceipt::now(ack.reference))
    }
}
