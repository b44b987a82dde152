//! Dispatcher that acknowledges after a fixed delay.
//!
//! Stands in for an intake integration on deployments that have none; the
//! visitor sees the same "submitting" pause as with a real endpoint.

use std::time::Duration;

use async_trait::async_trait;

use crate::ports::{ConsultationDispatcher, ConsultationRequest, DispatchError, DispatchReceipt};

pub struct SimulatedDispatcher {
    delay: Duration,
}

impl SimulatedDispatcher {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl ConsultationDispatcher for SimulatedDispatcher {
    async fn dispatch(&self, request: &ConsultationRequest) -> Result<DispatchReceipt, DispatchError> {
        tokio::time::sleep(self.delay).await;

        tracing::info!(
            submission_id = %request.submission_id,
            wizard_id = %request.wizard_id,
            industry = ?request.answers.industry,
            "Simulated intake acknowledged consultation request"
        );

        Ok(DispatchReceipt::now(None))
    }
}
