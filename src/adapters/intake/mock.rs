//! Mock dispatcher for testing.
//!
//! Records every request and supports error injection and an artificial
//! delay, so tests can act on a wizard while a dispatch is in flight.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::ports::{ConsultationDispatcher, ConsultationRequest, DispatchError, DispatchReceipt};

#[derive(Clone, Default)]
pub struct MockDispatcher {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    calls: Vec<ConsultationRequest>,
    /// Returned once, by the next call.
    next_error: Option<DispatchError>,
    /// Returned by every call while set.
    fail_all: Option<DispatchError>,
    delay: Duration,
}

impl MockDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A dispatcher whose every call fails with `error`.
    pub fn failing(error: DispatchError) -> Self {
        let mock = Self::new();
        mock.inner.lock().unwrap().fail_all = Some(error);
        mock
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        self.inner.lock().unwrap().delay = delay;
        self
    }

    /// Fail only the next call.
    pub fn set_next_error(&self, error: DispatchError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Stop failing.
    pub fn recover(&self) {
        let mut state = self.inner.lock().unwrap();
        state.fail_all = None;
        state.next_error = None;
    }

    /// Requests received so far, including failed ones.
    pub fn calls(&self) -> Vec<ConsultationRequest> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().calls.len()
    }
}

#[async_trait]
impl ConsultationDispatcher for MockDispatcher {
    async fn dispatch(&self, request: &ConsultationRequest) -> Result<DispatchReceipt, DispatchError> {
        let delay = {
            let mut state = self.inner.lock().unwrap();
            state.calls.push(request.clone());
            state.delay
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.inner.lock().unwrap();
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }
        if let Some(error) = &state.fail_all {
            return Err(error.clone());
        }
        Ok(DispatchReceipt::now(Some(format!("MOCK-{}", state.calls.len()))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{SubmissionId, Timestamp, WizardId};
    use crate::domain::quote::FormAnswers;

    fn request() -> ConsultationRequest {
        ConsultationRequest {
            submission_id: SubmissionId::new(),
            wizard_id: WizardId::new(),
            submitted_at: Timestamp::now(),
            answers: FormAnswers::default(),
        }
    }

    #[tokio::test]
    async fn records_calls_and_numbers_references() {
        let mock = MockDispatcher::new();
        let first = mock.dispatch(&request()).await.unwrap();
        let second = mock.dispatch(&request()).await.unwrap();

        assert_eq!(first.reference.as_deref(), Some("MOCK-1"));
        assert_eq!(second.reference.as_deref(), Some("MOCK-2"));
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn next_error_applies_once() {
        let mock = MockDispatcher::new();
        mock.set_next_error(DispatchError::Timeout);

        assert_eq!(mock.dispatch(&request()).await, Err(DispatchError::Timeout));
        assert!(mock.dispatch(&request()).await.is_ok());
    }

    #[tokio::test]
    async fn failing_mock_fails_until_recovered() {
        let mock = MockDispatcher::failing(DispatchError::Unavailable("down".into()));
        assert!(mock.dispatch(&request()).await.is_err());
        assert!(mock.dispatch(&request()).await.is_err());

        mock.recover();
        assert!(mock.dispatch(&request()).await.is_ok());
        assert_eq!(mock.call_count(), 3);
    }
}
