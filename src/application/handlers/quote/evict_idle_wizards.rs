//! EvictIdleWizardsHandler - Drops wizards nobody has touched for a while.
//!
//! Wizards are created by anonymous visitors and most are abandoned without
//! a close, so the server sweeps them periodically.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::ports::WizardStore;

use super::QuoteHandlerError;

pub struct EvictIdleWizardsHandler {
    store: Arc<dyn WizardStore>,
    idle_ttl: Duration,
}

impl EvictIdleWizardsHandler {
    pub fn new(store: Arc<dyn WizardStore>, idle_ttl: Duration) -> Self {
        Self { store, idle_ttl }
    }

    pub fn idle_ttl(&self) -> Duration {
        self.idle_ttl
    }

    /// Removes every wizard idle for longer than the TTL. Returns the count.
    pub async fn handle(&self) -> Result<usize, QuoteHandlerError> {
        let ttl = chrono::Duration::from_std(self.idle_ttl).map_err(|_| {
            DomainError::new(ErrorCode::InternalError, "Wizard idle TTL out of range")
        })?;
        let cutoff = Timestamp::from_datetime(Utc::now() - ttl);

        let removed = self.store.remove_idle(cutoff).await?;
        if removed > 0 {
            tracing::info!(removed, "Evicted idle quote wizards");
        }
        Ok(removed)
    }
}
